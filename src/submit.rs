//! The async driver that connects the pure session core to the world.
//!
//! [`drive`] is the single path every UI handler goes through: apply
//! an [`Action`] via [`update`], execute whatever [`Effect`]s come
//! back, and feed each outcome in as a further action. The session
//! core stays synchronous and fully unit-testable; this is the only
//! place where its effects meet the network.

use crate::client::TextGenerator;
use crate::config::AppConfig;
use crate::pipeline::generate;
use crate::session::{update, Action, Effect, Session};
use tracing::info;

/// Apply one action to the session and run its effects to completion.
///
/// A generation effect blocks this call (one logical request per user
/// action); the caller's executor stays free because the call is
/// awaited, not spun.
pub async fn drive(
    session: &mut Session,
    action: Action,
    client: &dyn TextGenerator,
    config: &AppConfig,
) {
    let mut pending = update(session, action);

    while let Some(effect) = pending.pop() {
        match effect {
            Effect::Generate { prompt } => {
                info!(mode = ?session.mode, "dispatching generation request");
                let outcome = generate::generate(client, &prompt, config.api_timeout_secs).await;
                let followups = update(session, Action::GenerationFinished(outcome));
                pending.extend(followups);
            }
        }
    }
}
