//! The single-page server.
//!
//! Four routes, one page:
//!
//! * `GET /`        — render the page for the caller's session
//! * `POST /state`  — a widget changed (mode, source, text); apply the
//!   edits and re-render, no generation
//! * `POST /submit` — apply the edits, then run the full submission
//!   flow (validate → generate → present)
//! * `POST /upload` — multipart PDF; extract its text into the session
//!
//! Sessions are keyed by a `sid` cookie and live in an in-memory map;
//! each handler clones the session out under the lock, works on the
//! copy, and writes it back — the lock is never held across the
//! generation await. `POST /state` is the explicit rerender path for
//! widget changes, so no ambient page-global state is needed anywhere.

use crate::client::{GeminiClient, TextGenerator};
use crate::config::AppConfig;
use crate::error::{ConfigError, ExtractionError};
use crate::pipeline::extract;
use crate::session::{update, Action, InputSource, Mode, Session};
use crate::submit::drive;
use crate::view::PageTemplate;
use askama::Template;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;

/// Upper bound on concurrently tracked sessions. When reached, an
/// arbitrary entry is dropped; tracking insertion order is not worth
/// the bookkeeping for an ephemeral, cookie-scoped cache.
const MAX_SESSIONS: usize = 4096;

/// Errors that prevent the server from starting or keep running.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

struct AppState {
    config: AppConfig,
    client: Arc<dyn TextGenerator>,
    sessions: Mutex<HashMap<Uuid, Session>>,
}

type SharedState = Arc<AppState>;

/// The main form: always posts mode and source; `text` is present only
/// while the paste source is showing its text area.
#[derive(Debug, Deserialize)]
struct PageForm {
    mode: Mode,
    source: InputSource,
    text: Option<String>,
}

/// Build the application router around any generator.
///
/// Public so tests can drive the full HTTP surface with a scripted
/// [`TextGenerator`] instead of the live client.
pub fn router(config: AppConfig, client: Arc<dyn TextGenerator>) -> Router {
    let body_limit = config.max_upload_bytes.saturating_mul(2).max(1024 * 1024);
    let state = Arc::new(AppState {
        config,
        client,
        sessions: Mutex::new(HashMap::new()),
    });

    Router::new()
        .route("/", get(index))
        .route("/state", post(state_changed))
        .route("/submit", post(submitted))
        .route("/upload", post(uploaded))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn serve(addr: SocketAddr, config: AppConfig) -> Result<(), ServeError> {
    let client: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(&config)?);
    let app = router(config, client);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        error!("failed to install ctrl-c handler; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn index(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let (sid, is_new) = resolve_session_id(&headers);
    let session = checkout(&state, sid);
    respond(&session, is_new.then_some(sid))
}

async fn state_changed(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Form(form): Form<PageForm>,
) -> Response {
    let (sid, is_new) = resolve_session_id(&headers);
    let mut session = checkout(&state, sid);

    apply_edits(&mut session, &form);

    store(&state, sid, session.clone());
    respond(&session, is_new.then_some(sid))
}

async fn submitted(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Form(form): Form<PageForm>,
) -> Response {
    let (sid, is_new) = resolve_session_id(&headers);
    let mut session = checkout(&state, sid);

    apply_edits(&mut session, &form);
    drive(
        &mut session,
        Action::Submitted,
        state.client.as_ref(),
        &state.config,
    )
    .await;

    store(&state, sid, session.clone());
    respond(&session, is_new.then_some(sid))
}

async fn uploaded(
    State(state): State<SharedState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let (sid, is_new) = resolve_session_id(&headers);
    let mut session = checkout(&state, sid);

    let outcome = read_upload(multipart, state.config.max_upload_bytes).await;
    update(&mut session, Action::PdfExtracted(outcome));

    store(&state, sid, session.clone());
    respond(&session, is_new.then_some(sid))
}

// ── Upload plumbing ──────────────────────────────────────────────────────

/// Pull the `document` field out of the multipart body and extract its
/// text. Every failure becomes an [`ExtractionError`] so the session
/// update path renders it as the usual warning.
async fn read_upload(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<extract::ExtractedDocument, ExtractionError> {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("document") => {
                let bytes = field.bytes().await.map_err(|e| ExtractionError::Unreadable {
                    detail: format!("upload interrupted: {e}"),
                })?;
                if bytes.len() > max_bytes {
                    return Err(ExtractionError::Unreadable {
                        detail: format!(
                            "file is {} bytes, the limit is {} bytes",
                            bytes.len(),
                            max_bytes
                        ),
                    });
                }
                // pdf parsing is CPU-bound; keep it off the async workers.
                return tokio::task::spawn_blocking(move || extract::pdf_text(&bytes))
                    .await
                    .unwrap_or_else(|e| {
                        Err(ExtractionError::Unreadable {
                            detail: format!("extraction task failed: {e}"),
                        })
                    });
            }
            Ok(Some(_)) => continue,
            Ok(None) => {
                return Err(ExtractionError::Unreadable {
                    detail: "no file was included in the upload".into(),
                })
            }
            Err(e) => {
                return Err(ExtractionError::Unreadable {
                    detail: format!("could not read the upload: {e}"),
                })
            }
        }
    }
}

// ── Session plumbing ─────────────────────────────────────────────────────

/// Apply the form's widget values to the session, in an order that
/// keeps the clearing rules right: text first, so a simultaneous
/// source switch still clears it.
fn apply_edits(session: &mut Session, form: &PageForm) {
    if let Some(text) = &form.text {
        update(session, Action::InputEdited(text.clone()));
    }
    update(session, Action::ModeSelected(form.mode));
    update(session, Action::SourceSelected(form.source));
}

fn resolve_session_id(headers: &HeaderMap) -> (Uuid, bool) {
    match cookie_session_id(headers) {
        Some(sid) => (sid, false),
        None => (Uuid::new_v4(), true),
    }
}

fn cookie_session_id(headers: &HeaderMap) -> Option<Uuid> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == "sid")
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}

/// Clone the caller's session out of the store, creating it on first
/// contact.
fn checkout(state: &AppState, sid: Uuid) -> Session {
    let mut sessions = state
        .sessions
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    sessions
        .entry(sid)
        .or_insert_with(|| Session::new(state.config.max_input_chars))
        .clone()
}

fn store(state: &AppState, sid: Uuid, session: Session) {
    let mut sessions = state
        .sessions
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if sessions.len() >= MAX_SESSIONS && !sessions.contains_key(&sid) {
        if let Some(evict) = sessions.keys().next().copied() {
            sessions.remove(&evict);
        }
    }
    sessions.insert(sid, session);
}

// ── Rendering ────────────────────────────────────────────────────────────

fn respond(session: &Session, new_sid: Option<Uuid>) -> Response {
    let html = match PageTemplate::for_session(session).render() {
        Ok(html) => html,
        Err(e) => {
            error!("template render failed: {e}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut response = Html(html).into_response();
    if let Some(sid) = new_sid {
        match HeaderValue::from_str(&format!("sid={sid}; Path=/; HttpOnly; SameSite=Lax")) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => error!("could not build session cookie: {e}"),
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_parsing_finds_sid_among_others() {
        let sid = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; sid={sid}; lang=en")).unwrap(),
        );
        assert_eq!(cookie_session_id(&headers), Some(sid));
    }

    #[test]
    fn missing_or_garbage_cookie_yields_none() {
        assert_eq!(cookie_session_id(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("sid=not-a-uuid"));
        assert_eq!(cookie_session_id(&headers), None);
    }

    #[test]
    fn store_evicts_when_full() {
        let config = AppConfig::builder("k").build().unwrap();
        let state = AppState {
            config: config.clone(),
            client: Arc::new(NeverCalled),
            sessions: Mutex::new(HashMap::new()),
        };
        for _ in 0..MAX_SESSIONS {
            store(&state, Uuid::new_v4(), Session::new(1000));
        }
        store(&state, Uuid::new_v4(), Session::new(1000));
        let sessions = state.sessions.lock().unwrap();
        assert_eq!(sessions.len(), MAX_SESSIONS);
    }

    struct NeverCalled;

    #[async_trait::async_trait]
    impl TextGenerator for NeverCalled {
        async fn generate(
            &self,
            _prompt: &str,
        ) -> Result<String, crate::error::GenerationError> {
            panic!("generator must not be called");
        }
    }
}
