//! Server binary for eli5-web.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `AppConfig`, performs the fatal startup credential check, and runs
//! the page server.

use anyhow::{Context, Result};
use clap::Parser;
use eli5_web::{serve, AppConfig};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Start on the default address (http://127.0.0.1:8080)
  eli5-web

  # Public bind on another port
  eli5-web --host 0.0.0.0 --port 3000

  # A different model and a larger paste limit
  eli5-web --model gemini-2.5-pro --max-chars 4000

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY     Gemini API credential (required; startup fails without it)
  ELI5_HOST          Same as --host
  ELI5_PORT          Same as --port
  ELI5_MODEL         Same as --model
  ELI5_MAX_CHARS     Same as --max-chars

SETUP:
  1. Set the credential:  export GEMINI_API_KEY=...
  2. Start the server:    eli5-web
  3. Open the page:       http://127.0.0.1:8080
"#;

/// Explain pasted text or PDFs in five-year-old terms.
#[derive(Parser, Debug)]
#[command(
    name = "eli5-web",
    version,
    about = "Single-page web tool: explain text simply or list its top questions via Gemini",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "ELI5_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(short, long, env = "ELI5_PORT", default_value_t = 8080)]
    port: u16,

    /// Generation model identifier.
    #[arg(long, env = "ELI5_MODEL", default_value = eli5_web::config::DEFAULT_MODEL)]
    model: String,

    /// Character limit for pasted text.
    #[arg(long, env = "ELI5_MAX_CHARS", default_value_t = 1000)]
    max_chars: usize,

    /// Per-request deadline in seconds.
    #[arg(long, env = "ELI5_API_TIMEOUT", default_value_t = 60)]
    api_timeout: u64,

    /// Sampling temperature (0.0–2.0).
    #[arg(long, env = "ELI5_TEMPERATURE", default_value_t = 0.7)]
    temperature: f32,

    /// Maximum tokens per generated answer.
    #[arg(long, env = "ELI5_MAX_TOKENS", default_value_t = 1024)]
    max_tokens: usize,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "ELI5_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "ELI5_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── Config (credential check happens here, before binding) ───────────
    let base = AppConfig::from_env().context(
        "Startup aborted: no usable API credential.\n\
         Set GEMINI_API_KEY and start again.",
    )?;
    let config = AppConfig::builder(base.api_key)
        .model(cli.model)
        .max_input_chars(cli.max_chars)
        .api_timeout_secs(cli.api_timeout)
        .temperature(cli.temperature)
        .max_output_tokens(cli.max_tokens)
        .build()
        .context("Invalid configuration")?;

    // ── Serve ────────────────────────────────────────────────────────────
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .with_context(|| format!("Invalid bind address '{}:{}'", cli.host, cli.port))?;

    serve(addr, config).await.context("Server failed")?;
    Ok(())
}
