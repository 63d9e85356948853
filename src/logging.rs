//! Diagnostics setup for the CLI.
//!
//! Build tools capture stdout (e.g. `generate --dry-run`), so all log output
//! goes to stderr without timestamps.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level used when neither `--verbose` nor `RUST_LOG` says otherwise
pub const DEFAULT_LEVEL: Level = Level::INFO;

/// Filter for the requested verbosity. `RUST_LOG` takes precedence.
pub fn env_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { DEFAULT_LEVEL };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

/// Install the global stderr subscriber.
///
/// Returns an error if a subscriber is already installed.
pub fn init(verbose: bool) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}
