//! Logger setup for the binary.
//!
//! Everything goes to stderr: stdout belongs to the text protocol.

use flexi_logger::{Logger, LoggerHandle, colored_default_format};

/// Start logging with `filter` (e.g. "info", "across_rust::mcts=trace"),
/// unless `RUST_LOG` is set, which takes precedence.
///
/// Keep the returned handle alive for as long as logging is needed.
pub fn setup_logging(filter: &str) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(filter)?
        .log_to_stderr()
        .format(colored_default_format)
        .start()?;
    Ok(handle)
}
