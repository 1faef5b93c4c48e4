use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TERMGPT_LOG";
const DEFAULT_LEVEL: &str = "info";

/// Install the stderr subscriber. `quiet` turns logging off unless
/// `TERMGPT_LOG` asks for something explicitly.
pub fn init(quiet: bool) {
    let default_level = if quiet { "off" } else { DEFAULT_LEVEL };
    let _ = tracing_subscriber::fmt()
        // Fall back to the default level when TERMGPT_LOG is unset or invalid.
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV)
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
