//! Logging setup.
//!
//! Library code only emits `tracing` events; the binary installs a subscriber
//! once at startup. `RUST_LOG` takes precedence over the level passed in.

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Install the global subscriber, writing to stderr.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging(log_level: &str, format: LogFormat) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    let result = match format {
        LogFormat::Json => subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if result.is_err() {
        return false;
    }

    info!(level = log_level, ?format, "Logging initialized");
    true
}
