//! Tracing setup

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Build the filter for the configured level.
///
/// `RUST_LOG` wins when it is set, so a single run can be made noisier
/// without touching the configuration.
pub fn env_filter(log: &LogConfig) -> EnvFilter {
    let directive = log.filter_directive().unwrap_or("info");
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

/// Install the global `fmt` subscriber.
///
/// Calling it again (or after the host installed its own subscriber) is a
/// no-op.
pub fn init_tracing(log: &LogConfig) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(log))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level = %log.level, "Tracing initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        let log = LogConfig {
            level: "warning".to_string(),
        };
        init_tracing(&log);
        init_tracing(&log);
    }
}
