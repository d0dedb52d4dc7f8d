//! Internal diagnostics through `tracing`
//!
//! The console protocol never goes through here; these are debug events about
//! registration, filtering and case lifecycles, off unless `PANCAKE_LOG` asks
//! for them.

use crate::config::LOG_ENV;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "warn";

/// Install a stderr subscriber filtered by `PANCAKE_LOG` (default `warn`).
///
/// Does nothing when a global subscriber is already set.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init();
        init();
        tracing::warn!("logging initialised");
    }
}
