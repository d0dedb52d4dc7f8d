//! Runner configuration via environment variables
//!
//! Command-line options win over the environment; the environment wins over
//! the built-in defaults.

use crate::reporter::ColorChoice;
use std::env;

/// Default filter pattern (PANCAKE_FILTER)
pub const FILTER_ENV: &str = "PANCAKE_FILTER";
/// Default color choice: always, never or auto (PANCAKE_COLOR)
pub const COLOR_ENV: &str = "PANCAKE_COLOR";
/// Disable color (PANCAKE_NO_COLOR=1 or the standard NO_COLOR=1)
pub const NO_COLOR_ENV: &str = "PANCAKE_NO_COLOR";
/// `tracing` filter directive for internal diagnostics (PANCAKE_LOG)
pub const LOG_ENV: &str = "PANCAKE_LOG";

/// Runner configuration loaded from environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Filter pattern used when no `--filter=` is given
    pub filter: Option<String>,
    /// Color choice used when no color flag is given
    pub color: Option<ColorChoice>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let no_color = env::var_os(NO_COLOR_ENV).is_some() || env::var_os("NO_COLOR").is_some();
        let color = if no_color {
            Some(ColorChoice::Never)
        } else {
            env::var(COLOR_ENV)
                .ok()
                .and_then(|v| ColorChoice::parse(v.trim()))
        };

        Self {
            filter: env::var(FILTER_ENV).ok(),
            color,
        }
    }
}
