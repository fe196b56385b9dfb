use crate::state::debouncer::DEFAULT_QUIET_PERIOD;
use log::LevelFilter;
use std::time::Duration;

pub const ENV_LOG_LEVEL: &str = "NBATUI_LOG";
pub const ENV_DEBOUNCE_MS: &str = "NBATUI_DEBOUNCE_MS";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: LevelFilter,
    /// How long the search box must be idle before a search is sent.
    pub debounce: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { full_screen: false, log_level: LevelFilter::Error, debounce: DEFAULT_QUIET_PERIOD }
    }
}

impl AppSettings {
    /// Defaults, overridden by `NBATUI_LOG` and `NBATUI_DEBOUNCE_MS` when set.
    pub fn load() -> Self {
        let defaults = Self::default();
        Self {
            log_level: std::env::var(ENV_LOG_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(defaults.log_level),
            debounce: std::env::var(ENV_DEBOUNCE_MS)
                .ok()
                .and_then(|v| parse_debounce(&v))
                .unwrap_or(defaults.debounce),
            ..defaults
        }
    }
}

fn parse_log_level(value: &str) -> Option<LevelFilter> {
    value.trim().parse().ok()
}

fn parse_debounce(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_millis)
}
