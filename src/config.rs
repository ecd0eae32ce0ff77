//! Runtime configuration for the matchpoint server.

use once_cell::sync::Lazy;
use std::env;

#[derive(Debug)]
pub struct Settings {
    /// Trailing window (days) inside which a result still counts.
    pub window_days: i64,
    /// How many most-recent results contribute to a player's total.
    pub counted_results: usize,
    /// Redis TTL (seconds) for the cached latest-ranking response.
    pub ranking_cache_ttl: u64,
}

impl Settings {
    fn from_env() -> Self {
        let window_days = env::var("RANKING_WINDOW_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(365);

        let counted_results = env::var("RANKING_COUNTED_RESULTS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(6);

        let ranking_cache_ttl = env::var("RANKING_CACHE_TTL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        Settings {
            window_days,
            counted_results,
            ranking_cache_ttl,
        }
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

pub fn settings() -> &'static Settings {
    &SETTINGS
}
