use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://www.basketball-reference.com/leagues";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_MIN_POINTS: f64 = 15.0;
pub const DEFAULT_MIN_EFG_PERCENT: f64 = 40.0;
pub const DEFAULT_MIN_GAMES_STARTED: f64 = 50.0;

/// Eligibility floors. Every comparison is strict (`value > floor`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub min_points: f64,
    pub min_games_started: f64,
    /// Fraction, not percent (0.40 means 40%).
    pub min_efg: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_points: DEFAULT_MIN_POINTS,
            min_games_started: DEFAULT_MIN_GAMES_STARTED,
            min_efg: DEFAULT_MIN_EFG_PERCENT * 0.01,
        }
    }
}

impl Thresholds {
    /// Builds thresholds from request-style optionals. `efg_percent` is a
    /// percentage (40 means 0.40).
    pub fn from_request(
        points: Option<f64>,
        efg_percent: Option<f64>,
        games_started: Option<f64>,
    ) -> Self {
        Self {
            min_points: points.unwrap_or(DEFAULT_MIN_POINTS),
            min_games_started: games_started.unwrap_or(DEFAULT_MIN_GAMES_STARTED),
            min_efg: efg_percent.unwrap_or(DEFAULT_MIN_EFG_PERCENT) * 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Settings {
    /// Reads `NBA_MVP_*` variables, loading `.env` first when present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Settings::default();
        let base_url = opt_env("NBA_MVP_BASE_URL")
            .map(|val| val.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        let timeout_secs = env::var("NBA_MVP_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1);
        let user_agent = opt_env("NBA_MVP_USER_AGENT").unwrap_or(defaults.user_agent);
        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            user_agent,
        }
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .and_then(|val| if val.trim().is_empty() { None } else { Some(val) })
}
