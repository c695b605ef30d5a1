//! Feed configuration loaded from environment variables.
//!
//! Every knob has a production default matching the observed product
//! behavior, so `FeedConfig::default()` is what most callers want.

use std::env;
use std::time::Duration;

/// Tuning knobs for a live leaderboard subscription.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Interval between background refresh cycles
    pub refresh_interval: Duration,
    /// Size of the top slice shown in the primary list
    pub top_n: usize,
    /// Size of the podium sub-slice (taken from the top slice)
    pub podium_size: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(120),
            top_n: 10,
            podium_size: 3,
        }
    }
}

impl FeedConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    ///
    /// Recognized variables: `LEADERBOARD_REFRESH_SECS`,
    /// `LEADERBOARD_TOP_N`, `LEADERBOARD_PODIUM_SIZE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let refresh_secs = parse_var("LEADERBOARD_REFRESH_SECS")?
            .unwrap_or(defaults.refresh_interval.as_secs());
        let top_n = parse_var("LEADERBOARD_TOP_N")?.unwrap_or(defaults.top_n);
        let podium_size = parse_var("LEADERBOARD_PODIUM_SIZE")?.unwrap_or(defaults.podium_size);

        if refresh_secs == 0 {
            return Err(ConfigError::Invalid(
                "LEADERBOARD_REFRESH_SECS",
                "must be at least 1".to_string(),
            ));
        }
        if podium_size > top_n {
            return Err(ConfigError::Invalid(
                "LEADERBOARD_PODIUM_SIZE",
                format!("must not exceed LEADERBOARD_TOP_N ({})", top_n),
            ));
        }

        Ok(Self {
            refresh_interval: Duration::from_secs(refresh_secs),
            top_n,
            podium_size,
        })
    }
}

/// Parse an optional env var, distinguishing "unset" from "unparseable".
fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(name, format!("could not parse {:?}", raw))),
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
