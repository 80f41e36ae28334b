//! Configuration module.
//!
//! Loads configuration from environment variables. There is
//! intentionally no persistence configuration: all state is
//! process-lifetime only.

use std::env;
use std::time::Duration;

/// Default quiz answer window.
const DEFAULT_QUIZ_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Display name used in help/welcome copy.
    pub bot_name: String,

    /// How long a quiz session stays open.
    pub quiz_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if `QUIZ_TIMEOUT_SECS` is set but not a positive integer.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let bot_name = env::var("BOT_NAME").unwrap_or_else(|_| "Atelier".to_string());

        let quiz_timeout_secs = match env::var("QUIZ_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .expect("QUIZ_TIMEOUT_SECS must be a positive integer"),
            Err(_) => DEFAULT_QUIZ_TIMEOUT_SECS,
        };

        Self {
            bot_name,
            quiz_timeout: Duration::from_secs(quiz_timeout_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_name: "Atelier".to_string(),
            quiz_timeout: Duration::from_secs(DEFAULT_QUIZ_TIMEOUT_SECS),
        }
    }
}
