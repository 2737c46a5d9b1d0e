//! Server configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "client/dist";
/// Upper bound on one `/api/chat` response, first byte to last.
pub const DEFAULT_CHAT_MAX_DURATION_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub static_dir: PathBuf,
    pub chat_max_duration: Duration,
}

impl AppConfig {
    /// Build typed server config from environment variables.
    ///
    /// - `PORT`: listen port, default 3000
    /// - `STATIC_DIR`: built client assets, default `client/dist`
    /// - `CHAT_MAX_DURATION_SECS`: default 30
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a set variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env_or("PORT", DEFAULT_PORT)?;
        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR));
        let max_secs = env_or("CHAT_MAX_DURATION_SECS", DEFAULT_CHAT_MAX_DURATION_SECS)?;

        Ok(Self { port, static_dir, chat_max_duration: Duration::from_secs(max_secs) })
    }

    /// Lower the chat deadline to the model client's whole-request timeout,
    /// which would otherwise cut the stream first.
    ///
    /// Returns whether the deadline was lowered.
    pub fn cap_chat_duration(&mut self, request_timeout: Duration) -> bool {
        if self.chat_max_duration <= request_timeout {
            return false;
        }
        self.chat_max_duration = request_timeout;
        true
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            chat_max_duration: Duration::from_secs(DEFAULT_CHAT_MAX_DURATION_SECS),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
