use std::env;
use std::str::FromStr;

use tracing::info;

use crate::error::OriginGuessrError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Web server
    pub api_host: String,
    pub api_port: u16,

    // Game
    pub rounds_per_game: u32,
    pub round_time_limit_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 3000,
            rounds_per_game: 5,
            round_time_limit_secs: 60,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    /// for anything unset.
    pub fn from_env() -> Result<Self, OriginGuessrError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OriginGuessrError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            api_host: lookup("API_HOST").unwrap_or(defaults.api_host),
            api_port: parsed(&lookup, "API_PORT", defaults.api_port)?,
            rounds_per_game: parsed(&lookup, "ROUNDS_PER_GAME", defaults.rounds_per_game)?,
            round_time_limit_secs: parsed(
                &lookup,
                "ROUND_TIME_LIMIT_SECS",
                defaults.round_time_limit_secs,
            )?,
        };

        if config.rounds_per_game == 0 {
            return Err(OriginGuessrError::Config(
                "ROUNDS_PER_GAME must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn log_summary(&self) {
        info!(
            api_host = self.api_host.as_str(),
            api_port = self.api_port,
            rounds_per_game = self.rounds_per_game,
            round_time_limit_secs = self.round_time_limit_secs,
            "Configuration loaded"
        );
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> Result<T, OriginGuessrError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| OriginGuessrError::Config(format!("{key} must be a number, got {raw:?}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn values_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "8080"),
            ("ROUNDS_PER_GAME", " 3 "),
            ("ROUND_TIME_LIMIT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.api_host, "127.0.0.1");
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.rounds_per_game, 3);
        assert_eq!(config.round_time_limit_secs, 30);
    }

    #[test]
    fn malformed_port_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[("API_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, OriginGuessrError::Config(ref msg) if msg.contains("API_PORT")));
    }

    #[test]
    fn zero_rounds_rejected() {
        let err = Config::from_lookup(lookup_from(&[("ROUNDS_PER_GAME", "0")])).unwrap_err();
        assert!(matches!(err, OriginGuessrError::Config(_)));
    }
}
