// src/config.rs

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_SOURCE_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_RDAP_URL: &str = "https://rdap.org";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive number of milliseconds, got '{value}'")]
    InvalidTimeout { name: &'static str, value: String },
    #[error("{name} is not a valid URL: '{value}'")]
    InvalidUrl { name: &'static str, value: String },
}

/// Runtime settings, read from `SAFESCOPE_*` environment variables.
///
/// A `.env` file in the working directory is loaded first when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Budget for each fact source during collection.
    pub source_timeout: Duration,
    /// Base URL of the RDAP service, without a trailing `/domain`.
    pub rdap_url: String,
    pub user_agent: String,
    /// Extra entries for the reputation allow-lists.
    pub known_domains: Vec<String>,
    pub known_registrars: Vec<String>,
    /// `platform:handle` pairs.
    pub known_accounts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_timeout: Duration::from_millis(DEFAULT_SOURCE_TIMEOUT_MS),
            rdap_url: DEFAULT_RDAP_URL.to_string(),
            user_agent: default_user_agent(),
            known_domains: Vec::new(),
            known_registrars: Vec::new(),
            known_accounts: Vec::new(),
        }
    }
}

fn default_user_agent() -> String {
    format!("SafeScope/{}", env!("CARGO_PKG_VERSION"))
}

fn list(raw: Option<String>) -> Vec<String> {
    raw.map(|v| {
        v.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

impl Config {
    /// Loads `.env` (if any), then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source_timeout = match lookup("SAFESCOPE_SOURCE_TIMEOUT_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: "SAFESCOPE_SOURCE_TIMEOUT_MS",
                        value: raw,
                    });
                }
            },
            None => Duration::from_millis(DEFAULT_SOURCE_TIMEOUT_MS),
        };

        let rdap_url = lookup("SAFESCOPE_RDAP_URL").unwrap_or_else(|| DEFAULT_RDAP_URL.to_string());
        if Url::parse(&rdap_url).is_err() {
            return Err(ConfigError::InvalidUrl { name: "SAFESCOPE_RDAP_URL", value: rdap_url });
        }

        Ok(Self {
            source_timeout,
            rdap_url,
            user_agent: lookup("SAFESCOPE_USER_AGENT").unwrap_or_else(default_user_agent),
            known_domains: list(lookup("SAFESCOPE_KNOWN_DOMAINS")),
            known_registrars: list(lookup("SAFESCOPE_KNOWN_REGISTRARS")),
            known_accounts: list(lookup("SAFESCOPE_KNOWN_ACCOUNTS")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(from_pairs(&[]).unwrap(), Config::default());
    }

    #[test]
    fn reads_overrides_and_lists() {
        let config = from_pairs(&[
            ("SAFESCOPE_SOURCE_TIMEOUT_MS", "1500"),
            ("SAFESCOPE_RDAP_URL", "https://rdap.example.net/"),
            ("SAFESCOPE_KNOWN_DOMAINS", "example.net, , intranet.example"),
            ("SAFESCOPE_KNOWN_ACCOUNTS", "twitter:nasa"),
        ])
        .unwrap();
        assert_eq!(config.source_timeout, Duration::from_millis(1500));
        assert_eq!(config.rdap_url, "https://rdap.example.net/");
        assert_eq!(config.known_domains, vec!["example.net", "intranet.example"]);
        assert_eq!(config.known_accounts, vec!["twitter:nasa"]);
        assert!(config.known_registrars.is_empty());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            from_pairs(&[("SAFESCOPE_SOURCE_TIMEOUT_MS", "soon")]),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            from_pairs(&[("SAFESCOPE_SOURCE_TIMEOUT_MS", "0")]),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            from_pairs(&[("SAFESCOPE_RDAP_URL", "not a url")]),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}
