use crate::utils::error::{DeployError, Result};
use crate::utils::validation::{self, Validate};
use std::time::Duration;

pub const HOST_VAR: &str = "TFY_HOST";
pub const API_KEY_VAR: &str = "TFY_API_KEY";
pub const POLL_INTERVAL_VAR: &str = "TFY_POLL_INTERVAL_SECS";
pub const WAIT_TIMEOUT_VAR: &str = "TFY_WAIT_TIMEOUT_SECS";
pub const REQUEST_TIMEOUT_VAR: &str = "TFY_REQUEST_TIMEOUT_SECS";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 1800;

/// Connection settings for the deployment control plane.
#[derive(Clone)]
pub struct PlatformConfig {
    /// Base URL of the control plane, e.g. `https://app.example.com`.
    pub host: String,
    pub api_key: String,
    /// Delay between status polls when waiting for a rollout.
    pub poll_interval: Duration,
    /// Upper bound on waiting for a rollout.
    pub wait_timeout: Duration,
    /// Per-request timeout; `None` keeps the HTTP client's default.
    pub request_timeout: Option<Duration>,
}

impl std::fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("host", &self.host)
            .field("api_key", &"***")
            .field("poll_interval", &self.poll_interval)
            .field("wait_timeout", &self.wait_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl PlatformConfig {
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: api_key.into(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            wait_timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
            request_timeout: None,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| DeployError::MissingConfigError {
                field: HOST_VAR.to_string(),
            })?;
        let api_key = lookup(API_KEY_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| DeployError::MissingConfigError {
                field: API_KEY_VAR.to_string(),
            })?;

        let mut config = Self::new(host.trim_end_matches('/'), api_key);

        if let Some(secs) = parse_secs(POLL_INTERVAL_VAR, lookup(POLL_INTERVAL_VAR))? {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_secs(WAIT_TIMEOUT_VAR, lookup(WAIT_TIMEOUT_VAR))? {
            config.wait_timeout = Duration::from_secs(secs);
        }
        config.request_timeout =
            parse_secs(REQUEST_TIMEOUT_VAR, lookup(REQUEST_TIMEOUT_VAR))?.map(Duration::from_secs);

        Ok(config)
    }
}

fn parse_secs(field: &str, raw: Option<String>) -> Result<Option<u64>> {
    match raw {
        None => Ok(None),
        Some(value) => value.trim().parse::<u64>().map(Some).map_err(|e| {
            DeployError::invalid_value(field, &value, format!("Not a number of seconds: {}", e))
        }),
    }
}

impl Validate for PlatformConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url(HOST_VAR, &self.host)?;
        validation::validate_non_empty_string(API_KEY_VAR, &self.api_key)?;

        if self.poll_interval.is_zero() {
            return Err(DeployError::invalid_value(
                POLL_INTERVAL_VAR,
                0,
                "Poll interval must be at least one second",
            ));
        }
        Ok(())
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_only_credentials_set() {
        let config = PlatformConfig::from_lookup(lookup_from(&[
            (HOST_VAR, "https://platform.example.com/"),
            (API_KEY_VAR, "secret"),
        ]))
        .unwrap();

        assert_eq!(config.host, "https://platform.example.com");
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.wait_timeout, Duration::from_secs(1800));
        assert!(config.request_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_api_key() {
        let result = PlatformConfig::from_lookup(lookup_from(&[(
            HOST_VAR,
            "https://platform.example.com",
        )]));

        match result {
            Err(DeployError::MissingConfigError { field }) => assert_eq!(field, API_KEY_VAR),
            other => panic!("expected missing api key, got {:?}", other),
        }
    }

    #[test]
    fn test_timeouts_are_parsed() {
        let config = PlatformConfig::from_lookup(lookup_from(&[
            (HOST_VAR, "https://platform.example.com"),
            (API_KEY_VAR, "secret"),
            (POLL_INTERVAL_VAR, "2"),
            (WAIT_TIMEOUT_VAR, "60"),
            (REQUEST_TIMEOUT_VAR, "15"),
        ]))
        .unwrap();

        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.wait_timeout, Duration::from_secs(60));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_bad_timeout_is_reported() {
        let result = PlatformConfig::from_lookup(lookup_from(&[
            (HOST_VAR, "https://platform.example.com"),
            (API_KEY_VAR, "secret"),
            (WAIT_TIMEOUT_VAR, "soon"),
        ]));

        assert!(matches!(
            result,
            Err(DeployError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = PlatformConfig::new("https://platform.example.com", "super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
