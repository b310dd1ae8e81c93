//! Client configuration: API base URL, request timeout and where the
//! credential is persisted. Defaults match the hosted frontend; the CLI
//! applies flag/env overrides on top. Configuration values are public; do not
//! store secrets here.

use crate::errors::AppError;
use std::{env, path::PathBuf, time::Duration};
use url::Url;

/// Backend API root used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
/// Request timeout (milliseconds) applied to every API call.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
/// [`DEFAULT_TIMEOUT_MS`] as a CLI default value.
pub const DEFAULT_TIMEOUT_MS_STR: &str = "5000";
/// Storage key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "access_token";
/// Page title used when a route declares none.
pub const DEFAULT_APP_TITLE: &str = "GadgetGuide AI";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub storage_path: PathBuf,
    pub token_key: String,
    pub app_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            storage_path: default_storage_path(),
            token_key: TOKEN_KEY.to_string(),
            app_title: DEFAULT_APP_TITLE.to_string(),
        }
    }
}

/// Optional values coming from flags or the environment.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub storage_path: Option<String>,
}

impl AppConfig {
    /// Applies overrides on top of the defaults and validates the result.
    pub fn load(overrides: ConfigOverrides) -> Result<Self, AppError> {
        let mut config = Self::default();
        apply_overrides(&mut config, overrides);
        config.validate()?;
        Ok(config)
    }

    /// Checks that the base URL is absolute http(s) and the timeout is non-zero.
    pub fn validate(&self) -> Result<(), AppError> {
        let url = Url::parse(&self.api_base_url).map_err(|err| {
            AppError::Config(format!("Invalid API base URL {}: {err}", self.api_base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "Unsupported API base URL scheme: {}",
                url.scheme()
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(AppError::Config(
                "Request timeout must be greater than zero.".to_string(),
            ));
        }
        if self.token_key.trim().is_empty() {
            return Err(AppError::Config("Token key must not be empty.".to_string()));
        }
        Ok(())
    }
}

fn apply_overrides(config: &mut AppConfig, overrides: ConfigOverrides) {
    if let Some(value) = overrides.api_base_url.as_deref().and_then(normalize_value) {
        config.api_base_url = value;
    }
    if let Some(value) = overrides.timeout_ms {
        config.request_timeout = Duration::from_millis(value);
    }
    if let Some(value) = overrides.storage_path.as_deref().and_then(normalize_value) {
        config.storage_path = PathBuf::from(value);
    }
}

/// `$HOME/.gadgetguide/storage.json`, or a relative path when HOME is unset.
fn default_storage_path() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".gadgetguide")
        .join("storage.json")
}

pub(crate) fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AppConfig, ConfigOverrides, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_MS,
        DEFAULT_TIMEOUT_MS_STR, normalize_value,
    };
    use crate::errors::AppError;
    use std::{path::PathBuf, time::Duration};

    #[test]
    fn normalize_value_trims_and_rejects_empty() {
        assert_eq!(normalize_value(""), None);
        assert_eq!(normalize_value("   "), None);
        assert_eq!(
            normalize_value("  http://api.gadgetguide.local "),
            Some("http://api.gadgetguide.local".to_string())
        );
    }

    #[test]
    fn timeout_default_string_matches_number() {
        assert_eq!(DEFAULT_TIMEOUT_MS_STR.parse::<u64>().unwrap(), DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn load_without_overrides_uses_defaults() {
        let config = AppConfig::load(ConfigOverrides::default()).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_millis(5_000));
        assert_eq!(config.token_key, "access_token");
        assert_eq!(config.app_title, "GadgetGuide AI");
        assert!(config.storage_path.ends_with(".gadgetguide/storage.json"));
    }

    #[test]
    fn load_ignores_blank_overrides() {
        let config = AppConfig::load(ConfigOverrides {
            api_base_url: Some("  ".to_string()),
            timeout_ms: None,
            storage_path: Some(String::new()),
        })
        .unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.storage_path.ends_with("storage.json"));
    }

    #[test]
    fn load_applies_overrides() {
        let config = AppConfig::load(ConfigOverrides {
            api_base_url: Some("https://api.example.test/".to_string()),
            timeout_ms: Some(250),
            storage_path: Some("/tmp/gg/storage.json".to_string()),
        })
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.example.test/");
        assert_eq!(config.request_timeout, Duration::from_millis(250));
        assert_eq!(config.storage_path, PathBuf::from("/tmp/gg/storage.json"));
    }

    #[test]
    fn load_rejects_bad_urls_and_zero_timeout() {
        let relative = AppConfig::load(ConfigOverrides {
            api_base_url: Some("/api".to_string()),
            ..ConfigOverrides::default()
        });
        assert!(matches!(relative, Err(AppError::Config(_))));

        let ftp = AppConfig::load(ConfigOverrides {
            api_base_url: Some("ftp://files.example.test".to_string()),
            ..ConfigOverrides::default()
        });
        assert!(matches!(ftp, Err(AppError::Config(_))));

        let zero = AppConfig::load(ConfigOverrides {
            timeout_ms: Some(0),
            ..ConfigOverrides::default()
        });
        assert!(matches!(zero, Err(AppError::Config(_))));
    }
}
