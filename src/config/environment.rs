use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ENV_VAR: &str = "WEIGHT_TRACKER_ENV";
pub const API_URL_VAR: &str = "WEIGHT_TRACKER_API_URL";
pub const AUDIO_URL_VAR: &str = "WEIGHT_TRACKER_AUDIO_URL";
pub const TIMEOUT_VAR: &str = "WEIGHT_TRACKER_TIMEOUT_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// 未知或缺少的環境名稱一律退回 production
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().to_lowercase()).as_deref() {
            Some("development") | Some("dev") => Environment::Development,
            Some("production") | Some("prod") => Environment::Production,
            Some(other) => {
                tracing::warn!("Unknown environment '{}', falling back to production", other);
                Environment::Production
            }
            None => Environment::Production,
        }
    }

    /// CLI 參數優先，其次為環境變數
    pub fn resolve(flag: Option<&str>) -> Self {
        match flag {
            Some(name) => Self::from_name(Some(name)),
            None => Self::from_name(std::env::var(ENV_VAR).ok().as_deref()),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    pub environment: Environment,
    pub api_url: String,
    pub audio_url: String,
    pub timeout_ms: u64,
}

impl ApiSettings {
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Development => Self {
                environment,
                api_url: "http://localhost:8001/weights".to_string(),
                audio_url: "http://localhost:8001/process_audio".to_string(),
                timeout_ms: 10_000,
            },
            Environment::Production => Self {
                environment,
                api_url: "https://crossfit-backend-v2.fly.dev/weights".to_string(),
                audio_url: "https://crossfit-backend-v2.fly.dev/process_audio".to_string(),
                timeout_ms: 15_000,
            },
        }
    }

    /// 套用 WEIGHT_TRACKER_* 環境變數覆蓋
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var(API_URL_VAR) {
            self.api_url = url;
        }
        if let Ok(url) = std::env::var(AUDIO_URL_VAR) {
            self.audio_url = url;
        }
        if let Ok(raw) = std::env::var(TIMEOUT_VAR) {
            self.timeout_ms = raw.trim().parse().map_err(|_| {
                TrackerError::InvalidConfigValueError {
                    field: TIMEOUT_VAR.to_string(),
                    value: raw.clone(),
                    reason: "Expected a whole number of milliseconds".to_string(),
                }
            })?;
        }
        Ok(())
    }

    pub fn log_summary(&self) {
        tracing::info!(
            environment = %self.environment,
            base_url = %self.api_url,
            timeout_ms = self.timeout_ms,
            "Environment config"
        );
    }
}

impl ConfigProvider for ApiSettings {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn audio_url(&self) -> &str {
        &self.audio_url
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}

impl Validate for ApiSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.url", &self.api_url)?;
        validation::validate_url("api.audio_url", &self.audio_url)?;
        validation::validate_positive_number("api.timeout_ms", self.timeout_ms, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_name() {
        assert_eq!(Environment::from_name(Some("development")), Environment::Development);
        assert_eq!(Environment::from_name(Some("DEV")), Environment::Development);
        assert_eq!(Environment::from_name(Some("production")), Environment::Production);
        assert_eq!(Environment::from_name(Some("staging")), Environment::Production);
        assert_eq!(Environment::from_name(None), Environment::Production);
    }

    #[test]
    fn test_flag_wins_over_env_var() {
        assert_eq!(Environment::resolve(Some("dev")), Environment::Development);
    }

    #[test]
    fn test_builtin_settings() {
        let dev = ApiSettings::for_environment(Environment::Development);
        assert_eq!(dev.api_url, "http://localhost:8001/weights");
        assert_eq!(dev.timeout_ms, 10_000);

        let prod = ApiSettings::for_environment(Environment::Production);
        assert_eq!(prod.api_url, "https://crossfit-backend-v2.fly.dev/weights");
        assert_eq!(prod.timeout_ms, 15_000);
        assert!(prod.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut settings = ApiSettings::for_environment(Environment::Development);
        settings.timeout_ms = 0;
        assert!(settings.validate().is_err());

        settings.timeout_ms = 1;
        settings.api_url = "not a url".to_string();
        assert!(settings.validate().is_err());
    }
}
