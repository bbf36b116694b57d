#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{Diy99Error, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const PRODUCTION_BASE_URL: &str = "http://8.129.218.196:9199";
// 99Diy 目前沙箱與正式環境共用同一組位址
pub const SANDBOX_BASE_URL: &str = "http://8.129.218.196:9199";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub debug: bool,
    pub sandbox: bool,
    pub base_url: Option<String>,
    pub timeout_seconds: u64,
    pub retry_count: u32,
    pub retry_wait_seconds: u64,
    pub retry_max_wait_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            debug: false,
            sandbox: false,
            base_url: None,
            timeout_seconds: 10,
            retry_count: 2,
            retry_wait_seconds: 2,
            retry_max_wait_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retry_count: u32,
    pub wait: Duration,
    pub max_wait: Duration,
}

impl RetryPolicy {
    pub fn max_attempts(&self) -> u32 {
        self.retry_count + 1
    }

    /// Exponential backoff from `wait`, capped at `max_wait`. `attempt` starts at 1.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.wait.saturating_mul(factor).min(self.max_wait)
    }
}

impl ClientConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(Diy99Error::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| Diy99Error::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${DIY99_BASE_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| Diy99Error::config(format!("env substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn sandbox() -> Self {
        Self {
            sandbox: true,
            ..Self::default()
        }
    }

    pub fn base_url(&self) -> &str {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/'),
            None if self.sandbox => SANDBOX_BASE_URL,
            None => PRODUCTION_BASE_URL,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retry_count: self.retry_count,
            wait: Duration::from_secs(self.retry_wait_seconds),
            max_wait: Duration::from_secs(self.retry_max_wait_seconds),
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(url) = &self.base_url {
            validate_url("base_url", url)?;
        }
        validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
        validate_range("retry_count", self.retry_count, 0, 10)?;
        if self.retry_wait_seconds > self.retry_max_wait_seconds {
            return Err(Diy99Error::validation(
                "retry_wait_seconds",
                "Value must not exceed retry_max_wait_seconds",
            ));
        }
        Ok(())
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), PRODUCTION_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.retry_policy().max_attempts(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_content = r#"
sandbox = true
timeout_seconds = 30
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();

        assert!(config.sandbox);
        assert_eq!(config.base_url(), SANDBOX_BASE_URL);
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.retry_count, 2);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DIY99_TEST_BASE_URL", "https://diy.example.com/");

        let toml_content = r#"
base_url = "${DIY99_TEST_BASE_URL}"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), "https://diy.example.com");

        std::env::remove_var("DIY99_TEST_BASE_URL");
    }

    #[test]
    fn test_unset_env_var_is_kept_and_rejected() {
        let toml_content = r#"
base_url = "${DIY99_SURELY_UNSET_VARIABLE}"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.base_url.as_deref(),
            Some("${DIY99_SURELY_UNSET_VARIABLE}")
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let config = ClientConfig {
            timeout_seconds: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            retry_wait_seconds: 20,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = ClientConfig::from_toml_str("timeout_seconds = \"ten\"").unwrap_err();
        assert!(matches!(err, Diy99Error::ConfigError { .. }));
    }

    #[test]
    fn test_retry_backoff_is_capped() {
        let policy = ClientConfig::default().retry_policy();
        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(8));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_secs(10));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"debug = true\nretry_count = 0\n")
            .unwrap();

        let config = ClientConfig::from_file(temp_file.path()).unwrap();
        assert!(config.debug);
        assert_eq!(config.retry_policy().max_attempts(), 1);
    }
}
