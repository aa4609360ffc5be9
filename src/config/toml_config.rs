use crate::adapters::{FileListings, HttpListings, RetryPolicy, StaticListings};
use crate::core::render::OutputFormat;
use crate::domain::ports::ListingProvider;
use crate::utils::error::{ListingError, Result};
use crate::utils::validation::{
    validate_data_file, validate_positive_number, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    pub defaults: Option<DefaultsConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Fixture,
    File,
    Http,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub r#type: SourceType,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

/// Criteria and hints applied when neither the view path nor a flag sets them.
/// Values use the selector text forms (`all`, `4.5+`, `$$`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub path: Option<String>,
    pub query: Option<String>,
    pub r#type: Option<String>,
    pub label: Option<String>,
    pub min_rating: Option<String>,
    pub price: Option<String>,
    pub open_now: Option<bool>,
    pub sort_by_rating: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

impl SourceConfig {
    pub fn fixture() -> Self {
        Self::default()
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            r#type: SourceType::File,
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn http(endpoint: impl Into<String>) -> Self {
        Self {
            r#type: SourceType::Http,
            endpoint: Some(endpoint.into()),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(10))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_attempts.unwrap_or(3),
            Duration::from_millis(self.retry_delay_ms.unwrap_or(500)),
        )
    }

    /// 依設定建立資料來源
    pub fn build_provider(&self) -> Result<Box<dyn ListingProvider>> {
        self.validate()?;
        let provider: Box<dyn ListingProvider> = match self.r#type {
            SourceType::Fixture => Box::new(StaticListings::new()),
            SourceType::File => {
                let path = validate_required_field("source.path", &self.path)?;
                Box::new(FileListings::new(path)?)
            }
            SourceType::Http => {
                let endpoint = validate_required_field("source.endpoint", &self.endpoint)?;
                Box::new(HttpListings::new(
                    endpoint.clone(),
                    self.timeout(),
                    self.retry_policy(),
                )?)
            }
        };
        tracing::debug!("Using listing source: {}", provider.source_name());
        Ok(provider)
    }
}

impl Validate for SourceConfig {
    fn validate(&self) -> Result<()> {
        match self.r#type {
            SourceType::Fixture => {}
            SourceType::File => {
                let path = validate_required_field("source.path", &self.path)?;
                validate_data_file("source.path", path)?;
            }
            SourceType::Http => {
                let endpoint = validate_required_field("source.endpoint", &self.endpoint)?;
                validate_url("source.endpoint", endpoint)?;
            }
        }

        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }
        if let Some(attempts) = self.retry_attempts {
            validate_positive_number("source.retry_attempts", u64::from(attempts), 1)?;
        }
        Ok(())
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${LISTINGS_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ListingError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn defaults(&self) -> DefaultsConfig {
        self.defaults.clone().unwrap_or_default()
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|o| o.format)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.source.validate()
    }
}
