use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Malformed listing data from {source_name}: {message}")]
    MalformedDataError { source_name: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid filter criterion '{field}': {value}")]
    InvalidCriteriaError { field: String, value: String },

    #[error("Unknown view path: {path}")]
    RoutingError { path: String },

    #[error("Listing source unavailable after {attempts} attempts: {message}")]
    FetchExhaustedError { attempts: u32, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ListingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ListingError::HttpError(_) | ListingError::FetchExhaustedError { .. } => {
                ErrorCategory::Network
            }
            ListingError::CsvError(_)
            | ListingError::SerializationError(_)
            | ListingError::TomlError(_)
            | ListingError::MalformedDataError { .. } => ErrorCategory::Data,
            ListingError::ConfigError { .. }
            | ListingError::InvalidConfigValueError { .. }
            | ListingError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ListingError::InvalidCriteriaError { .. } | ListingError::RoutingError { .. } => {
                ErrorCategory::Input
            }
            ListingError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 暫時性錯誤，重試即可
            ListingError::HttpError(_) | ListingError::FetchExhaustedError { .. } => {
                ErrorSeverity::Medium
            }
            ListingError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            ListingError::HttpError(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().map(|s| s.is_server_error()).unwrap_or(false)
            }
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ListingError::HttpError(_) | ListingError::FetchExhaustedError { .. } => {
                "Check the listing endpoint and your network connection, then try again"
            }
            ListingError::CsvError(_) => "Try another output format such as json",
            ListingError::IoError(_) => "Check that the file exists and is readable",
            ListingError::SerializationError(_)
            | ListingError::TomlError(_)
            | ListingError::MalformedDataError { .. } => {
                "Make sure the data file is valid JSON or TOML"
            }
            ListingError::ConfigError { .. }
            | ListingError::InvalidConfigValueError { .. }
            | ListingError::MissingConfigError { .. } => {
                "Review the configuration file and command line flags"
            }
            ListingError::InvalidCriteriaError { .. } => {
                "Use 'all' or one of the listed values for this filter"
            }
            ListingError::RoutingError { .. } => {
                "Use one of: /, /search, /restaurants, /salons, /events"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ListingError::HttpError(_) => "Could not reach the listing service".to_string(),
            ListingError::FetchExhaustedError { attempts, .. } => {
                format!("Listing service still unavailable after {} attempts", attempts)
            }
            ListingError::InvalidCriteriaError { field, value } => {
                format!("'{}' is not a valid {} filter", value, field)
            }
            ListingError::RoutingError { path } => format!("There is no page at '{}'", path),
            other => other.to_string(),
        }
    }

    pub(crate) fn invalid_criteria(field: &str, value: &str) -> Self {
        ListingError::InvalidCriteriaError {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ListingError>;
