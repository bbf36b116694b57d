use thiserror::Error;

#[derive(Error, Debug)]
pub enum Diy99Error {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("{field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("{status_text}: {body}")]
    HttpStatusError {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("{code}: {message}")]
    RemoteError { code: i64, message: String },

    #[error("no valid order id returned")]
    MissingOrderIdError,

    #[error("All {attempts} attempts failed: {last_error}")]
    RetriesExhaustedError { attempts: u32, last_error: String },
}

pub type Result<T> = std::result::Result<T, Diy99Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Network,
    Remote,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl Diy99Error {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::ApiError(_) | Self::RetriesExhaustedError { .. } => ErrorCategory::Network,
            Self::HttpStatusError { .. } | Self::RemoteError { .. } | Self::MissingOrderIdError => {
                ErrorCategory::Remote
            }
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Validation | ErrorCategory::Remote => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 只有傳輸層錯誤與 5xx 值得重試，業務錯誤碼重送也不會改變結果
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ApiError(e) => e.is_connect() || e.is_timeout(),
            Self::HttpStatusError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { field, message } => {
                format!("Invalid order request ({}): {}", field, message)
            }
            Self::ApiError(e) if e.is_timeout() => "The 99Diy API did not respond in time".to_string(),
            Self::ApiError(_) => "Could not reach the 99Diy API".to_string(),
            Self::RetriesExhaustedError { attempts, .. } => {
                format!("The 99Diy API is unreachable after {} attempts", attempts)
            }
            Self::HttpStatusError { status, .. } => {
                format!("The 99Diy API answered with HTTP {}", status)
            }
            Self::RemoteError { code, message } => {
                format!("The 99Diy API rejected the request ({}): {}", code, message)
            }
            Self::MissingOrderIdError => "The 99Diy API did not return an order id".to_string(),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::IoError(e) => format!("File access failed: {}", e),
            Self::SerializationError(e) => format!("Malformed JSON: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Fix the reported field in the order file and run again",
            ErrorCategory::Network => "Check network connectivity and the configured base_url, then retry",
            ErrorCategory::Remote => "Inspect the response with --debug and contact 99Diy if the error persists",
            ErrorCategory::Configuration => "Check the TOML config file and the environment variables it references",
            ErrorCategory::System => "Check that the input files exist and contain valid JSON",
        }
    }
}
