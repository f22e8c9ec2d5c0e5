use crate::domain::model::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("Incomplete response: answer had {length} characters")]
    IncompleteResponse { length: usize },

    #[error("HTTP error: {status} - {message}")]
    AuthOrNotFound { status: u16, message: String },

    #[error("Transient failure: {message}")]
    Transient {
        status: Option<u16>,
        message: String,
    },

    #[error("Unexpected error: {message}")]
    Unexpected { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl BotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BotError::InvalidInput { .. } => ErrorKind::InvalidInput,
            BotError::Timeout { .. } => ErrorKind::Timeout,
            BotError::IncompleteResponse { .. } => ErrorKind::IncompleteResponse,
            BotError::AuthOrNotFound { .. } => ErrorKind::AuthOrNotFound,
            BotError::Transient { .. } => ErrorKind::Transient,
            BotError::Unexpected { .. }
            | BotError::IoError(_)
            | BotError::ConfigValidationError { .. }
            | BotError::InvalidConfigValueError { .. }
            | BotError::MissingConfigError { .. } => ErrorKind::Unexpected,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            BotError::InvalidInput { message } => message.clone(),
            BotError::Timeout { .. } => {
                "The advice service took too long to answer. Please try again.".to_string()
            }
            BotError::IncompleteResponse { .. } => {
                "The advice service returned an incomplete answer.".to_string()
            }
            BotError::AuthOrNotFound { status: 401, .. } => {
                "Invalid API key. Please check your configuration.".to_string()
            }
            BotError::AuthOrNotFound { status: 403, .. } => {
                "Access denied. The API key is not allowed to use this model.".to_string()
            }
            BotError::AuthOrNotFound { .. } => {
                "The configured model or endpoint was not found.".to_string()
            }
            BotError::Transient {
                status: Some(429), ..
            } => "Too many requests. Please try again later.".to_string(),
            BotError::Transient {
                status: Some(500..=599),
                ..
            } => "Server error. Please try again later.".to_string(),
            BotError::Transient { status: None, .. } => {
                "No internet connection. Please check your network.".to_string()
            }
            BotError::Transient { message, .. } => format!("Network error: {}", message),
            BotError::Unexpected { message } => {
                format!("An unexpected error occurred: {}", message)
            }
            BotError::IoError(e) => format!("File access failed: {}", e),
            BotError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            BotError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            BotError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BotError::InvalidInput { .. } => {
                "Ask a non-empty question of at most 1000 characters"
            }
            BotError::Timeout { .. } | BotError::IncompleteResponse { .. } => {
                "Retry the question, or rephrase it"
            }
            BotError::AuthOrNotFound { .. } => {
                "Check the API key and the model name in the configuration"
            }
            BotError::Transient { .. } => "Check the network connection and retry later",
            BotError::Unexpected { .. } => "Run with --verbose and inspect the logs",
            BotError::IoError(_) => "Check the file path and permissions",
            BotError::ConfigValidationError { .. }
            | BotError::InvalidConfigValueError { .. }
            | BotError::MissingConfigError { .. } => {
                "Fix the configuration file or the command-line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
