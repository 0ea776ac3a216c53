use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Transport failure: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    HttpStatus,
    Decode,
    Io,
    Config,
}

impl HarvestError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HarvestError::TransportError(_) => ErrorCategory::Transport,
            HarvestError::HttpStatusError { .. } => ErrorCategory::HttpStatus,
            HarvestError::DecodeError(_) => ErrorCategory::Decode,
            HarvestError::IoError(_) => ErrorCategory::Io,
            HarvestError::ConfigError { .. } | HarvestError::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Transport => "Check network connectivity and the API base URL",
            ErrorCategory::HttpStatus => {
                "The API rejected the request; check the query parameters and User-Agent"
            }
            ErrorCategory::Decode => "The API answered with an unexpected payload; check the base URL",
            ErrorCategory::Io => "Check that stdout is writable",
            ErrorCategory::Config => "Fix the configuration file or command line flags",
        }
    }

    /// Process status for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Config => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
