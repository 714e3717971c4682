use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Download from {url} failed with HTTP status {status}")]
    FetchStatusError { url: String, status: u16 },

    #[error("Could not start converter '{program}': {source}")]
    ConverterLaunchError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Conversion failed (exit code: {}): {stderr}", describe_exit_code(.exit_code))]
    ConversionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Converter finished but did not create {path}")]
    ConversionProducedNoOutput { path: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

fn describe_exit_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "none".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Fetch,
    Conversion,
    FileSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SyncError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SyncError::ApiError(_) | SyncError::FetchStatusError { .. } => ErrorCategory::Fetch,
            SyncError::IoError(_) => ErrorCategory::FileSystem,
            SyncError::ConverterLaunchError { .. }
            | SyncError::ConversionFailed { .. }
            | SyncError::ConversionProducedNoOutput { .. } => ErrorCategory::Conversion,
            SyncError::ConfigError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路問題通常重跑即可
            ErrorCategory::Fetch => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Conversion => ErrorSeverity::High,
            ErrorCategory::FileSystem => ErrorSeverity::Critical,
        }
    }

    /// 對應到程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Fetch => 2,
            ErrorCategory::Conversion => 3,
            ErrorCategory::FileSystem => 4,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SyncError::ApiError(e) if e.is_timeout() => {
                "The repeater API did not answer in time".to_string()
            }
            SyncError::ApiError(_) => "Could not reach the repeater API".to_string(),
            SyncError::FetchStatusError { status, .. } => {
                format!("The repeater API answered with HTTP {}", status)
            }
            SyncError::ConverterLaunchError { program, .. } => {
                format!("The converter '{}' could not be started", program)
            }
            SyncError::ConversionFailed { exit_code, .. } => match exit_code {
                Some(code) => format!("The converter failed with exit code {}", code),
                None => "The converter was terminated by a signal".to_string(),
            },
            SyncError::ConversionProducedNoOutput { path } => {
                format!("The converter did not produce {}", path)
            }
            SyncError::IoError(e) => format!("File operation failed: {}", e),
            _ => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Fetch => {
                "Check your network connection and the endpoint URL, then run again".to_string()
            }
            ErrorCategory::Conversion => {
                "Check the converter command and its output; a previous database, if any, was kept as the backup file".to_string()
            }
            ErrorCategory::FileSystem => {
                "Check that the working directory exists and is writable".to_string()
            }
            ErrorCategory::Configuration => {
                "Review the command line flags and the TOML configuration file".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
