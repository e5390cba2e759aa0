use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// The unified error type for the planner
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("[E{code:04}] Invalid bake configuration: {message}")]
    InvalidConfig {
        code: u16,
        message: String,
        field: Option<String>,
    },

    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Storage error: {message}")]
    Storage {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Troubleshooting error: {message}")]
    Advisory {
        code: u16,
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Validation error: {message}")]
    Validation {
        code: u16,
        message: String,
        field: Option<String>,
    },

    #[error("[E{code:04}] {message}")]
    Other {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PlannerError {
    /// Create an invalid bake configuration error for a field
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            code: ErrorCode::BAKE_GENERIC,
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create an invalid bake configuration error with specific code
    pub fn invalid_config_with_code(
        code: u16,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            code,
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::CONFIG_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage error with default code
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            code: ErrorCode::STORAGE_GENERIC,
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create a storage error with specific code and path
    pub fn storage_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Storage {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create an advisory error with default code
    pub fn advisory(message: impl Into<String>) -> Self {
        Self::Advisory {
            code: ErrorCode::ADVISORY_GENERIC,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Create an advisory error with specific code and optional HTTP status
    pub fn advisory_with_code(code: u16, message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Advisory {
            code,
            message: message.into(),
            status,
            source: None,
        }
    }

    /// Create a validation error with default code
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::VALIDATION_GENERIC,
            message: message.into(),
            field: None,
        }
    }

    /// Create a validation error with specific code and field
    pub fn validation_with_code(
        code: u16,
        message: impl Into<String>,
        field: Option<String>,
    ) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            field,
        }
    }

    /// Create a generic other error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            code: ErrorCode::OTHER_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    ///
    /// Bake configuration and validation errors never wrap another error, so
    /// the source is dropped for those variants.
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Storage { source: src, .. }
            | Self::Advisory { source: src, .. }
            | Self::Other { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::InvalidConfig { .. } | Self::Validation { .. } => {}
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::InvalidConfig { message, .. }
            | Self::Config { message, .. }
            | Self::Storage { message, .. }
            | Self::Advisory { message, .. }
            | Self::Validation { message, .. }
            | Self::Other { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfig { .. } => 2,
            Self::Config { .. } => 3,
            Self::Storage { .. } => 4,
            Self::Advisory { .. } => 5,
            Self::Validation { .. } => 2,
            Self::Other { .. } => 1,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::InvalidConfig { code, .. }
            | Self::Config { code, .. }
            | Self::Storage { code, .. }
            | Self::Advisory { code, .. }
            | Self::Validation { code, .. }
            | Self::Other { code, .. } => *code,
        }
    }

    /// The offending field, when the error concerns a single input
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidConfig { field, .. } | Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Whether this is an invalid bake configuration
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidConfig { message, field, .. } => match field {
                Some(f) => format!("Bake setting '{}' is invalid: {}", f, message),
                None => format!("Bake settings are invalid: {}", message),
            },
            Self::Config { message, .. } => format!("Configuration problem: {}", message),
            Self::Storage { message, path, .. } => {
                if let Some(p) = path {
                    format!("Storage error at {}: {}", p.display(), message)
                } else {
                    format!("Storage error: {}", message)
                }
            }
            Self::Advisory {
                message, status, ..
            } => {
                if let Some(s) = status {
                    format!("Something went wrong asking for advice (HTTP {}): {}", s, message)
                } else {
                    format!("Something went wrong asking for advice: {}", message)
                }
            }
            Self::Validation { message, field, .. } => {
                if let Some(f) = field {
                    format!("Validation error for '{}': {}", f, message)
                } else {
                    format!("Validation error: {}", message)
                }
            }
            Self::Other { message, .. } => message.clone(),
        }
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut msg = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            msg.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
        msg
    }

    /// Whether retrying the same operation may succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Advisory { code, status, .. } => {
                *code == ErrorCode::ADVISORY_RATE_LIMITED
                    || *code == ErrorCode::ADVISORY_TIMEOUT
                    || matches!(status, Some(s) if *s >= 500)
            }
            _ => false,
        }
    }
}

/// Type alias for Results using PlannerError
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Type alias for application Results (using anyhow for flexibility)
pub type AppResult<T> = anyhow::Result<T>;

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let (code, message) = match err.kind() {
            ErrorKind::NotFound => (ErrorCode::STORAGE_NOT_FOUND, "File or directory not found"),
            ErrorKind::PermissionDenied => {
                (ErrorCode::STORAGE_PERMISSION_DENIED, "Permission denied")
            }
            ErrorKind::InvalidData => (ErrorCode::STORAGE_CORRUPTED, "Invalid data"),
            _ => (ErrorCode::STORAGE_IO_ERROR, "IO operation failed"),
        };

        PlannerError::storage_with_code(code, message, None).with_source(err)
    }
}

impl From<serde_yaml::Error> for PlannerError {
    fn from(err: serde_yaml::Error) -> Self {
        PlannerError::config_with_code(ErrorCode::CONFIG_INVALID_YAML, "Invalid YAML syntax")
            .with_source(err)
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::storage_with_code(
            ErrorCode::STORAGE_SERIALIZATION_ERROR,
            "Invalid JSON",
            None,
        )
        .with_source(err)
    }
}

impl From<crate::session::store::StoreError> for PlannerError {
    fn from(err: crate::session::store::StoreError) -> Self {
        use crate::session::store::StoreError;

        match err {
            StoreError::Io { path, source } => {
                PlannerError::storage_with_code(ErrorCode::STORAGE_IO_ERROR, "IO operation failed", Some(path))
                    .with_source(source)
            }
            StoreError::Serialization(e) => PlannerError::storage_with_code(
                ErrorCode::STORAGE_SERIALIZATION_ERROR,
                "Failed to serialize stored value",
                None,
            )
            .with_source(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation_and_chaining() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "session file");
        let err = PlannerError::storage("Cannot read session")
            .with_source(io_err)
            .with_context("while loading bake inputs");

        assert_eq!(err.code(), ErrorCode::STORAGE_GENERIC);
        assert!(err.to_string().contains("[E3000]"));
        assert!(err.user_message().contains("Cannot read session"));
        assert!(err.developer_message().contains("caused by: session file"));
    }

    #[test]
    fn test_invalid_config_reports_field() {
        let err = PlannerError::invalid_config_with_code(
            ErrorCode::BAKE_MISSING_FIELD,
            "cold_proof_hours",
            "required when cold proofing",
        );
        assert!(err.is_invalid_config());
        assert_eq!(err.field(), Some("cold_proof_hours"));
        assert_eq!(err.exit_code(), 2);
        assert!(err.user_message().contains("'cold_proof_hours'"));
    }

    #[test]
    fn test_recoverable_errors() {
        let limited =
            PlannerError::advisory_with_code(ErrorCode::ADVISORY_RATE_LIMITED, "slow down", Some(429));
        assert!(limited.is_recoverable());

        let server = PlannerError::advisory_with_code(ErrorCode::ADVISORY_REQUEST_FAILED, "oops", Some(503));
        assert!(server.is_recoverable());

        let auth =
            PlannerError::advisory_with_code(ErrorCode::ADVISORY_UNAUTHORIZED, "bad key", Some(401));
        assert!(!auth.is_recoverable());
        assert!(!PlannerError::validation("nope").is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let err: PlannerError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.code(), ErrorCode::STORAGE_PERMISSION_DENIED);
        assert_eq!(err.exit_code(), 4);
    }
}
