//! Unified error hierarchy for bmirs
//!
//! Input validation failures are recoverable and user-facing; everything
//! else (export, configuration, IO) belongs to the terminal shell.

use thiserror::Error;

pub use crate::export::ExportError;

/// Top-level error type for all bmirs operations
#[derive(Debug, Error)]
pub enum BmiRsError {
    /// Weight/height text could not be turned into a measurement
    #[error("Input error: {0}")]
    Parse(#[from] ParseError),

    /// History export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Input parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Weight or height left blank
    #[error("Missing input: both weight and height are required")]
    MissingInput,

    /// Text that is not a finite number
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: String, value: String },
}

impl ParseError {
    /// Message shown to the user in place of a result
    pub fn user_message(&self) -> &'static str {
        match self {
            ParseError::MissingInput => "Enter both values.",
            ParseError::InvalidNumber { .. } => "Values must be valid numbers.",
        }
    }
}

/// Result type alias for bmirs operations
pub type Result<T> = std::result::Result<T, BmiRsError>;

impl BmiRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BmiRsError::Parse(_) => ErrorSeverity::Warning,
            BmiRsError::Export(ExportError::EmptyHistory) => ErrorSeverity::Warning,
            BmiRsError::Internal(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            BmiRsError::Parse(err) => err.user_message().to_string(),
            BmiRsError::Export(ExportError::EmptyHistory) => {
                "Nothing to export yet. Compute a BMI first.".to_string()
            }
            BmiRsError::Export(ExportError::UnsupportedFormat(format)) => {
                format!("Unknown export format '{}'. Use csv, json or text.", format)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
            ErrorSeverity::Info => tracing::Level::INFO,
        }
    }
}
