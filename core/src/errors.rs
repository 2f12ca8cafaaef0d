//! Detector error types
//!
//! The classifier itself is total and never fails. Every error here comes
//! from the pipeline around it: reading the feedback file, validating its
//! columns, loading configuration, or writing the annotated export.

use thiserror::Error;

/// Error category for structured logging and exit-code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Feedback file unreadable or unparseable
    InputError,
    /// Feedback file parsed but lacks required columns
    ValidationError,
    /// Config file unreadable, unparseable or invalid
    ConfigError,
    /// Annotated export could not be written
    OutputError,
}

impl ErrorCategory {
    /// Machine-readable code for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InputError => "INPUT_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::OutputError => "OUTPUT_ERROR",
        }
    }

    /// Whether the user can fix this by editing the feedback file's header
    pub fn is_user_validation(&self) -> bool {
        matches!(self, Self::ValidationError)
    }
}

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("input error: {message}")]
    Input {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(
        "missing required columns: {} (required: {})",
        .missing.join(", "),
        crate::table::REQUIRED_COLUMNS.join(", ")
    )]
    MissingColumns { missing: Vec<String> },

    #[error("config error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("output error: {message}")]
    Output {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl DetectorError {
    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Input { .. } => ErrorCategory::InputError,
            Self::MissingColumns { .. } => ErrorCategory::ValidationError,
            Self::Config { .. } => ErrorCategory::ConfigError,
            Self::Output { .. } => ErrorCategory::OutputError,
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            source: None,
        }
    }

    pub fn input_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Input {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn output_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Output {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Names of the missing columns, if this is a validation error
    pub fn missing_columns(&self) -> Option<&[String]> {
        match self {
            Self::MissingColumns { missing } => Some(missing),
            _ => None,
        }
    }
}

/// Result type for detector operations
pub type Result<T> = std::result::Result<T, DetectorError>;
