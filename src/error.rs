use thiserror::Error;

/// Result type alias using RetestError
pub type Result<T> = std::result::Result<T, RetestError>;

/// Coarse classification of every failure the crate can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input rejected at construction time
    Validation,
    /// A raw string was not a valid instance of a parameter type
    Parse,
    /// Setup defect (missing registration, unusable weights)
    Configuration,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ERR_VALIDATION",
            ErrorKind::Parse => "ERR_PARSE",
            ErrorKind::Configuration => "ERR_CONFIGURATION",
        }
    }
}

/// A raw value could not be parsed by a registered parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot parse '{value}' as {type_name}: {message}")]
pub struct ParameterParseError {
    pub type_name: String,
    pub value: String,
    pub message: String,
}

impl ParameterParseError {
    pub fn new(type_name: &str, value: &str, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.to_string(),
            value: value.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RetestError {
    // ---- Validation ----
    #[error("Invalid path element '{value}': {reason}")]
    InvalidPathElement { value: String, reason: &'static str },

    #[error("Invalid path '{value}': {reason}")]
    InvalidPath { value: String, reason: &'static str },

    #[error("Invalid retest id '{id}': only letters, digits, '_' and '-' are allowed")]
    InvalidRetestId { id: String },

    #[error("Missing required value: {0}")]
    MissingField(&'static str),

    #[error("Child path '{child}' is not a direct extension of parent path '{parent}'")]
    ChildPathMismatch { parent: String, child: String },

    #[error("Screenshot is already set and cannot be replaced or removed")]
    ScreenshotAlreadySet,

    #[error("Cannot use value '{value}' for attribute '{key}' (expected {expected})")]
    IncompatibleValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    // ---- Parse ----
    #[error(transparent)]
    Parse(#[from] ParameterParseError),

    // ---- Configuration ----
    #[error("No parameter type registered under '{0}'")]
    UnregisteredParameterType(String),

    #[error("Cannot match identities without any weighted attribute (normalizer is 0)")]
    ZeroWeightNormalizer,
}

impl RetestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RetestError::InvalidPathElement { .. }
            | RetestError::InvalidPath { .. }
            | RetestError::InvalidRetestId { .. }
            | RetestError::MissingField(_)
            | RetestError::ChildPathMismatch { .. }
            | RetestError::ScreenshotAlreadySet
            | RetestError::IncompatibleValue { .. } => ErrorKind::Validation,
            RetestError::Parse(_) => ErrorKind::Parse,
            RetestError::UnregisteredParameterType(_) | RetestError::ZeroWeightNormalizer => {
                ErrorKind::Configuration
            }
        }
    }

    /// Stable code of this error's kind
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}
