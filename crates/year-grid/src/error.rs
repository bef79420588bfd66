//! Error types for year-grid layout and selection.

use thiserror::Error;

/// Result type for year-grid operations.
pub type Result<T> = std::result::Result<T, YearViewError>;

/// Errors that can occur while configuring or laying out a year view.
///
/// A missing layout is not an error: hit tests answer "nothing here" and
/// renderers draw nothing until a surface of usable size arrives.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum YearViewError {
    /// A grid parameter is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A date key handed in from outside could not be parsed with the active formatter.
    #[error("failed to parse date key {key:?}: {reason}")]
    DateKeyParse { key: String, reason: String },
}

impl YearViewError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
