//! Errors raised for invalid facility usage
//!
//! Both variants are programmer mistakes at the call site. They are returned
//! to the immediate caller and never swallowed inside the crate.

use thiserror::Error;

/// Contract violation reported by the notice emitter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeprecationError {
    /// An argument has the wrong shape or value
    #[error("{0}")]
    InvalidArgument(String),
    /// A stack index reaches past the available frames
    #[error("{index} is greater than the current call stack")]
    OutOfBounds { index: u64 },
}

/// Result type for emitter operations
pub type DeprecationResult<T> = Result<T, DeprecationError>;

impl DeprecationError {
    pub(crate) fn negative_index(index: i64) -> Self {
        DeprecationError::InvalidArgument(format!(
            "Expected a value greater than or equal to 0. Got: {}",
            index
        ))
    }

    /// `observed` is either a quoted literal or a value kind such as `boolean`
    pub(crate) fn expected_non_empty_string(observed: impl std::fmt::Display) -> Self {
        DeprecationError::InvalidArgument(format!("Expected a non-empty string. Got: {}", observed))
    }

    pub(crate) fn outside_function(facility: &str) -> Self {
        DeprecationError::InvalidArgument(format!(
            "{}::method() must be called from within a function/method.",
            facility
        ))
    }

    pub(crate) fn invalid_version(text: &str) -> Self {
        DeprecationError::InvalidArgument(format!("Expected a version number. Got: {:?}", text))
    }
}
