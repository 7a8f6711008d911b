//! Error Types
//!
//! Failures that can occur while mounting a grid or fetching a page.

use thiserror::Error;

/// Page fetch failures
///
/// Both variants are handled the same way by the loaders: logged, latch
/// released, pagination pointers untouched so a retry targets the same page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),
    /// A response arrived with a non-success status
    #[error("Network error: {status_text}")]
    HttpStatus { status: u16, status_text: String },
}

/// Host element could not be turned into a working grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing attribute `{0}` on host element")]
    MissingAttribute(&'static str),
    #[error("attribute `{name}` is not a valid count: {value:?}")]
    InvalidAttribute { name: &'static str, value: String },
    #[error("required element `{0}` not found inside host")]
    MissingElement(&'static str),
    #[error("host element is already mounted")]
    AlreadyMounted,
}
