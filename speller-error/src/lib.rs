#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused_imports,
    unused_mut,
    missing_docs,
    missing_debug_implementations
)]
//! internal library to provide structures for errors in Speller.
//!
//! # Examples
//! ```rust
//! use speller_error::{Error, ErrorType};
//!
//! let error = Error::new(ErrorType::NotAvailable, None, None);
//! assert!(error.is_not_available());
//! ```

use std::error::Error as StdError;
use std::fmt;

/// Boxed error to bypass specific [Error](StdError).
pub type BError = Box<dyn StdError + Send + Sync>;
/// anyhow-like error handler.
pub type Result<T> = core::result::Result<T, BError>;

/// The struct that represents an error
#[derive(Debug)]
pub struct Error {
    /// The error type.
    pub etype: ErrorType,
    /// The cause of this error.
    pub cause: Option<BError>,
    /// Explains the context in which the error occurs.
    pub context: Option<String>,
}

impl Error {
    /// Throw an [`Error`].
    pub fn new(
        etype: ErrorType,
        cause: Option<BError>,
        context: Option<String>,
    ) -> Self {
        Error {
            etype,
            cause,
            context,
        }
    }

    /// No word can be handed out.
    pub fn is_not_available(&self) -> bool {
        matches!(self.etype, ErrorType::NotAvailable)
    }

    /// The ledger could not be persisted.
    pub fn is_persistence(&self) -> bool {
        matches!(self.etype, ErrorType::Persistence(_))
    }

    /// An outbound service failed.
    pub fn is_upstream(&self) -> bool {
        matches!(self.etype, ErrorType::Upstream(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.context, &self.cause) {
            (Some(context), Some(cause)) => {
                write!(f, "{} ({}): {}", self.etype, context, cause)
            },
            (Some(context), None) => write!(f, "{} ({})", self.etype, context),
            (None, Some(cause)) => write!(f, "{}: {}", self.etype, cause),
            (None, None) => write!(f, "{}", self.etype),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause.as_ref() as &(dyn StdError + 'static))
    }
}

/// Errors in Speller.
#[derive(Debug)]
pub enum ErrorType {
    /// Generic error that returns no additional information.
    Unspecified,
    /// No words are loaded, or the rotation state is inconsistent.
    NotAvailable,
    /// Errors related to `speller-db`.
    Persistence(PersistenceError),
    /// Errors of outbound services (speech, images, dictionary).
    Upstream(UpstreamError),
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorType::Unspecified => {
                write!(f, "An error has occurred, but no further information is provided.")
            },
            ErrorType::NotAvailable => write!(f, "No words available"),
            ErrorType::Persistence(error) => write!(f, "{}", error),
            ErrorType::Upstream(error) => write!(f, "{}", error),
        }
    }
}
impl StdError for ErrorType {}

/// Errors related to `speller-db`.
#[derive(Debug)]
pub enum PersistenceError {
    /// Serialization failed.
    SerializationError,
    /// The ledger file could not be written or replaced.
    WritingError,
    /// Data are corrupted or not in the correct format (UTF-8).
    ReadingError,
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PersistenceError::SerializationError => {
                write!(f, "Serialization failed.")
            },
            PersistenceError::WritingError => {
                write!(f, "Failed to write the score ledger.")
            },
            PersistenceError::ReadingError => write!(
                f,
                "Data are corrupted or not in the correct format (UTF-8)."
            ),
        }
    }
}
impl StdError for PersistenceError {}

/// Errors related to outbound services.
#[derive(Debug)]
pub enum UpstreamError {
    /// The request could not be sent or timed out.
    Request,
    /// The service answered with a non-success status code.
    Status(u16),
    /// The answer could not be decoded.
    Decoding,
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UpstreamError::Request => write!(f, "Upstream request failed."),
            UpstreamError::Status(code) => {
                write!(f, "Upstream answered with status {}.", code)
            },
            UpstreamError::Decoding => {
                write!(f, "Upstream answer could not be decoded.")
            },
        }
    }
}
impl StdError for UpstreamError {}
