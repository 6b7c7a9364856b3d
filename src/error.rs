//! Error types shared across the crate.
//!
//! Errors are propagated as `anyhow::Error`. Where the caller needs to react to the kind of
//! failure (for example to recover from a corrupt storage slot, or to choose an exit code), the
//! error is wrapped in a `PubError` that carries an `ErrorType`.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies errors that callers may want to handle differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The user submitted input that was rejected.
    Input,
    /// The stored item list could not be parsed.
    Deserialization,
    /// Reading or writing the durable store failed.
    Storage,
    /// A component was used out of its lifecycle order.
    State,
    /// The data home or its configuration file is missing or invalid.
    Config,
}

serde_plain::derive_display_from_serialize!(ErrorType);

/// An error tagged with an `ErrorType`.
pub struct PubError {
    error_type: ErrorType,
    inner: Error,
}

impl PubError {
    pub fn new(error_type: ErrorType, inner: impl Into<Error>) -> Self {
        Self {
            error_type,
            inner: inner.into(),
        }
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }
}

impl Debug for PubError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:?}", self.error_type, self.inner)
    }
}

impl Display for PubError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // The inner chain is rendered here, so `source` stays empty to avoid printing it twice.
        write!(f, "{:#}", self.inner)
    }
}

impl std::error::Error for PubError {}

/// Tags the error side of a `Result` with an `ErrorType`.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(PubError::new(error_type, e)))
    }
}

/// Returns the `ErrorType` of `err` if it was tagged with one.
pub fn error_type(err: &Error) -> Option<ErrorType> {
    err.downcast_ref::<PubError>().map(PubError::error_type)
}
