use crate::store::StoreError;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => Error::NotFound(what),
            other => Error::Store(other),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Error::Unauthorized(err.to_string())
    }
}

/// Builds a single-field validation error, so callers get the field and the
/// violated constraint instead of just a sentence.
pub fn validation_error(field: &'static str, code: &'static str, message: &str) -> Error {
    let mut detail = ValidationError::new(code);
    detail.message = Some(Cow::Owned(message.to_string()));
    let mut errors = ValidationErrors::new();
    errors.add(field, detail);
    Error::Validation(errors)
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
