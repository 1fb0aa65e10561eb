use folio_model::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(String),

    /// Store failure; the message is the database's own text.
    #[error("{0}")]
    Store(String),

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Busy(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ContentError {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        ContentError::NotFound(what.to_string())
    }
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for ContentError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ContentError::NotFound("row".into()),
            sqlx::Error::Database(db) => ContentError::Store(db.message().to_string()),
            other => ContentError::Store(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for ContentError {
    fn from(err: reqwest::Error) -> Self {
        ContentError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
