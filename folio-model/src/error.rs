use thiserror::Error;

/// Local validation failure, raised before any store or storage call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field `{0}` is required")]
    Required(&'static str),

    #[error("unknown icon key `{0}`")]
    UnknownIcon(String),

    #[error("unknown technology category `{0}`")]
    UnknownCategory(String),

    #[error("unsupported language `{0}`")]
    UnknownLang(String),

    #[error("unknown bucket `{0}`")]
    UnknownBucket(String),

    #[error("`{0}` is not a list field")]
    UnknownListField(String),

    #[error("key is immutable once created (`{current}` -> `{requested}`)")]
    ImmutableKey { current: String, requested: String },

    #[error("{0}")]
    Invalid(String),
}

/// Fails with [`ValidationError::Required`] when `value` is blank.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}
