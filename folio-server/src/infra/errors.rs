use std::fmt;

use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_core::ContentError;
use folio_core::api::ApiResponse;
use folio_model::ValidationError;

pub type AppResult<T> = Result<T, AppError>;

/// `Json` extractor whose rejections use the [`ApiResponse`] error body.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ApiResponse::<()>::error(self.message));
        (self.status, body).into_response()
    }
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        let message = err.to_string();
        match err {
            ContentError::Validation(_) => Self::bad_request(message),
            ContentError::NotFound(_) => Self::not_found(message),
            ContentError::Auth(_) => Self::unauthorized(message),
            ContentError::Busy(_) => Self::conflict(message),
            ContentError::Store(_) | ContentError::Storage(_) => Self::bad_gateway(message),
            ContentError::Internal(_) => {
                tracing::error!(error = %message, "internal error");
                Self::internal(message)
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_errors_map_to_statuses() {
        let cases = [
            (ContentError::Validation(ValidationError::Required("name")), StatusCode::BAD_REQUEST),
            (ContentError::NotFound("project".into()), StatusCode::NOT_FOUND),
            (ContentError::Auth("Invalid login credentials".into()), StatusCode::UNAUTHORIZED),
            (ContentError::Busy("upload".into()), StatusCode::CONFLICT),
            (ContentError::Store("duplicate key".into()), StatusCode::BAD_GATEWAY),
            (ContentError::Storage("Bucket not found".into()), StatusCode::BAD_GATEWAY),
            (ContentError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status, status);
        }
    }

    #[test]
    fn store_messages_pass_through() {
        let err = AppError::from(ContentError::Store(
            "duplicate key value violates unique constraint".into(),
        ));
        assert!(err.message.contains("duplicate key value"));
    }
}
