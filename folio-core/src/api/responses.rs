use folio_model::{Direction, Lang, ListEdit};
use serde::{Deserialize, Serialize};

/// Standard API envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn error(error: String) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            error: Some(error),
            message: None,
        }
    }

    /// Error envelope that still carries `data`, for writes that failed
    /// after the current state was re-read.
    pub fn error_with_data(data: T, error: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            data: Some(data),
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LangRequest {
    pub lang: String,
}

impl LangRequest {
    pub fn parse(&self) -> Result<Lang, folio_model::ValidationError> {
        self.lang.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveRequest {
    pub direction: Direction,
}

/// Body of the array-input endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEditRequest {
    pub action: ListEdit,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub url: String,
}
