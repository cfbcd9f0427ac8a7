use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::loader::LoadError;
use crate::render::RenderError;

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Load(LoadError),
}

impl From<LoadError> for ApiError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::InvalidUrl { .. } => ApiError::Validation(e.to_string()),
            _ => ApiError::Load(e),
        }
    }
}

impl From<RenderError> for ApiError {
    fn from(e: RenderError) -> Self {
        ApiError::Load(LoadError::Render(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
            ApiError::Load(e) => match e {
                LoadError::InvalidUrl { .. } => (StatusCode::BAD_REQUEST, "validation_failed"),
                LoadError::Descriptor(_) => (StatusCode::BAD_REQUEST, "invalid_descriptor"),
                LoadError::Request { .. } | LoadError::Status { .. } => {
                    (StatusCode::BAD_GATEWAY, "upstream_error")
                }
                LoadError::Read { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "read_error"),
                LoadError::Render(_) => (StatusCode::INTERNAL_SERVER_ERROR, "render_error"),
                LoadError::Client(_) => (StatusCode::INTERNAL_SERVER_ERROR, "client_error"),
            },
        };

        let message = match self {
            ApiError::Validation(msg) => msg,
            ApiError::Load(e) => e.to_string(),
        };

        (status, Json(ErrorResponse::with_message(error, &message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
