use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitTrackError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Malformed record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Missing owner identifier")]
    MissingOwner,
}

pub type Result<T> = std::result::Result<T, FitTrackError>;

impl FitTrackError {
    pub fn invalid(message: impl Into<String>) -> Self {
        FitTrackError::InvalidArgument(message.into())
    }

    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        FitTrackError::MalformedRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

impl IntoResponse for FitTrackError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            FitTrackError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "Invalid argument"),
            FitTrackError::StoreUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Record store unavailable")
            }
            FitTrackError::MalformedRecord { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Malformed record")
            }
            FitTrackError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            FitTrackError::MissingOwner => (StatusCode::UNAUTHORIZED, "Missing owner identifier"),
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
