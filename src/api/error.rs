//! Maps domain errors onto HTTP responses. Every failure body has the same
//! shape, `{"message": "..."}`, which is what the client toasts.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;

use crate::game::errors::GameError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        let status = match &err {
            GameError::NotFound(_) => StatusCode::NOT_FOUND,
            GameError::Validation(_)
            | GameError::InsufficientFunds
            | GameError::AlreadyMember
            | GameError::DuplicateEmail(_) => StatusCode::BAD_REQUEST,
            GameError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            GameError::Sled(_)
            | GameError::Bincode(_)
            | GameError::Io(_)
            | GameError::SchemaMismatch { .. }
            | GameError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {}", err);
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (
                GameError::NotFound("quest: x".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                GameError::Validation("title must not be empty".into()),
                StatusCode::BAD_REQUEST,
            ),
            (GameError::InsufficientFunds, StatusCode::BAD_REQUEST),
            (GameError::AlreadyMember, StatusCode::BAD_REQUEST),
            (
                GameError::PermissionDenied("admin access required".into()),
                StatusCode::FORBIDDEN,
            ),
            (
                GameError::Internal("oops".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status, expected);
        }
    }
}
