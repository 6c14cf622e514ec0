use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::UserInfoError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorResponseBody {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        };

        let body = ErrorResponseBody {
            error: ErrorBody {
                code,
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<UserInfoError> for AppError {
    fn from(err: UserInfoError) -> Self {
        match err {
            // Client sent something syntactically unacceptable.
            UserInfoError::MalformedAuthorizationHeader
            | UserInfoError::UnsupportedContentType(_)
            | UserInfoError::BodyRead(_) => AppError::InvalidRequest(err.to_string()),

            // Credentials were supplied but don't resolve to anything.
            UserInfoError::UnknownToken => AppError::Unauthorized,

            // Our problem (or the validation service's), not the client's.
            UserInfoError::ValidationService(_) => AppError::Internal,
        }
    }
}
