use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use backend_application::AppError;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    MethodNotAllowed,
    Internal(String),
}

impl HttpError {
    /// Maps an application error, replacing internal detail with `generic`.
    pub fn from_app(err: AppError, generic: &str) -> Self {
        match err {
            AppError::BadRequest(msg) => HttpError::BadRequest(msg),
            AppError::Internal(err) => {
                error!("{}: {:#}", generic, err);
                HttpError::Internal(generic.to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
            }
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
