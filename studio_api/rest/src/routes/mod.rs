use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiFailure;

pub mod contact;

/// Logs the error server-side and returns the given user-facing message; no
/// internal detail leaks into the response.
pub fn internal_server_error(err: impl Into<anyhow::Error>, message: &'static str) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

fn error(code: StatusCode, message: impl Into<String>) -> Response {
    (
        code,
        Json(ApiFailure {
            success: false,
            message: message.into(),
        }),
    )
        .into_response()
}
