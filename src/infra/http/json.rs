use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::infra::config::Mode;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub error: String,
}

/// Build an error response for a handler. Debug mode logs the error and
/// returns it as JSON; release mode returns the bare status.
pub fn error_response(mode: Mode, code: StatusCode, message: impl Into<String>) -> Response {
    match mode {
        Mode::Debug => {
            let body = ErrorBody {
                code: code.as_u16().to_string(),
                error: message.into(),
            };
            tracing::info!(code = %body.code, error = %body.error, "error response");
            (code, Json(body)).into_response()
        }
        Mode::Release => code.into_response(),
    }
}
