//! Rendering of [`SystemMessage`] envelopes as HTTP responses.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use quickadmin_core::SystemMessage;

use crate::app::errors::json_error;

/// `200 OK` with the envelope encoded under the process-wide JSON options.
///
/// Business failures travel inside the envelope (`status < 0`), not in the
/// HTTP status.
pub fn envelope<T: Serialize>(message: &SystemMessage<T>) -> Response {
    match message.to_json() {
        Some(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        None => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "serialization_error",
            "response could not be encoded",
        ),
    }
}
