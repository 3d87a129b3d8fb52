use axum::{Extension, http::StatusCode, response::Response};
use serde_json::json;

use quickadmin_core::SystemMessage;

use crate::app::envelope::envelope;
use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> Response {
    envelope(&SystemMessage::success(json!({
        "principal_id": principal.principal_id().to_string(),
        "roles": principal.roles().iter().map(|r| r.as_str()).collect::<Vec<_>>(),
    })))
}
