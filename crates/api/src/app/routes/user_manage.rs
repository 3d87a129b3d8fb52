use std::sync::Arc;

use axum::{Extension, Form, Router, response::Response, routing::get};
use chrono::Utc;

use quickadmin_core::SystemMessage;

use crate::app::dto::UserForm;
use crate::app::envelope::envelope;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;
use crate::middleware::{RoleGuard, role_guard};

pub const INSERT_SUCCEEDED: &str = "用户添加成功";
pub const INSERT_FAILED: &str = "用户添加失败!";

/// User administration; every route requires the `admin` role.
pub fn router() -> Router {
    Router::new()
        .route("/insert", get(insert).post(insert))
        .route_layer(axum::middleware::from_fn_with_state(
            RoleGuard::admin(),
            role_guard,
        ))
}

/// Create an account from form fields (query string or urlencoded body).
pub async fn insert(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Form(form): Form<UserForm>,
) -> Response {
    let mut user = form.into_user();
    user.stamp_created(Utc::now());

    let affected = services.users().insert(&user);
    tracing::info!(
        principal_id = %principal.principal_id(),
        user_id = %user.id,
        username = %user.username,
        affected,
        "user insert"
    );

    envelope(&SystemMessage::<()>::from_affected(
        affected,
        INSERT_SUCCEEDED,
        INSERT_FAILED,
    ))
}
