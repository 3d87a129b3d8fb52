use axum::{Router, routing::get};

pub mod system;
pub mod user_manage;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/userManage", user_manage::router())
}
