//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared service handles
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs
//! - `envelope.rs`: `SystemMessage` responses
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::middleware;

pub mod dto;
pub mod envelope;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router with in-memory services (used by `main.rs`).
pub fn build_app(jwt_secret: &str) -> Router {
    build_app_with(jwt_secret, services::AppServices::in_memory())
}

/// Build the router around caller-supplied services.
pub fn build_app_with(jwt_secret: &str, services: services::AppServices) -> Router {
    let jwt = Arc::new(quickadmin_auth::Hs256JwtValidator::new(jwt_secret));
    let auth_state = middleware::AuthState { jwt };

    // Protected routes: require a valid bearer token.
    let protected = routes::router()
        .layer(Extension(Arc::new(services)))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
