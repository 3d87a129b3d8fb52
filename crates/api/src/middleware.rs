use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use quickadmin_auth::{JwtValidator, Logical, Principal, Role};

use crate::app::errors::json_error;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())?;

    let claims = state.jwt.validate(token, Utc::now()).map_err(|e| {
        tracing::debug!(error = %e, "rejecting bearer token");
        StatusCode::UNAUTHORIZED
    })?;

    req.extensions_mut()
        .insert(PrincipalContext::from(Principal::from(&claims)));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}

/// Roles a group of routes requires.
///
/// Attach with `route_layer` so the check runs before any extractor reads the
/// request body.
#[derive(Clone)]
pub struct RoleGuard {
    pub required: Arc<[Role]>,
    pub logical: Logical,
}

impl RoleGuard {
    pub fn new(required: impl Into<Arc<[Role]>>, logical: Logical) -> Self {
        Self {
            required: required.into(),
            logical,
        }
    }

    pub fn admin() -> Self {
        Self::new(vec![Role::ADMIN], Logical::And)
    }
}

pub async fn role_guard(State(guard): State<RoleGuard>, req: Request, next: Next) -> Response {
    let Some(principal) = req.extensions().get::<PrincipalContext>() else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    if let Err(e) = crate::authz::require_roles(principal, &guard.required, guard.logical) {
        tracing::info!(
            principal_id = %principal.principal_id(),
            error = %e,
            "access denied"
        );
        return json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    next.run(req).await
}
