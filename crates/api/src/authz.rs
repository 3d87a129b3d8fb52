//! API-side role guard.
//!
//! Endpoints declare the roles they need; the check runs before the handler
//! body (see [`crate::middleware::role_guard`]).

use quickadmin_auth::{AuthzError, Logical, Role};

use crate::context::PrincipalContext;

/// Check the request principal against the required roles.
pub fn require_roles(
    principal: &PrincipalContext,
    required: &[Role],
    logical: Logical,
) -> Result<(), AuthzError> {
    quickadmin_auth::require_roles(&principal.to_principal(), required, logical)
}
