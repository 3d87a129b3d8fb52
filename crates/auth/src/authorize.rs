use thiserror::Error;

use crate::{JwtClaims, PrincipalId, Role};

/// A fully resolved principal for authorization decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub principal_id: PrincipalId,
    pub roles: Vec<Role>,
}

impl Principal {
    pub fn new(principal_id: PrincipalId, roles: Vec<Role>) -> Self {
        Self { principal_id, roles }
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }
}

impl From<&JwtClaims> for Principal {
    fn from(claims: &JwtClaims) -> Self {
        Self::new(claims.sub, claims.roles.clone())
    }
}

/// How multiple required roles combine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Logical {
    /// Every listed role is required.
    #[default]
    And,
    /// Any one of the listed roles suffices.
    Or,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing role '{0}'")]
    MissingRole(String),

    #[error("forbidden: requires one of roles {0:?}")]
    MissingAnyRole(Vec<String>),
}

/// Check that `principal` holds the `required` roles.
///
/// - No IO
/// - No panics
/// - An empty `required` list always passes
pub fn require_roles(principal: &Principal, required: &[Role], logical: Logical) -> Result<(), AuthzError> {
    if required.is_empty() {
        return Ok(());
    }

    match logical {
        Logical::And => match required.iter().find(|r| !principal.has_role(r)) {
            Some(missing) => Err(AuthzError::MissingRole(missing.as_str().to_string())),
            None => Ok(()),
        },
        Logical::Or => {
            if required.iter().any(|r| principal.has_role(r)) {
                Ok(())
            } else {
                Err(AuthzError::MissingAnyRole(
                    required.iter().map(|r| r.as_str().to_string()).collect(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(roles: &[&'static str]) -> Principal {
        Principal::new(PrincipalId::new(), roles.iter().map(|r| Role::new(*r)).collect())
    }

    #[test]
    fn admin_passes_admin_requirement() {
        assert_eq!(require_roles(&principal(&["admin"]), &[Role::ADMIN], Logical::And), Ok(()));
    }

    #[test]
    fn missing_role_is_reported() {
        let err = require_roles(&principal(&["viewer"]), &[Role::ADMIN], Logical::And).unwrap_err();
        assert_eq!(err, AuthzError::MissingRole("admin".to_string()));
        assert_eq!(err.to_string(), "forbidden: missing role 'admin'");
    }

    #[test]
    fn and_requires_every_role() {
        let required = [Role::ADMIN, Role::new("auditor")];
        assert!(require_roles(&principal(&["admin"]), &required, Logical::And).is_err());
        assert!(require_roles(&principal(&["auditor", "admin"]), &required, Logical::And).is_ok());
    }

    #[test]
    fn or_requires_any_role() {
        let required = [Role::ADMIN, Role::new("auditor")];
        assert!(require_roles(&principal(&["auditor"]), &required, Logical::Or).is_ok());
        assert!(matches!(
            require_roles(&principal(&[]), &required, Logical::Or),
            Err(AuthzError::MissingAnyRole(roles)) if roles.len() == 2
        ));
    }

    #[test]
    fn principal_from_claims_keeps_subject_and_roles() {
        let now = chrono::Utc::now();
        let claims = JwtClaims {
            sub: PrincipalId::new(),
            roles: vec![Role::ADMIN],
            issued_at: now,
            expires_at: now + chrono::Duration::minutes(5),
        };
        let principal = Principal::from(&claims);
        assert_eq!(principal.principal_id, claims.sub);
        assert!(principal.has_role(&Role::ADMIN));
    }

    #[test]
    fn no_requirement_always_passes() {
        assert!(require_roles(&principal(&[]), &[], Logical::And).is_ok());
    }
}
