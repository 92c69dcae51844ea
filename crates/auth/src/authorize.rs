use serde::Serialize;
use thiserror::Error;

use crate::{IdentityClaims, Role};

/// An authenticated caller, derived from verified claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub subject: String,
    pub email: Option<String>,
    pub roles: Vec<Role>,
}

impl From<IdentityClaims> for Principal {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            subject: claims.sub,
            email: claims.email,
            roles: claims.roles,
        }
    }
}

impl Principal {
    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing role '{0}'")]
    MissingRole(String),
}

/// Require `role` on `principal`. No IO, no panics.
pub fn require_role(principal: &Principal, role: &Role) -> Result<(), AuthzError> {
    if principal.has_role(role) {
        Ok(())
    } else {
        Err(AuthzError::MissingRole(role.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(roles: &[&'static str]) -> Principal {
        Principal {
            subject: "user_1".to_string(),
            email: None,
            roles: roles.iter().map(|r| Role::new(*r)).collect(),
        }
    }

    #[test]
    fn admin_passes_admin_check() {
        assert_eq!(require_role(&principal(&["customer", "admin"]), &Role::ADMIN), Ok(()));
    }

    #[test]
    fn customer_is_forbidden() {
        assert_eq!(
            require_role(&principal(&["customer"]), &Role::ADMIN),
            Err(AuthzError::MissingRole("admin".to_string()))
        );
    }

    #[test]
    fn no_roles_is_forbidden() {
        assert!(require_role(&principal(&[]), &Role::ADMIN).is_err());
    }
}
