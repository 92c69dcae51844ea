use tourdesk_auth::Principal;

/// Authenticated caller for a request, inserted by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn subject(&self) -> &str {
        &self.principal.subject
    }
}
