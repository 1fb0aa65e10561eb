use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::database::ports::RoleRepository;
use crate::providers::{AuthGateway, AuthUser};

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// No token, or the auth service did not accept it.
    Unauthenticated,
    /// Signed in without the admin role.
    Forbidden(AuthUser),
    Admin(AuthUser),
}

/// Admin check: a live session plus a `user_roles` row saying `admin`.
#[derive(Clone)]
pub struct AccessGate {
    auth: Arc<dyn AuthGateway>,
    roles: Arc<dyn RoleRepository>,
}

impl fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGate").finish_non_exhaustive()
    }
}

impl AccessGate {
    pub fn new(auth: Arc<dyn AuthGateway>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { auth, roles }
    }

    pub fn auth(&self) -> &Arc<dyn AuthGateway> {
        &self.auth
    }

    /// Resolves `token` to a user. Auth service errors count as signed out.
    pub async fn current_user(&self, token: Option<&str>) -> Option<AuthUser> {
        let token = token.filter(|token| !token.is_empty())?;
        match self.auth.user_for_token(token).await {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "session lookup failed");
                None
            }
        }
    }

    pub async fn check(&self, token: Option<&str>) -> AccessDecision {
        let Some(user) = self.current_user(token).await else {
            return AccessDecision::Unauthenticated;
        };

        match self.roles.role_for(user.id).await {
            Ok(Some(role)) if role == ADMIN_ROLE => AccessDecision::Admin(user),
            Ok(role) => {
                debug!(user_id = %user.id, ?role, "non-admin session refused");
                AccessDecision::Forbidden(user)
            }
            Err(err) => {
                warn!(user_id = %user.id, error = %err, "role lookup failed");
                AccessDecision::Forbidden(user)
            }
        }
    }
}
