//! Authenticated principals
//!
//! The core never authenticates anyone; the excluded API layer supplies
//! an already-authenticated principal with every request. Capabilities
//! are modeled as data (a role enumeration checked by the engines), not
//! as polymorphic dispatch.

use serde::{Deserialize, Serialize};

/// User identifier
pub type UserId = u64;

/// Role of an authenticated principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular card owner
    User,

    /// Administrative principal
    Admin,
}

/// The authenticated actor issuing a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// The user ID
    pub id: UserId,

    /// The role carried by the authentication layer
    pub role: Role,
}

impl Principal {
    /// A principal with the USER role
    pub fn user(id: UserId) -> Self {
        Principal {
            id,
            role: Role::User,
        }
    }

    /// A principal with the ADMIN role
    pub fn admin(id: UserId) -> Self {
        Principal {
            id,
            role: Role::Admin,
        }
    }

    /// Whether this principal carries administrative authority
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_checks() {
        assert!(Principal::admin(1).is_admin());
        assert!(!Principal::user(1).is_admin());
    }
}
