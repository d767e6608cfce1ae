//! Authorization primitives for the HR API.
//!
//! Roles form a strict hierarchy `ROLE_ADMIN > ROLE_MANAGER > ROLE_EMPLOYEE`;
//! holding a role grants every role below it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum AuthzError {
    #[error("access denied for {subject}: requires {policy}")]
    Denied { subject: String, policy: String },
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_EMPLOYEE")]
    Employee,
    #[serde(rename = "ROLE_MANAGER")]
    Manager,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Employee, Role::Manager, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Employee => "ROLE_EMPLOYEE",
            Role::Manager => "ROLE_MANAGER",
            Role::Admin => "ROLE_ADMIN",
        }
    }

    /// Accepts `ROLE_ADMIN` or `ADMIN`, case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        let upper = value.trim().to_ascii_uppercase();
        let bare = upper.strip_prefix("ROLE_").unwrap_or(&upper);
        match bare {
            "EMPLOYEE" => Some(Role::Employee),
            "MANAGER" => Some(Role::Manager),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Role::Admin => 3,
            Role::Manager => 2,
            Role::Employee => 1,
        }
    }

    /// True when this role includes `other` through the hierarchy.
    pub fn implies(self, other: Role) -> bool {
        self.level() >= other.level()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Principal {
    pub user_id: String,
    pub roles: Vec<Role>,
}

impl Principal {
    pub fn new(user_id: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            user_id: user_id.into(),
            roles,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|held| held.implies(role))
    }

    pub fn highest_role(&self) -> Option<Role> {
        self.roles.iter().copied().max_by_key(|role| role.level())
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_admin_or_manager(&self) -> bool {
        self.has_role(Role::Manager)
    }

    pub fn is_self(&self, employee_id: &str) -> bool {
        self.user_id == employee_id
    }

    pub fn is_admin_or_manager_or_self(&self, employee_id: &str) -> bool {
        self.is_admin_or_manager() || self.is_self(employee_id)
    }
}

/// Endpoint-level access rule.
#[derive(Debug, Clone, Copy)]
pub enum Policy<'a> {
    Admin,
    AdminOrManager,
    AdminOrManagerOrSelf(&'a str),
}

impl Policy<'_> {
    fn name(&self) -> &'static str {
        match self {
            Policy::Admin => "admin",
            Policy::AdminOrManager => "admin or manager",
            Policy::AdminOrManagerOrSelf(_) => "admin, manager or self",
        }
    }

    pub fn allows(&self, principal: &Principal) -> bool {
        match self {
            Policy::Admin => principal.is_admin(),
            Policy::AdminOrManager => principal.is_admin_or_manager(),
            Policy::AdminOrManagerOrSelf(employee_id) => {
                principal.is_admin_or_manager_or_self(employee_id)
            }
        }
    }

    pub fn check(&self, principal: &Principal) -> Result<(), AuthzError> {
        if self.allows(principal) {
            return Ok(());
        }
        tracing::warn!(
            user_id = %principal.user_id,
            roles = ?principal.roles,
            policy = self.name(),
            "access denied"
        );
        Err(AuthzError::Denied {
            subject: principal.user_id.clone(),
            policy: self.name().to_string(),
        })
    }
}
