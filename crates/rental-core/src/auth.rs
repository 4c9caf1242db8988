//! # Authorization Rules
//!
//! Roles, capabilities and the authorization decision.
//!
//! ## Capability Matrix
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Action                      Capability         customer employee mgr  │
//! │  ──────────────────────────  ─────────────────  ──────── ──────── ───  │
//! │  View / edit own profile     SelfOnly              ✅       ✅     ✅  │
//! │  Browse catalog, order       SelfOnly              ✅       ✅     ✅  │
//! │  Update tracking             EmployeeOrAbove       ❌       ✅     ✅  │
//! │  Update / add catalog        ManagerOnly           ❌       ❌     ✅  │
//! │  Update another user         ManagerOnly           ❌       ❌     ✅  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The decision is fail-closed: when the role lookup returns nothing the
//! caller gets [`CoreError::UnknownLogin`], never a default role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Role
// =============================================================================

/// The three account roles, lowest privilege first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Employee,
    Manager,
}

impl Role {
    /// All roles, in privilege order.
    pub const ALL: [Role; 3] = [Role::Customer, Role::Employee, Role::Manager];

    /// The value stored in the `users.role` column.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Employee => "employee",
            Role::Manager => "manager",
        }
    }

    /// Employees and managers.
    pub const fn is_staff(&self) -> bool {
        matches!(self, Role::Employee | Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a role case-insensitively, ignoring surrounding whitespace.
impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            _ => Err(CoreError::InvalidRole(s.to_string())),
        }
    }
}

/// Column decoding for the text `users.role` column.
impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Capability
// =============================================================================

/// The minimum role class an action requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Any existing account, acting on its own records.
    SelfOnly,
    /// Employees and managers.
    EmployeeOrAbove,
    /// Managers only.
    ManagerOnly,
}

impl Capability {
    /// Whether `role` satisfies this capability.
    pub const fn permits(&self, role: Role) -> bool {
        match self {
            Capability::SelfOnly => true,
            Capability::EmployeeOrAbove => role.is_staff(),
            Capability::ManagerOnly => matches!(role, Role::Manager),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::SelfOnly => f.write_str("an existing account"),
            Capability::EmployeeOrAbove => f.write_str("employee role"),
            Capability::ManagerOnly => f.write_str("manager role"),
        }
    }
}

// =============================================================================
// Decisions
// =============================================================================

/// Decides whether `login`, whose looked-up role is `role`, may perform an
/// action requiring `required`.
///
/// ## Fail-Closed
/// ```text
/// role lookup ──► None ───────────────► Err(UnknownLogin)
///            └──► Some(r) ─► permits? ─► Ok(r)
///                                   └──► Err(Unauthorized)
/// ```
///
/// ## Example
/// ```rust
/// use rental_core::auth::{authorize, Capability, Role};
///
/// assert!(authorize("boss", Some(Role::Manager), Capability::ManagerOnly).is_ok());
/// assert!(authorize("clerk", Some(Role::Employee), Capability::ManagerOnly).is_err());
/// assert!(authorize("ghost", None, Capability::SelfOnly).is_err());
/// ```
pub fn authorize(login: &str, role: Option<Role>, required: Capability) -> CoreResult<Role> {
    let role = role.ok_or_else(|| CoreError::UnknownLogin(login.to_string()))?;

    if required.permits(role) {
        Ok(role)
    } else {
        Err(CoreError::Unauthorized {
            login: login.to_string(),
            role,
            required,
        })
    }
}

/// Resolves whose order history `actor` is reading.
///
/// An empty or missing `requested` login means the actor's own history.
/// Naming someone else requires the manager role.
pub fn history_target(actor: &str, role: Role, requested: Option<&str>) -> CoreResult<String> {
    let requested = requested.map(str::trim).filter(|s| !s.is_empty());

    match requested {
        None => Ok(actor.to_string()),
        Some(other) if other == actor => Ok(actor.to_string()),
        Some(other) if role == Role::Manager => Ok(other.to_string()),
        Some(_) => Err(CoreError::Unauthorized {
            login: actor.to_string(),
            role,
            required: Capability::ManagerOnly,
        }),
    }
}

/// Checks that `actor` may read an order owned by `owner`.
///
/// Staff may read any order (they need it to maintain tracking records).
pub fn may_view_order(actor: &str, role: Role, owner: &str) -> CoreResult<()> {
    if role.is_staff() || actor == owner {
        Ok(())
    } else {
        Err(CoreError::Unauthorized {
            login: actor.to_string(),
            role,
            required: Capability::EmployeeOrAbove,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!("  Employee ".parse::<Role>().unwrap(), Role::Employee);
        assert_eq!("CUSTOMER".parse::<Role>().unwrap(), Role::Customer);
        assert!(matches!(
            "admin".parse::<Role>(),
            Err(CoreError::InvalidRole(_))
        ));
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_capability_matrix() {
        for role in Role::ALL {
            assert!(Capability::SelfOnly.permits(role));
        }
        assert!(!Capability::EmployeeOrAbove.permits(Role::Customer));
        assert!(Capability::EmployeeOrAbove.permits(Role::Employee));
        assert!(Capability::EmployeeOrAbove.permits(Role::Manager));
        assert!(!Capability::ManagerOnly.permits(Role::Customer));
        assert!(!Capability::ManagerOnly.permits(Role::Employee));
        assert!(Capability::ManagerOnly.permits(Role::Manager));
    }

    #[test]
    fn test_authorize_fails_closed_on_missing_role() {
        for capability in [
            Capability::SelfOnly,
            Capability::EmployeeOrAbove,
            Capability::ManagerOnly,
        ] {
            let err = authorize("ghost", None, capability).unwrap_err();
            assert!(matches!(err, CoreError::UnknownLogin(ref l) if l == "ghost"));
        }
    }

    #[test]
    fn test_non_manager_rejected_for_manager_actions() {
        for role in [Role::Customer, Role::Employee] {
            let err = authorize("someone", Some(role), Capability::ManagerOnly).unwrap_err();
            assert!(matches!(err, CoreError::Unauthorized { .. }));
        }
        assert_eq!(
            authorize("boss", Some(Role::Manager), Capability::ManagerOnly).unwrap(),
            Role::Manager
        );
    }

    #[test]
    fn test_history_target() {
        assert_eq!(history_target("amy", Role::Customer, None).unwrap(), "amy");
        assert_eq!(history_target("amy", Role::Customer, Some("  ")).unwrap(), "amy");
        assert_eq!(history_target("amy", Role::Customer, Some("amy")).unwrap(), "amy");
        assert!(history_target("amy", Role::Customer, Some("bob")).is_err());
        assert!(history_target("eve", Role::Employee, Some("bob")).is_err());
        assert_eq!(
            history_target("boss", Role::Manager, Some("bob")).unwrap(),
            "bob"
        );
    }

    #[test]
    fn test_may_view_order() {
        assert!(may_view_order("amy", Role::Customer, "amy").is_ok());
        assert!(may_view_order("amy", Role::Customer, "bob").is_err());
        assert!(may_view_order("eve", Role::Employee, "bob").is_ok());
        assert!(may_view_order("boss", Role::Manager, "bob").is_ok());
    }
}
