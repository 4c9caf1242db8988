//! Authorization guard.
//!
//! Every handler calls [`authorize`] before it reads input or touches the
//! database. The role is looked up fresh each time, so a role change by a
//! manager applies from the next action on.
//!
//! ```text
//! handler ──► guard::authorize(db, session, capability)
//!                 │
//!                 ├── users.role_of(login)      None ──► NotFound
//!                 │                             bad  ──► DatabaseError
//!                 └── Capability::permits(role) no   ──► Unauthorized
//! ```

use rental_core::{Capability, Role};
use rental_db::Database;
use tracing::{debug, warn};

use crate::error::ApiError;

/// A logged-in console session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub login: String,
}

impl Session {
    pub fn new(login: impl Into<String>) -> Self {
        Session {
            login: login.into(),
        }
    }
}

/// Looks up the session's role and checks it against `required`.
pub async fn authorize(
    db: &Database,
    session: &Session,
    required: Capability,
) -> Result<Role, ApiError> {
    let role = db.users().role_of(&session.login).await?;

    match rental_core::authorize(&session.login, role, required) {
        Ok(role) => {
            debug!(login = %session.login, %role, %required, "Authorized");
            Ok(role)
        }
        Err(e) => {
            warn!(login = %session.login, %required, error = %e, "Authorization rejected");
            Err(e.into())
        }
    }
}
