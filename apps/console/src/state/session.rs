//! # Session
//!
//! The authenticated operator for the lifetime of one invocation.
//!
//! ```text
//! --user / --password ──► CredentialStore::authenticate ──► Session { username, role }
//!                                   │
//!                                   └── no match ──► AUTHENTICATION_FAILED
//! ```

use serde::Serialize;
use stockbook_core::Role;
use stockbook_store::CredentialStore;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

impl Session {
    /// Authenticates against the credential file.
    ///
    /// Missing credentials, unknown users and wrong passwords all produce the
    /// same error.
    pub fn login(
        users: &CredentialStore,
        username: Option<&str>,
        password: Option<&str>,
    ) -> ApiResult<Session> {
        let (Some(username), Some(password)) = (username, password) else {
            return Err(ApiError::authentication_failed());
        };

        users
            .authenticate(username, password)
            .map(|role| Session {
                username: username.to_string(),
                role,
            })
            .ok_or_else(ApiError::authentication_failed)
    }

    /// Fails with `ACCESS_DENIED` unless the operator is an administrator.
    pub fn require_admin(&self, action: &str) -> ApiResult<()> {
        if self.role.is_admin() {
            Ok(())
        } else {
            tracing::warn!(username = %self.username, action, "Admin action refused");
            Err(ApiError::access_denied(action))
        }
    }
}
