//! # Credentials
//!
//! Password digests and account lookup.
//!
//! Passwords are stored as a single unsalted SHA-256 digest, hex-encoded.
//! This is the format the existing `users.csv` files use; it is not meant to
//! resist an attacker who can read the file.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::Role;

/// Accounts written to a fresh credential file: (username, password, role).
const DEFAULT_ACCOUNTS: [(&str, &str, Role); 2] = [
    ("admin", "Samayaye67", Role::Admin),
    ("user", "Wksdfuser0525", Role::User),
];

/// One row of the credential file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,

    /// Lowercase hex SHA-256 of the password.
    #[serde(rename = "password")]
    pub password_hash: String,

    pub role: Role,
}

impl Credential {
    /// Builds a credential from a clear-text password.
    pub fn new(username: impl Into<String>, password: &str, role: Role) -> Self {
        Credential {
            username: username.into(),
            password_hash: hash_password(password),
            role,
        }
    }

    pub fn verify(&self, password: &str) -> bool {
        self.password_hash == hash_password(password)
    }
}

/// Hex-encoded SHA-256 digest of `password`.
///
/// ```rust
/// use stockbook_core::credential::hash_password;
///
/// assert_eq!(
///     hash_password("abc"),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// The two accounts a new installation starts with.
pub fn default_credentials() -> Vec<Credential> {
    DEFAULT_ACCOUNTS
        .iter()
        .map(|(username, password, role)| Credential::new(*username, password, *role))
        .collect()
}

/// Returns the role of the first account named `username` if `password`
/// matches its digest.
///
/// Unknown users and wrong passwords are indistinguishable to the caller.
pub fn authenticate(credentials: &[Credential], username: &str, password: &str) -> Option<Role> {
    credentials
        .iter()
        .find(|c| c.username == username)
        .filter(|c| c.verify(password))
        .map(|c| c.role)
}
