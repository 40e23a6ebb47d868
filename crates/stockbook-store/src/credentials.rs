//! # Credential Store
//!
//! The `users.csv` file: `username,password,role`, one account per line,
//! `password` holding the hex SHA-256 digest.
//!
//! ```text
//! open(path)
//!    │
//!    ├── file exists? ──► read rows
//!    │
//!    └── missing ───────► write the two default accounts, then use them
//! ```

use std::path::{Path, PathBuf};

use stockbook_core::credential::{self, default_credentials, Credential};
use stockbook_core::Role;
use tracing::{debug, info, warn};

use crate::atomic;
use crate::error::{StoreError, StoreResult};

#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    credentials: Vec<Credential>,
}

impl CredentialStore {
    /// Opens the credential file, seeding it with the default accounts if
    /// it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let credentials = if path.exists() {
            read(&path)?
        } else {
            let seeded = default_credentials();
            write(&path, &seeded)?;
            info!(path = %path.display(), accounts = seeded.len(), "Credential file created");
            seeded
        };

        debug!(path = %path.display(), accounts = credentials.len(), "Credentials loaded");
        Ok(CredentialStore { path, credentials })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn credentials(&self) -> &[Credential] {
        &self.credentials
    }

    /// Role of the account if the password matches, `None` otherwise.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<Role> {
        let role = credential::authenticate(&self.credentials, username, password);
        match role {
            Some(role) => info!(username, %role, "Login succeeded"),
            None => warn!(username, "Login failed"),
        }
        role
    }
}

fn read(path: &Path) -> StoreResult<Vec<Credential>> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader.deserialize().collect::<Result<Vec<Credential>, _>>()?;
    Ok(rows)
}

fn write(path: &Path, credentials: &[Credential]) -> StoreResult<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for cred in credentials {
        writer.serialize(cred)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::io(path, e.into_error()))?;
    atomic::write_file(path, &bytes)
}
