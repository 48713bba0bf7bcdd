//! Credential store.
//!
//! A fixed mapping from username to password, loaded once at startup from a
//! JSON object file:
//!
//! ```json
//! { "guest": "correct horse battery staple" }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use subtle::ConstantTimeEq;

use crate::error::CredentialError;

/// Read-only username to password mapping.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    users: Arc<HashMap<String, String>>,
}

impl CredentialStore {
    /// Create a store from an in-memory mapping.
    pub fn new(users: HashMap<String, String>) -> Self {
        Self {
            users: Arc::new(users),
        }
    }

    /// Load the store from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, is not a JSON object of strings,
    /// or defines no users.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CredentialError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CredentialError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let users: HashMap<String, String> =
            serde_json::from_str(&contents).map_err(|e| CredentialError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if users.is_empty() {
            return Err(CredentialError::Empty(path.to_path_buf()));
        }

        Ok(Self::new(users))
    }

    /// Check a username/password pair.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        match self.users.get(username) {
            Some(expected) => expected.as_bytes().ct_eq(password.as_bytes()).into(),
            None => false,
        }
    }

    /// Number of configured users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users are configured.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
