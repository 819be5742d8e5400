//! Secret-at-rest storage
//!
//! Stored properties only carry a reference to each secret; the value itself
//! lives in a [`SecretStore`], normally the OS keyring.

use crate::secret::Secret;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::RwLock;

pub trait SecretStore: Send + Sync {
    fn put(&self, key: &str, secret: &Secret) -> Result<()>;

    fn get(&self, key: &str) -> Result<Option<Secret>>;

    /// Delete a secret. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}

/// Secret store backed by the OS keyring
pub struct KeyringSecretStore {
    service: String,
}

impl KeyringSecretStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        Ok(keyring::Entry::new(&self.service, key)?)
    }
}

impl SecretStore for KeyringSecretStore {
    /// Store a secret and read it back through a fresh entry, so a backend
    /// that does not persist is reported instead of losing the value.
    fn put(&self, key: &str, secret: &Secret) -> Result<()> {
        self.entry(key)?.set_password(secret.reveal())?;

        match self.get(key)? {
            Some(stored) if stored == *secret => Ok(()),
            _ => Err(Error::Storage(format!(
                "Keyring service '{}' did not persist secret {}",
                self.service, key
            ))),
        }
    }

    fn get(&self, key: &str) -> Result<Option<Secret>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(Secret::new(value))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process secret store, for hosts without a keyring and for tests
#[derive(Default)]
pub struct MemorySecretStore {
    secrets: RwLock<HashMap<String, Secret>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.secrets.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> Error {
    Error::Storage("Secret store lock poisoned".to_string())
}

impl SecretStore for MemorySecretStore {
    fn put(&self, key: &str, secret: &Secret) -> Result<()> {
        let mut secrets = self.secrets.write().map_err(|_| poisoned())?;
        secrets.insert(key.to_string(), secret.clone());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Secret>> {
        let secrets = self.secrets.read().map_err(|_| poisoned())?;
        Ok(secrets.get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut secrets = self.secrets.write().map_err(|_| poisoned())?;
        secrets.remove(key);
        Ok(())
    }
}
