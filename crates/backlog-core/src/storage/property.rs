//! Per-job link property storage
//!
//! All jobs share one `properties.json` keyed by job full name. Secrets are
//! written to the [`SecretStore`] and only their keys are kept in the file.

use super::secrets::SecretStore;
use super::write_json;
use crate::models::ProjectLinkConfig;
use crate::secret::Secret;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, warn};

const PROPERTIES_FILE: &str = "properties.json";
const SECRET_FIELDS: [&str; 2] = ["password", "api_key"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredProperty {
    pub url: Option<String>,
    pub user_id: Option<String>,
    pub password_ref: Option<String>,
    pub api_key_ref: Option<String>,
    pub saved_at: DateTime<Utc>,
}

pub struct PropertyStorage {
    data_dir: PathBuf,
    secrets: Box<dyn SecretStore>,
}

impl PropertyStorage {
    pub fn new(data_dir: PathBuf, secrets: Box<dyn SecretStore>) -> Self {
        Self { data_dir, secrets }
    }

    fn path(&self) -> PathBuf {
        self.data_dir.join(PROPERTIES_FILE)
    }

    fn read_all(&self) -> Result<BTreeMap<String, StoredProperty>> {
        let path = self.path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, records: &BTreeMap<String, StoredProperty>) -> Result<()> {
        write_json(&self.path(), records)
    }

    fn secret_key(job: &str, field: &str) -> String {
        format!("{}:{}", job, field)
    }

    fn put_secret(&self, job: &str, field: &str, secret: &Secret) -> Result<Option<String>> {
        let key = Self::secret_key(job, field);
        if secret.is_empty() {
            self.secrets.delete(&key)?;
            return Ok(None);
        }
        self.secrets.put(&key, secret)?;
        Ok(Some(key))
    }

    /// Put back secrets captured before a failed save
    fn restore_secrets(&self, previous: Vec<(String, Option<Secret>)>) {
        for (key, secret) in previous {
            let restored = match secret {
                Some(secret) => self.secrets.put(&key, &secret),
                None => self.secrets.delete(&key),
            };
            if let Err(e) = restored {
                warn!("Failed to restore secret {}: {}", key, e);
            }
        }
    }

    fn get_secret(&self, job: &str, key: Option<&str>) -> Result<Secret> {
        let Some(key) = key else {
            return Ok(Secret::empty());
        };
        match self.secrets.get(key)? {
            Some(secret) => Ok(secret),
            None => {
                warn!("Secret {} for job {} is missing from the secret store", key, job);
                Ok(Secret::empty())
            }
        }
    }

    /// Save the property of a job, replacing the previous one. `None`
    /// removes it.
    ///
    /// Secrets are only touched once the existing records have been read,
    /// and are restored if the save fails afterwards.
    pub fn save(&self, job: &str, property: Option<&ProjectLinkConfig>) -> Result<()> {
        let Some(property) = property else {
            return self.remove(job);
        };

        let mut records = self.read_all()?;

        let mut previous = Vec::new();
        for field in SECRET_FIELDS {
            let key = Self::secret_key(job, field);
            let secret = self.secrets.get(&key)?;
            previous.push((key, secret));
        }

        let result = self.write_record(job, property, &mut records);
        if result.is_err() {
            self.restore_secrets(previous);
        }
        result
    }

    fn write_record(
        &self,
        job: &str,
        property: &ProjectLinkConfig,
        records: &mut BTreeMap<String, StoredProperty>,
    ) -> Result<()> {
        let record = StoredProperty {
            url: property.url().map(str::to_string),
            user_id: property.user_id().map(str::to_string),
            password_ref: self.put_secret(job, "password", property.password())?,
            api_key_ref: self.put_secret(job, "api_key", property.api_key())?,
            saved_at: Utc::now(),
        };

        records.insert(job.to_string(), record);
        self.write_all(records)?;
        debug!("Saved Backlog property for job {}", job);
        Ok(())
    }

    pub fn load(&self, job: &str) -> Result<Option<ProjectLinkConfig>> {
        let records = self.read_all()?;
        let Some(record) = records.get(job) else {
            return Ok(None);
        };

        let password = self.get_secret(job, record.password_ref.as_deref())?;
        let api_key = self.get_secret(job, record.api_key_ref.as_deref())?;
        Ok(Some(ProjectLinkConfig::with_secrets(
            record.url.as_deref(),
            record.user_id.as_deref(),
            password,
            api_key,
        )))
    }

    /// Remove the property of a job together with its secrets
    pub fn remove(&self, job: &str) -> Result<()> {
        let mut records = self.read_all()?;
        if let Some(record) = records.remove(job) {
            self.write_all(&records)?;
            for key in [record.password_ref, record.api_key_ref].into_iter().flatten() {
                self.secrets.delete(&key)?;
            }
            debug!("Removed Backlog property for job {}", job);
        }
        Ok(())
    }

    /// Names of all jobs with a stored property
    pub fn list(&self) -> Result<Vec<String>> {
        Ok(self.read_all()?.into_keys().collect())
    }
}
