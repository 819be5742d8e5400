//! Descriptor for the Backlog link property: applicability, form checks and
//! binding submitted form data into a [`ProjectLinkConfig`].

use crate::job::Job;
use crate::messages::{Locale, MessageKey};
use crate::models::ProjectLinkConfig;
use crate::validation::{ConfigValidator, FormValidation};
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Name of the form section carrying the property fields
pub const FORM_SECTION: &str = "backlog";

/// Flat field set submitted by the configuration form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyForm {
    pub url: Option<String>,
    pub user_id: Option<String>,
    pub password: Option<String>,
    pub api_key: Option<String>,
}

impl From<PropertyForm> for ProjectLinkConfig {
    fn from(form: PropertyForm) -> Self {
        ProjectLinkConfig::new(
            form.url.as_deref(),
            form.user_id.as_deref(),
            form.password.as_deref(),
            form.api_key.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectLinkDescriptor {
    validator: ConfigValidator,
    locale: Locale,
}

impl ProjectLinkDescriptor {
    pub fn new(locale: Locale) -> Self {
        Self {
            validator: ConfigValidator::new(locale),
            locale,
        }
    }

    pub fn display_name(&self) -> &'static str {
        MessageKey::PropertyDisplayName.text(self.locale)
    }

    /// The property can be attached to jobs that accept build parameters
    pub fn is_applicable(&self, job: &dyn Job) -> bool {
        job.capabilities().parameterized
    }

    pub fn check_url(&self, url: Option<&str>) -> FormValidation {
        self.validator.check_url(url)
    }

    pub fn check_user_id(&self, user_id: Option<&str>) -> FormValidation {
        self.validator.check_user_id(user_id)
    }

    /// Bind submitted form data.
    ///
    /// An empty submission yields `Ok(None)`, meaning no property is
    /// attached, which is distinct from a property with all fields empty.
    pub fn new_instance(&self, form_data: &Value) -> Result<Option<ProjectLinkConfig>> {
        let section = match form_data {
            Value::Null => return Ok(None),
            Value::Object(map) if map.is_empty() => return Ok(None),
            Value::Object(map) => map.get(FORM_SECTION).ok_or_else(|| {
                Error::Binding(format!("Missing '{}' section in form data", FORM_SECTION))
            })?,
            other => {
                return Err(Error::Binding(format!(
                    "Form data must be an object, got {}",
                    other
                )))
            }
        };

        if !section.is_object() {
            return Err(Error::Binding(format!(
                "'{}' section must be an object",
                FORM_SECTION
            )));
        }

        let form = PropertyForm::deserialize(section)
            .map_err(|e| Error::Binding(e.to_string()))?;
        let property = ProjectLinkConfig::from(form);
        debug!("Bound Backlog property with url {:?}", property.url());
        Ok(Some(property))
    }
}
