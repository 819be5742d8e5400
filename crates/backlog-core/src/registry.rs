//! Named extension registry
//!
//! Hosts look up the property descriptor and action factories here instead
//! of discovering them at runtime.

use crate::action::{LinkAction, LinkActionFactory};
use crate::descriptor::ProjectLinkDescriptor;
use crate::job::Job;
use crate::messages::Locale;
use crate::{Error, Result};
use std::collections::BTreeMap;

pub const DEFAULT_EXTENSION_NAME: &str = "backlog";

#[derive(Debug, Clone)]
pub enum Extension {
    JobProperty(ProjectLinkDescriptor),
    ActionFactory(LinkActionFactory),
}

#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    properties: BTreeMap<String, ProjectLinkDescriptor>,
    factories: BTreeMap<String, LinkActionFactory>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the Backlog property and action factory installed
    pub fn with_defaults(locale: Locale) -> Self {
        let mut registry = Self::new();
        registry.properties.insert(
            DEFAULT_EXTENSION_NAME.to_string(),
            ProjectLinkDescriptor::new(locale),
        );
        registry
            .factories
            .insert(DEFAULT_EXTENSION_NAME.to_string(), LinkActionFactory::new());
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, extension: Extension) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::Validation(
                "Extension name cannot be empty".to_string(),
            ));
        }

        let taken = match extension {
            Extension::JobProperty(_) => self.properties.contains_key(&name),
            Extension::ActionFactory(_) => self.factories.contains_key(&name),
        };
        if taken {
            return Err(Error::Validation(format!(
                "Extension '{}' is already registered",
                name
            )));
        }

        match extension {
            Extension::JobProperty(descriptor) => {
                self.properties.insert(name, descriptor);
            }
            Extension::ActionFactory(factory) => {
                self.factories.insert(name, factory);
            }
        }
        Ok(())
    }

    pub fn descriptor(&self, name: &str) -> Option<&ProjectLinkDescriptor> {
        self.properties.get(name)
    }

    pub fn factories(&self) -> impl Iterator<Item = &LinkActionFactory> {
        self.factories.values()
    }

    /// Actions to render on the job page.
    ///
    /// Jobs covered by a registered factory get the factory's actions; other
    /// jobs get the action of their attached property, if any.
    pub fn actions_for(&self, job: &dyn Job) -> Vec<LinkAction> {
        let factories: Vec<_> = self.factories().filter(|f| f.applies_to(job)).collect();
        if !factories.is_empty() {
            return factories.iter().flat_map(|f| f.create_for(job)).collect();
        }

        job.link_property()
            .map(|property| vec![property.job_action()])
            .unwrap_or_default()
    }
}
