//! Host job model
//!
//! The core only needs to ask a job for its attached link property and for
//! what kind of container it lives in. [`JobRecord`] is a plain in-memory
//! job for hosts that have no job model of their own.

use crate::models::ProjectLinkConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentKind {
    #[default]
    Root,
    Folder,
    /// One branch among many sharing a multi-branch configuration
    MultiBranch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    #[default]
    Freestyle,
    Pipeline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCapabilities {
    pub buildable: bool,
    pub parameterized: bool,
}

impl Default for JobCapabilities {
    fn default() -> Self {
        Self {
            buildable: true,
            parameterized: true,
        }
    }
}

pub trait Job {
    fn full_name(&self) -> &str;

    fn kind(&self) -> JobKind;

    fn parent_kind(&self) -> ParentKind;

    fn capabilities(&self) -> JobCapabilities;

    fn link_property(&self) -> Option<&ProjectLinkConfig>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub full_name: String,
    pub kind: JobKind,
    pub parent: ParentKind,
    pub capabilities: JobCapabilities,
    property: Option<ProjectLinkConfig>,
}

impl JobRecord {
    /// Create a new top-level job with default capabilities
    pub fn new(full_name: impl Into<String>, kind: JobKind) -> Self {
        Self {
            full_name: full_name.into(),
            kind,
            parent: ParentKind::Root,
            capabilities: JobCapabilities::default(),
            property: None,
        }
    }

    pub fn with_parent(mut self, parent: ParentKind) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_capabilities(mut self, capabilities: JobCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Attach a link property, replacing any previous one. `None` detaches.
    pub fn attach(&mut self, property: Option<ProjectLinkConfig>) {
        self.property = property;
    }
}

impl Job for JobRecord {
    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn kind(&self) -> JobKind {
        self.kind
    }

    fn parent_kind(&self) -> ParentKind {
        self.parent
    }

    fn capabilities(&self) -> JobCapabilities {
        self.capabilities
    }

    fn link_property(&self) -> Option<&ProjectLinkConfig> {
        self.property.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job() {
        let job = JobRecord::new("team/app", JobKind::Pipeline);
        assert_eq!(job.full_name(), "team/app");
        assert_eq!(job.kind(), JobKind::Pipeline);
        assert_eq!(job.parent_kind(), ParentKind::Root);
        assert!(job.capabilities().parameterized);
        assert!(job.link_property().is_none());
    }

    #[test]
    fn test_attach_replaces_property() {
        let mut job = JobRecord::new("app", JobKind::Freestyle);
        job.attach(Some(ProjectLinkConfig::new(
            Some("https://a.backlog.jp"),
            None,
            None,
            None,
        )));
        job.attach(Some(ProjectLinkConfig::new(
            Some("https://b.backlog.jp/projects/B"),
            None,
            None,
            None,
        )));
        assert_eq!(job.link_property().and_then(|p| p.project()), Some("B"));

        job.attach(None);
        assert!(job.link_property().is_none());
    }
}
