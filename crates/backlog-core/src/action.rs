//! Link action shown on job pages

use crate::job::{Job, JobKind, ParentKind};
use crate::messages::{Locale, MessageKey};
use crate::models::ProjectLinkConfig;
use tracing::debug;

pub const ICON_FILE_NAME: &str = "/plugin/backlog/icon.png";

/// Link out to the Backlog space or project of a job.
///
/// Tolerates a missing or blank configuration: with no URL the action has
/// no icon and no target, and hosts render nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAction {
    config: Option<ProjectLinkConfig>,
}

impl LinkAction {
    pub fn new(config: Option<ProjectLinkConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> Option<&ProjectLinkConfig> {
        self.config.as_ref()
    }

    pub fn display_name(&self, locale: Locale) -> &'static str {
        MessageKey::LinkActionDisplayName.text(locale)
    }

    pub fn icon(&self) -> Option<&'static str> {
        self.target_url().map(|_| ICON_FILE_NAME)
    }

    pub fn target_url(&self) -> Option<&str> {
        self.config.as_ref().and_then(ProjectLinkConfig::url)
    }

    pub fn space_url(&self) -> Option<&str> {
        self.config.as_ref().and_then(ProjectLinkConfig::space_url)
    }

    pub fn project(&self) -> Option<&str> {
        self.config.as_ref().and_then(ProjectLinkConfig::project)
    }

    pub fn is_visible(&self) -> bool {
        self.target_url().is_some()
    }
}

/// Supplies link actions for pipeline jobs.
///
/// Branch jobs of a multi-branch project get no action from here; their
/// links come from the branch-level property instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkActionFactory;

impl LinkActionFactory {
    pub fn new() -> Self {
        Self
    }

    /// Job types this factory is registered for
    pub fn applies_to(&self, job: &dyn Job) -> bool {
        job.kind() == JobKind::Pipeline
    }

    pub fn create_for(&self, job: &dyn Job) -> Vec<LinkAction> {
        if job.parent_kind() == ParentKind::MultiBranch {
            debug!("Skipping link action for branch job {}", job.full_name());
            return Vec::new();
        }

        debug!("Creating link action for job {}", job.full_name());
        vec![LinkAction::new(job.link_property().cloned())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobRecord;

    fn project_config() -> ProjectLinkConfig {
        ProjectLinkConfig::new(
            Some("https://example.backlog.jp/projects/ABC"),
            Some("bob"),
            None,
            None,
        )
    }

    #[test]
    fn test_action_from_config() {
        let action = project_config().job_action();
        assert!(action.is_visible());
        assert_eq!(action.icon(), Some(ICON_FILE_NAME));
        assert_eq!(
            action.target_url(),
            Some("https://example.backlog.jp/projects/ABC")
        );
        assert_eq!(action.space_url(), Some("https://example.backlog.jp/"));
        assert_eq!(action.project(), Some("ABC"));
        assert_eq!(action.display_name(Locale::En), "Backlog");
    }

    #[test]
    fn test_action_without_config_renders_nothing() {
        let action = LinkAction::new(None);
        assert!(!action.is_visible());
        assert!(action.icon().is_none());
        assert!(action.target_url().is_none());
        assert!(action.project().is_none());

        let blank = LinkAction::new(Some(ProjectLinkConfig::new(None, None, None, None)));
        assert!(!blank.is_visible());
    }

    #[test]
    fn test_factory_creates_single_action() {
        let mut job = JobRecord::new("app", JobKind::Pipeline);
        job.attach(Some(project_config()));

        let factory = LinkActionFactory::new();
        assert!(factory.applies_to(&job));
        let actions = factory.create_for(&job);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].project(), Some("ABC"));
    }

    #[test]
    fn test_factory_without_property() {
        let job = JobRecord::new("app", JobKind::Pipeline);
        let actions = LinkActionFactory::new().create_for(&job);
        assert_eq!(actions.len(), 1);
        assert!(!actions[0].is_visible());
    }

    #[test]
    fn test_factory_skips_multi_branch() {
        let mut job =
            JobRecord::new("repo/main", JobKind::Pipeline).with_parent(ParentKind::MultiBranch);
        job.attach(Some(project_config()));
        assert!(LinkActionFactory::new().create_for(&job).is_empty());
    }

    #[test]
    fn test_factory_is_idempotent() {
        let mut job = JobRecord::new("app", JobKind::Pipeline).with_parent(ParentKind::Folder);
        job.attach(Some(project_config()));
        let factory = LinkActionFactory::new();
        assert_eq!(factory.create_for(&job), factory.create_for(&job));
    }

    #[test]
    fn test_factory_applies_to_pipelines_only() {
        let job = JobRecord::new("app", JobKind::Freestyle);
        assert!(!LinkActionFactory::new().applies_to(&job));
    }
}
