//! Backlog project link property
//!
//! One [`ProjectLinkConfig`] is attached to a job. It is built once from a
//! form submission and replaced wholesale on the next one.

use crate::action::LinkAction;
use crate::secret::Secret;

/// Path segment separating the space URL from the project key.
pub const PROJECTS_SEGMENT: &str = "/projects/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLinkConfig {
    url: Option<String>,
    user_id: Option<String>,
    password: Secret,
    api_key: Secret,
}

/// Normalize a submitted Backlog URL.
///
/// Empty input yields `None`. A URL naming a project, or one that already
/// ends with `/`, is kept as is; anything else gets a trailing `/`.
/// Well-formedness is not checked here.
pub fn normalize_url(url: Option<&str>) -> Option<String> {
    match url {
        None | Some("") => None,
        Some(u) if u.contains(PROJECTS_SEGMENT) || u.ends_with('/') => Some(u.to_string()),
        Some(u) => Some(format!("{}/", u)),
    }
}

impl ProjectLinkConfig {
    /// Create a new property from submitted form fields
    pub fn new(
        url: Option<&str>,
        user_id: Option<&str>,
        password: Option<&str>,
        api_key: Option<&str>,
    ) -> Self {
        Self {
            url: normalize_url(url),
            user_id: user_id.map(str::to_string),
            password: Secret::from_input(password),
            api_key: Secret::from_input(api_key),
        }
    }

    /// Rebuild a property from already-wrapped secrets
    pub fn with_secrets(
        url: Option<&str>,
        user_id: Option<&str>,
        password: Secret,
        api_key: Secret,
    ) -> Self {
        Self {
            url: normalize_url(url),
            user_id: user_id.map(str::to_string),
            password,
            api_key,
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn password(&self) -> &Secret {
        &self.password
    }

    pub fn api_key(&self) -> &Secret {
        &self.api_key
    }

    /// Root URL of the Backlog space, keeping the `/` that precedes
    /// `projects/`.
    pub fn space_url(&self) -> Option<&str> {
        let url = self.url.as_deref()?;
        match url.find(PROJECTS_SEGMENT) {
            Some(idx) => Some(&url[..idx + 1]),
            None => Some(url),
        }
    }

    /// Project key following the first `/projects/`. May be empty.
    pub fn project(&self) -> Option<&str> {
        let url = self.url.as_deref()?;
        let idx = url.find(PROJECTS_SEGMENT)?;
        Some(&url[idx + PROJECTS_SEGMENT.len()..])
    }

    /// Check whether every field is absent or empty
    pub fn is_blank(&self) -> bool {
        self.url.is_none()
            && self.user_id.as_deref().map_or(true, str::is_empty)
            && self.password.is_empty()
            && self.api_key.is_empty()
    }

    /// Link action shown on the page of the job carrying this property
    pub fn job_action(&self) -> LinkAction {
        LinkAction::new(Some(self.clone()))
    }
}
