//! Advisory checks run while a user edits the link configuration.
//!
//! Nothing here blocks construction of a [`crate::ProjectLinkConfig`]; the
//! host renders the result next to the form field.

use crate::messages::{Locale, MessageKey};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValidation {
    Ok,
    Warning(String),
    Error(String),
}

impl FormValidation {
    pub fn kind(&self) -> ValidationKind {
        match self {
            FormValidation::Ok => ValidationKind::Ok,
            FormValidation::Warning(_) => ValidationKind::Warning,
            FormValidation::Error(_) => ValidationKind::Error,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FormValidation::Ok => None,
            FormValidation::Warning(msg) | FormValidation::Error(msg) => Some(msg),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, FormValidation::Ok)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigValidator {
    locale: Locale,
}

impl ConfigValidator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Check that the URL is absolute, syntactically valid and uses a
    /// supported scheme
    pub fn check_url(&self, url: Option<&str>) -> FormValidation {
        match url.map(Url::parse) {
            Some(Ok(parsed)) if is_supported(&parsed) => FormValidation::Ok,
            _ => self.error(MessageKey::UrlError),
        }
    }

    /// Check the user ID character set. An empty ID is accepted.
    pub fn check_user_id(&self, user_id: Option<&str>) -> FormValidation {
        match user_id {
            None | Some("") => FormValidation::Ok,
            Some(id) if id.chars().all(is_user_id_char) => FormValidation::Ok,
            Some(_) => self.error(MessageKey::UserIdError),
        }
    }

    fn error(&self, key: MessageKey) -> FormValidation {
        FormValidation::Error(key.text(self.locale).to_string())
    }
}

/// Schemes a link may point at. Everything but `file` needs a host.
const SUPPORTED_SCHEMES: [&str; 4] = ["http", "https", "ftp", "file"];

fn is_supported(url: &Url) -> bool {
    match url.scheme() {
        "file" => true,
        scheme => SUPPORTED_SCHEMES.contains(&scheme) && url.has_host(),
    }
}

fn is_user_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '@' | '.')
}
