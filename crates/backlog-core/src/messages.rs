//! Localized message catalog

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    PropertyDisplayName,
    LinkActionDisplayName,
    UrlError,
    UserIdError,
}

impl MessageKey {
    /// Get the message text for the given locale
    pub fn text(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (MessageKey::PropertyDisplayName, _) => "Backlog",
            (MessageKey::LinkActionDisplayName, _) => "Backlog",
            (MessageKey::UrlError, Locale::En) => "Invalid Backlog URL",
            (MessageKey::UrlError, Locale::Ja) => "BacklogのURLが不正です",
            (MessageKey::UserIdError, Locale::En) => {
                "User ID may contain only letters, digits, '-', '_', '@' and '.'"
            }
            (MessageKey::UserIdError, Locale::Ja) => {
                "ユーザIDには英数字と「-」「_」「@」「.」のみ使用できます"
            }
        }
    }
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ja => "ja",
        }
    }
}

impl FromStr for Locale {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ja" => Ok(Locale::Ja),
            other => Err(crate::Error::Validation(format!(
                "Unsupported locale '{}'. Must be one of: en, ja",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_str() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(" JA ".parse::<Locale>().unwrap(), Locale::Ja);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_messages_are_localized() {
        assert_ne!(
            MessageKey::UrlError.text(Locale::En),
            MessageKey::UrlError.text(Locale::Ja)
        );
        assert_eq!(MessageKey::PropertyDisplayName.text(Locale::Ja), "Backlog");
    }
}
