//! Opaque secret values
//!
//! Passwords and API keys are held as [`Secret`]s. The only way to read the
//! value back is [`Secret::reveal`]; there is no `Display` impl and `Debug`
//! is redacted, so a secret cannot leak through `{}`/`{:?}` formatting.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

pub struct Secret(SecretString);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        let value: String = value.into();
        Self(SecretString::from(value))
    }

    /// Wrap submitted form input. Absent and empty input both produce an
    /// empty secret.
    pub fn from_input(value: Option<&str>) -> Self {
        Self::new(value.unwrap_or_default())
    }

    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// Expose the cleartext value.
    pub fn reveal(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.reveal().is_empty()
    }
}

impl Clone for Secret {
    fn clone(&self) -> Self {
        Self::new(self.reveal())
    }
}

impl Default for Secret {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        self.reveal() == other.reveal()
    }
}

impl Eq for Secret {}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal() {
        let secret = Secret::new("hunter2");
        assert_eq!(secret.reveal(), "hunter2");
        assert!(!secret.is_empty());
    }

    #[test]
    fn test_absent_and_empty_input_are_empty() {
        assert!(Secret::from_input(None).is_empty());
        assert!(Secret::from_input(Some("")).is_empty());
        assert_eq!(Secret::from_input(None), Secret::from_input(Some("")));
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = Secret::new("hunter2");
        let printed = format!("{:?}", secret);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("REDACTED"));
    }

    #[test]
    fn test_clone_keeps_value() {
        let secret = Secret::new("api-key-123");
        assert_eq!(secret.clone().reveal(), "api-key-123");
    }
}
