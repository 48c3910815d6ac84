//! Dispatcher configuration.

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// Configuration for the Mailgun dispatcher.
///
/// Injected explicitly at construction time so tests can substitute their
/// own values instead of reaching into process-global state.
///
/// # Example
///
/// ```
/// use mailgun_dispatch::MailConfig;
///
/// let config = MailConfig::new("key-xxxx", "mg.example.com")
///     .admin_address("admin@example.com")
///     .enabled(true);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Mailgun API key (secret).
    pub api_key: String,
    /// Sending domain (e.g., "mg.example.com").
    pub domain: String,
    /// Global gate: when false, every send fails with `Disabled`.
    pub enabled: bool,
    /// Address BCC'd when a send asks for `bcc_admin`.
    pub admin_address: String,
}

impl MailConfig {
    /// Create a configuration with the given API key and domain.
    ///
    /// Sending is enabled by default; the admin address starts empty.
    pub fn new(api_key: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            domain: domain.into(),
            enabled: true,
            admin_address: String::new(),
        }
    }

    /// Set the admin BCC address.
    pub fn admin_address(mut self, address: impl Into<String>) -> Self {
        self.admin_address = address.into();
        self
    }

    /// Set the emails-enabled flag.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Read configuration from environment variables.
    ///
    /// | Variable | Meaning |
    /// |----------|---------|
    /// | `MAILGUN_API_KEY` | API key (required) |
    /// | `MAILGUN_DOMAIN` | Sending domain (required) |
    /// | `EMAILS_ENABLED` | `true`/`1` to allow sending (default: false) |
    /// | `ADMIN_EMAIL_ADDRESS` | Admin BCC address (optional) |
    pub fn from_env() -> Result<Self, DispatchError> {
        let api_key = std::env::var("MAILGUN_API_KEY")
            .map_err(|_| DispatchError::Misconfigured("API key"))?;
        let domain = std::env::var("MAILGUN_DOMAIN")
            .map_err(|_| DispatchError::Misconfigured("domain name"))?;

        let enabled = std::env::var("EMAILS_ENABLED")
            .map(|v| matches!(v.as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        let admin_address = std::env::var("ADMIN_EMAIL_ADDRESS").unwrap_or_default();

        Ok(Self {
            api_key,
            domain,
            enabled,
            admin_address,
        })
    }

    /// Verify the values required for any transport call are present.
    ///
    /// Called before each outbound request; also useful at startup.
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.api_key.is_empty() {
            return Err(DispatchError::Misconfigured("API key"));
        }
        if self.domain.is_empty() {
            return Err(DispatchError::Misconfigured("domain name"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_populated_config() {
        let config = MailConfig::new("key-xxxx", "mg.example.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_api_key() {
        let config = MailConfig::new("", "mg.example.com");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, DispatchError::Misconfigured("API key")));
    }

    #[test]
    fn validate_rejects_empty_domain() {
        let config = MailConfig::new("key-xxxx", "");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, DispatchError::Misconfigured("domain name")));
    }

    #[test]
    fn builder_sets_flag_and_admin() {
        let config = MailConfig::new("k", "d")
            .enabled(false)
            .admin_address("admin@example.com");
        assert!(!config.enabled);
        assert_eq!(config.admin_address, "admin@example.com");
    }
}
