//! Error types for mailgun-dispatch.

use thiserror::Error;

/// Errors that can occur when dispatching emails.
///
/// Callers pattern-match on the variant instead of parsing messages:
/// `Disabled` and `Misconfigured` are raised before any network call,
/// `Transport` and `Resolution` come from the collaborators.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// Sending was attempted while the emails-enabled flag is off.
    #[error("This app cannot send emails to users")]
    Disabled,

    /// A required configuration value is missing at send time.
    ///
    /// Carries the name of the missing item ("API key" or "domain name").
    #[error("Mailgun {0} is not available")]
    Misconfigured(&'static str),

    /// Network error or non-success HTTP status from the provider.
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        /// HTTP status code, when the request got far enough to receive one.
        status: Option<u16>,
    },

    /// The reply-to identifier could not be resolved to an inbound address.
    #[error("Unable to resolve reply-to id: {0}")]
    Resolution(String),
}

impl DispatchError {
    /// Create a transport error with an HTTP status.
    pub fn transport_with_status(message: impl Into<String>, status: u16) -> Self {
        Self::Transport {
            message: message.into(),
            status: Some(status),
        }
    }
}

impl From<reqwest::Error> for DispatchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
        }
    }
}
