//! Mail dispatcher.
//!
//! Builds Mailgun form payloads, attaches the Basic-Auth header, and issues
//! POST requests to `<base_url>/<domain>/messages`. Supports a single
//! recipient per call or a recipient list chunked into batches of at most
//! [`MAX_RECIPIENTS_PER_REQUEST`].
//!
//! There is no retry, queueing, or concurrency here: each send awaits its
//! HTTP call(s) to completion, and bulk chunks go out strictly in order.
//!
//! # Example
//!
//! ```rust,ignore
//! use mailgun_dispatch::{MailConfig, MailDispatcher};
//!
//! let config = MailConfig::new("key-xxxx", "mg.example.com")
//!     .admin_address("admin@example.com");
//! let dispatcher = MailDispatcher::new(config);
//!
//! dispatcher
//!     .send_mail(
//!         "App <noreply@example.com>",
//!         "user@example.com",
//!         "Welcome",
//!         "Hello",
//!         "<p>Hello</p>",
//!         false,
//!         None,
//!     )
//!     .await?;
//! ```

use std::sync::Arc;

use base64::Engine;
use reqwest::{header, Client, Response};

use crate::config::MailConfig;
use crate::error::DispatchError;
use crate::payload::Payload;
use crate::resolver::ReplyToResolver;

const MAILGUN_BASE_URL: &str = "https://api.mailgun.net/v3";

/// Mailgun caps batch sending at 1000 recipients per request.
pub const MAX_RECIPIENTS_PER_REQUEST: usize = 1000;

/// Mailgun API dispatcher.
pub struct MailDispatcher {
    config: MailConfig,
    base_url: String,
    client: Client,
    resolver: Option<Arc<dyn ReplyToResolver>>,
}

impl MailDispatcher {
    /// Create a dispatcher with the given configuration.
    pub fn new(config: MailConfig) -> Self {
        Self {
            config,
            base_url: MAILGUN_BASE_URL.to_string(),
            client: Client::new(),
            resolver: None,
        }
    }

    /// Create with a custom reqwest client.
    pub fn with_client(config: MailConfig, client: Client) -> Self {
        Self {
            config,
            base_url: MAILGUN_BASE_URL.to_string(),
            client,
            resolver: None,
        }
    }

    /// Set a custom base URL (e.g., for EU: "https://api.eu.mailgun.net/v3").
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Attach a reply-to resolver.
    ///
    /// Required only when sends pass a reply-to identifier.
    pub fn reply_to_resolver(mut self, resolver: Arc<dyn ReplyToResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    fn auth_header(&self) -> String {
        let credentials = format!("api:{}", self.config.api_key);
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {}", encoded)
    }

    /// Issue one POST to the messages endpoint with `payload` as the body.
    ///
    /// Verifies the API key and domain are configured before any network
    /// I/O. Returns the raw response; a network error or non-2xx status
    /// surfaces as [`DispatchError::Transport`] without further
    /// interpretation at this layer.
    pub async fn post_message(&self, payload: &Payload) -> Result<Response, DispatchError> {
        self.config.validate()?;

        let url = format!("{}/{}/messages", self.base_url, self.config.domain);

        tracing::debug!(
            domain = %self.config.domain,
            fields = payload.len(),
            "Posting message to Mailgun"
        );

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, self.auth_header())
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .header(
                header::USER_AGENT,
                format!("mailgun-dispatch/{}", crate::VERSION),
            )
            .body(payload.to_form_body())
            .send()
            .await?
            .error_for_status()?;

        Ok(response)
    }

    /// Send a single email.
    ///
    /// `sender_email` should be in the form `"Sender Name <sender@example.com>"`.
    /// When `bcc_admin` is true the configured admin address is BCC'd. A
    /// non-empty `reply_to_id` is resolved through the attached resolver and
    /// added as the `h:Reply-To` header; an empty string means no reply-to.
    ///
    /// Fails with [`DispatchError::Disabled`] before any other work when the
    /// emails-enabled flag is off.
    #[allow(clippy::too_many_arguments)]
    pub async fn send_mail(
        &self,
        sender_email: &str,
        recipient_email: &str,
        subject: &str,
        plaintext_body: &str,
        html_body: &str,
        bcc_admin: bool,
        reply_to_id: Option<&str>,
    ) -> Result<(), DispatchError> {
        if !self.config.enabled {
            tracing::warn!("Send attempted while emails are disabled");
            return Err(DispatchError::Disabled);
        }

        let mut payload = Payload::new()
            .field("from", sender_email)
            .field("to", recipient_email)
            .field("subject", subject)
            .field("text", plaintext_body)
            .field("html", html_body);

        if bcc_admin {
            payload = payload.field("bcc", &self.config.admin_address);
        }

        if let Some(id) = reply_to_id.filter(|id| !id.is_empty()) {
            let reply_to = self.resolve_reply_to(id).await?;
            payload = payload.field("h:Reply-To", &reply_to);
        }

        self.post_message(&payload).await?;
        Ok(())
    }

    /// Send one email per recipient, batched.
    ///
    /// Recipients are split into contiguous chunks of at most
    /// [`MAX_RECIPIENTS_PER_REQUEST`], preserving order, with one request
    /// per chunk issued sequentially. Each chunk carries an empty
    /// `recipient-variables` object so Mailgun delivers an individual email
    /// to each recipient instead of one multi-recipient email.
    ///
    /// The first failing chunk aborts the remainder; chunks already sent
    /// stay sent.
    pub async fn send_bulk_mail<S: AsRef<str>>(
        &self,
        sender_email: &str,
        recipient_emails: &[S],
        subject: &str,
        plaintext_body: &str,
        html_body: &str,
    ) -> Result<(), DispatchError> {
        if !self.config.enabled {
            tracing::warn!("Bulk send attempted while emails are disabled");
            return Err(DispatchError::Disabled);
        }

        for chunk in recipient_emails.chunks(MAX_RECIPIENTS_PER_REQUEST) {
            let payload = Payload::new()
                .field("from", sender_email)
                .field_each("to", chunk.iter().map(|r| r.as_ref()))
                .field("subject", subject)
                .field("text", plaintext_body)
                .field("html", html_body)
                .field("recipient-variables", "{}");

            tracing::debug!(recipients = chunk.len(), "Sending bulk chunk");
            self.post_message(&payload).await?;
        }

        Ok(())
    }

    async fn resolve_reply_to(&self, reply_to_id: &str) -> Result<String, DispatchError> {
        match &self.resolver {
            Some(resolver) => resolver.resolve(reply_to_id).await,
            None => Err(DispatchError::Resolution(format!(
                "{} (no resolver attached)",
                reply_to_id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_header_encodes_api_key() {
        let dispatcher = MailDispatcher::new(MailConfig::new("key-xxxx", "mg.example.com"));
        // base64("api:key-xxxx")
        assert_eq!(dispatcher.auth_header(), "Basic YXBpOmtleS14eHh4");
    }

    #[tokio::test]
    async fn reply_to_without_resolver_fails() {
        let dispatcher = MailDispatcher::new(MailConfig::new("key-xxxx", "mg.example.com"));
        let err = dispatcher.resolve_reply_to("user-1").await.unwrap_err();
        assert!(matches!(err, DispatchError::Resolution(_)));
    }
}
