//! # mailgun-dispatch
//!
//! Thin client for the Mailgun transactional email API: form-encoded
//! payloads, Basic-Auth from the API key, one POST per send (or per
//! 1000-recipient chunk for bulk sends). Nothing else - no retries, no
//! queueing, no persistence.
//!
//! ## Quick Start
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
//!
//! Configuration can also come from the environment:
//!
//! ```rust,ignore
//! let dispatcher = MailDispatcher::new(MailConfig::from_env()?);
//! ```
//!
//! ## Bulk Sending
//!
//! `send_bulk_mail` delivers an individual email to each address in the
//! list, chunked at Mailgun's 1000-recipient batch limit:
//!
//! ```rust,ignore
//! dispatcher
//!     .send_bulk_mail(
//!         "App <noreply@example.com>",
//!         &recipients,
//!         "Digest",
//!         "Your weekly digest",
//!         "<p>Your weekly digest</p>",
//!     )
//!     .await?;
//! ```
//!
//! ## Errors
//!
//! Every failure is a [`DispatchError`] variant callers can match on:
//! `Disabled` (sending gated off), `Misconfigured` (API key or domain
//! missing, checked before any network call), `Transport` (network error or
//! non-2xx status), `Resolution` (reply-to lookup failed). None are retried
//! or recovered here. A failing bulk chunk halts the remaining chunks;
//! chunks already posted stay posted.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod payload;
pub mod resolver;

pub use config::MailConfig;
pub use dispatcher::{MailDispatcher, MAX_RECIPIENTS_PER_REQUEST};
pub use error::DispatchError;
pub use payload::Payload;
pub use resolver::{ReplyToResolver, StaticReplyToResolver};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
