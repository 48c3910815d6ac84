//! Reply-to resolution.
//!
//! Outgoing emails can carry an opaque reply-to identifier instead of a
//! concrete address; a resolver maps that identifier to the inbound address
//! placed in the `h:Reply-To` header. The lookup lives behind a trait so
//! applications plug in their own store and tests plug in a stub.
//!
//! Uses `#[async_trait]` because the dispatcher holds the resolver as
//! `Arc<dyn ReplyToResolver>`; native async traits are not object-safe.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::DispatchError;

/// Maps an opaque reply-to identifier to a concrete inbound email address.
#[async_trait]
pub trait ReplyToResolver: Send + Sync {
    /// Resolve `reply_to_id` to an email address.
    ///
    /// Fails with [`DispatchError::Resolution`] when the identifier is
    /// unrecognized.
    async fn resolve(&self, reply_to_id: &str) -> Result<String, DispatchError>;
}

/// A fixed in-memory resolver backed by a map.
///
/// Suitable for tests and for deployments with a small static set of
/// inbound addresses.
#[derive(Debug, Clone, Default)]
pub struct StaticReplyToResolver {
    addresses: HashMap<String, String>,
}

impl StaticReplyToResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an identifier → address mapping.
    pub fn with_address(
        mut self,
        reply_to_id: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        self.addresses.insert(reply_to_id.into(), address.into());
        self
    }
}

#[async_trait]
impl ReplyToResolver for StaticReplyToResolver {
    async fn resolve(&self, reply_to_id: &str) -> Result<String, DispatchError> {
        self.addresses
            .get(reply_to_id)
            .cloned()
            .ok_or_else(|| DispatchError::Resolution(reply_to_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_known_id() {
        let resolver = StaticReplyToResolver::new().with_address("user-1", "reply+1@example.com");
        let address = resolver.resolve("user-1").await.unwrap();
        assert_eq!(address, "reply+1@example.com");
    }

    #[tokio::test]
    async fn unknown_id_fails_with_resolution_error() {
        let resolver = StaticReplyToResolver::new();
        let err = resolver.resolve("nobody").await.unwrap_err();
        assert!(matches!(err, DispatchError::Resolution(id) if id == "nobody"));
    }
}
