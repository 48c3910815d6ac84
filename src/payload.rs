//! Outbound message payload.
//!
//! Mailgun's `/messages` endpoint takes `application/x-www-form-urlencoded`
//! bodies. Field values are encoded to UTF-8 bytes when they enter the
//! payload, as a distinct step from percent-encoding, so the transport
//! encoding is guaranteed rather than incidental. Multi-valued fields
//! (batch `to`) are carried as repeated keys.

use std::borrow::Cow;

/// A flat, ordered mapping of form field names to UTF-8 encoded values.
///
/// Built fresh per send and discarded once the request completes.
#[derive(Debug, Clone, Default)]
pub struct Payload {
    fields: Vec<(Cow<'static, str>, Vec<u8>)>,
}

impl Payload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, encoding the value to UTF-8 bytes.
    ///
    /// Calling this twice with the same name produces a repeated key.
    pub fn field(mut self, name: impl Into<Cow<'static, str>>, value: &str) -> Self {
        self.fields.push((name.into(), value.as_bytes().to_vec()));
        self
    }

    /// Add one field per value, all under the same name.
    ///
    /// Used for batch `to`: Mailgun accepts up to 1000 repeated `to` keys
    /// per request.
    pub fn field_each<I, S>(mut self, name: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            self.fields
                .push((Cow::Borrowed(name), value.as_ref().as_bytes().to_vec()));
        }
        self
    }

    /// Number of field entries (repeated keys count individually).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Values recorded under `name`, in insertion order.
    pub fn values(&self, name: &str) -> Vec<&[u8]> {
        self.fields
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
            .collect()
    }

    /// Whether any entry exists under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// Serialize as a form-urlencoded body.
    ///
    /// Percent-encoding operates on the stored byte sequences directly, so
    /// non-ASCII values round-trip as their UTF-8 bytes.
    pub fn to_form_body(&self) -> String {
        let mut body = String::new();
        for (name, value) in &self.fields {
            if !body.is_empty() {
                body.push('&');
            }
            body.push_str(&urlencoding::encode_binary(name.as_bytes()));
            body.push('=');
            body.push_str(&urlencoding::encode_binary(value));
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_values_are_utf8_bytes() {
        let payload = Payload::new().field("subject", "héllo");
        assert_eq!(payload.values("subject"), vec!["héllo".as_bytes()]);
    }

    #[test]
    fn form_body_percent_encodes_bytes() {
        let payload = Payload::new()
            .field("from", "Sender <sender@example.com>")
            .field("subject", "héllo");
        let body = payload.to_form_body();
        assert_eq!(
            body,
            "from=Sender%20%3Csender%40example.com%3E&subject=h%C3%A9llo"
        );
    }

    #[test]
    fn repeated_keys_preserve_order() {
        let payload =
            Payload::new().field_each("to", ["a@example.com", "b@example.com", "c@example.com"]);
        assert_eq!(payload.len(), 3);
        assert_eq!(
            payload.to_form_body(),
            "to=a%40example.com&to=b%40example.com&to=c%40example.com"
        );
    }

    #[test]
    fn header_field_names_are_encoded() {
        let payload = Payload::new().field("h:Reply-To", "reply@example.com");
        assert_eq!(payload.to_form_body(), "h%3AReply-To=reply%40example.com");
    }

    #[test]
    fn empty_payload_serializes_empty() {
        assert!(Payload::new().is_empty());
        assert_eq!(Payload::new().to_form_body(), "");
    }
}
