//! Inbound broker events and their attributes.
//!
//! An [`InboundEvent`] is what the subscription layer hands to the
//! dispatcher: one per delivery, discarded after the dispatch returns.

use serde::{Deserialize, Serialize};

use crate::kind::MessageKind;
use crate::payload::ErasedPayload;

// =============================================================================
// Headers
// =============================================================================

/// Order-preserving broker message headers.
///
/// Values are raw bytes, as brokers deliver them; most headers carry UTF-8
/// text, reachable through [`get_str`](Self::get_str). The order is carried
/// exactly as delivered but is not semantically significant; lookups return
/// the first matching key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers(Vec<(String, Vec<u8>)>);

impl Headers {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a header, preserving insertion order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.0.push((key.into(), value.into()));
    }

    /// Appends a header (builder pattern).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the raw value of the first header with the given key.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    /// Returns the first value for the key as UTF-8 text, if it is valid.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| std::str::from_utf8(v).ok())
    }

    /// Iterates over all headers in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Returns the number of headers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no headers are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Vec<u8>>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// =============================================================================
// Delivery metadata
// =============================================================================

/// Opaque delivery metadata attached by the broker.
///
/// Passed through unexamined; only the subscription layer interprets it
/// when deciding redelivery, skipping, or dead-lettering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    /// Partition the event was consumed from.
    pub partition: i32,
    /// Offset within the partition.
    pub offset: i64,
}

impl Delivery {
    /// Creates delivery metadata for a (partition, offset) position.
    pub fn new(partition: i32, offset: i64) -> Self {
        Self { partition, offset }
    }
}

// =============================================================================
// Event body
// =============================================================================

/// The body of an inbound event.
pub enum EventBody {
    /// Raw payload bytes; the dispatcher decodes them for the event's kind.
    Raw(Vec<u8>),
    /// A value the broker layer already materialized through a registry
    /// factory. The typed handler narrows it with a checked downcast.
    Typed(Box<dyn ErasedPayload>),
}

impl std::fmt::Debug for EventBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raw(bytes) => f.debug_tuple("Raw").field(&bytes.len()).finish(),
            Self::Typed(payload) => f.debug_tuple("Typed").field(&payload.kind()).finish(),
        }
    }
}

// =============================================================================
// Inbound event
// =============================================================================

/// One broker delivery, created per event and discarded after dispatch.
#[derive(Debug)]
pub struct InboundEvent {
    /// Topic the event was consumed from.
    pub topic: String,
    /// The kind the subscription was established with. The subscription
    /// layer stamps this from the factory it was given at subscribe time,
    /// so the dispatcher narrows against a known kind instead of inspecting
    /// an open-ended runtime type.
    pub kind: MessageKind,
    /// Broker message headers, order-preserving.
    pub headers: Headers,
    /// The payload, raw or already materialized.
    pub body: EventBody,
    /// Opaque delivery position, passed through unexamined.
    pub delivery: Delivery,
}

impl InboundEvent {
    /// Creates an event carrying raw payload bytes for `kind`.
    pub fn raw(topic: impl Into<String>, kind: MessageKind, bytes: Vec<u8>) -> Self {
        Self {
            topic: topic.into(),
            kind,
            headers: Headers::new(),
            body: EventBody::Raw(bytes),
            delivery: Delivery::default(),
        }
    }

    /// Creates an event whose body was already materialized by the broker
    /// layer; the kind is stamped from the value itself.
    pub fn typed(topic: impl Into<String>, payload: Box<dyn ErasedPayload>) -> Self {
        Self {
            topic: topic.into(),
            kind: payload.kind(),
            headers: Headers::new(),
            body: EventBody::Typed(payload),
            delivery: Delivery::default(),
        }
    }

    /// Attaches headers (builder pattern).
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Attaches delivery metadata (builder pattern).
    pub fn with_delivery(mut self, delivery: Delivery) -> Self {
        self.delivery = delivery;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Payload;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Ping {
        seq: u32,
    }

    impl Payload for Ping {
        const KIND: MessageKind = MessageKind::new("Ping");
    }

    #[test]
    fn headers_preserve_order_and_find_first() {
        let headers = Headers::new()
            .with("trace-id", "a")
            .with("retry", "1")
            .with("trace-id", "b");

        assert_eq!(headers.get_str("trace-id"), Some("a"));
        assert_eq!(headers.get("trace-id"), Some(b"a".as_slice()));
        assert_eq!(headers.get("missing"), None);
        let keys: Vec<_> = headers.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["trace-id", "retry", "trace-id"]);
    }

    #[test]
    fn binary_header_values_pass_through() {
        let headers = Headers::new().with("checksum", vec![0xde, 0xad, 0xbe, 0xef]);

        assert_eq!(
            headers.get("checksum"),
            Some([0xde, 0xad, 0xbe, 0xef].as_slice())
        );
        // Not UTF-8, so the text accessor declines rather than lossily decodes.
        assert_eq!(headers.get_str("checksum"), None);
    }

    #[test]
    fn typed_event_is_stamped_with_payload_kind() {
        let event = InboundEvent::typed("topic.ping", Box::new(Ping { seq: 3 }));
        assert_eq!(event.kind, Ping::KIND);
        assert_eq!(event.topic, "topic.ping");
    }

    #[test]
    fn raw_event_carries_delivery_through() {
        let event = InboundEvent::raw("topic.ping", Ping::KIND, b"{}".to_vec())
            .with_delivery(Delivery::new(2, 41));
        assert_eq!(event.delivery, Delivery::new(2, 41));
    }
}
