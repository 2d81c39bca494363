//! Error types for registration and the payload codec.

use thiserror::Error;

use crate::kind::MessageKind;

// =============================================================================
// Registration Errors
// =============================================================================

/// Configuration-time registry defects.
///
/// These are fatal at start-up: the composition root must refuse to serve
/// rather than run with an incomplete routing table.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A factory is already registered for this kind.
    #[error("message kind '{kind}' is already registered")]
    DuplicateKind {
        /// The kind that was registered twice.
        kind: MessageKind,
    },

    /// The kind was never registered.
    #[error("message kind '{kind}' is not registered")]
    UnknownKind {
        /// The missing kind.
        kind: MessageKind,
    },

    /// A handler is already bound for this (topic, kind) pair.
    #[error("handler already bound for topic '{topic}' and kind '{kind}'")]
    DuplicateBinding {
        /// The topic of the rejected binding.
        topic: String,
        /// The kind of the rejected binding.
        kind: MessageKind,
    },

    /// The registry was sealed before this registration.
    #[error("registry is sealed; all registrations must complete before the first dispatch")]
    Sealed,
}

// =============================================================================
// Codec Errors
// =============================================================================

/// Per-event payload decode failures.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The raw bytes could not be decoded into the expected kind.
    ///
    /// The target is never partially populated: decoding materializes the
    /// whole value or nothing.
    #[error("malformed payload for kind '{kind}' ({len} bytes): {source}")]
    Malformed {
        /// The kind the decode was attempted for.
        kind: MessageKind,
        /// Length of the observed raw payload.
        len: usize,
        /// The underlying deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// No decoder is registered for the kind.
    #[error("no decoder registered for kind '{kind}'")]
    UnknownKind {
        /// The unregistered kind.
        kind: MessageKind,
    },
}

/// Outbound payload encode failure.
#[derive(Debug, Error)]
#[error("failed to encode payload of kind '{kind}': {source}")]
pub struct EncodeError {
    /// The kind of the payload that failed to encode.
    pub kind: MessageKind,
    /// The underlying serialization failure.
    #[source]
    pub source: serde_json::Error,
}
