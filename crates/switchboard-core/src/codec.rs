//! JSON payload codec over the type registry.

use std::sync::Arc;

use crate::error::{DecodeError, EncodeError};
use crate::kind::MessageKind;
use crate::payload::{ErasedPayload, Payload};
use crate::registry::TypeRegistry;

/// Encodes and decodes payloads for registered message kinds.
///
/// Decoding is deterministic and total over well-formed input. Malformed
/// input fails with [`DecodeError::Malformed`] carrying the byte length and
/// the attempted kind, and never partially populates the target.
///
/// `encode` is the structural inverse of `decode`: field values round-trip
/// exactly, but byte-for-byte reproduction is not promised because the JSON
/// format permits multiple serializations of one value (object key order).
#[derive(Clone)]
pub struct PayloadCodec {
    types: Arc<TypeRegistry>,
}

impl PayloadCodec {
    /// Creates a codec over a type registry.
    ///
    /// The registry should be sealed before the codec is shared across
    /// concurrent dispatches.
    pub fn new(types: Arc<TypeRegistry>) -> Self {
        Self { types }
    }

    /// Decodes raw bytes into the shape registered for `kind`.
    pub fn decode(
        &self,
        kind: MessageKind,
        raw: &[u8],
    ) -> Result<Box<dyn ErasedPayload>, DecodeError> {
        self.types.decode(kind, raw)
    }

    /// Decodes directly into a concrete payload type, bypassing erasure.
    ///
    /// Intended for composition-root and test use; the type does not need
    /// to be registered.
    pub fn decode_as<T: Payload>(&self, raw: &[u8]) -> Result<T, DecodeError> {
        serde_json::from_slice(raw).map_err(|source| DecodeError::Malformed {
            kind: T::KIND,
            len: raw.len(),
            source,
        })
    }

    /// Encodes an erased payload into its wire form.
    pub fn encode(&self, payload: &dyn ErasedPayload) -> Result<Vec<u8>, EncodeError> {
        let value = payload.to_json().map_err(|source| EncodeError {
            kind: payload.kind(),
            source,
        })?;
        serde_json::to_vec(&value).map_err(|source| EncodeError {
            kind: payload.kind(),
            source,
        })
    }

    /// Encodes a concrete payload into its wire form.
    pub fn encode_value<T: Payload>(&self, value: &T) -> Result<Vec<u8>, EncodeError> {
        serde_json::to_vec(value).map_err(|source| EncodeError {
            kind: T::KIND,
            source,
        })
    }

    /// Returns the underlying type registry.
    pub fn types(&self) -> &Arc<TypeRegistry> {
        &self.types
    }
}

impl std::fmt::Debug for PayloadCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadCodec")
            .field("kinds", &self.types.len())
            .finish()
    }
}
