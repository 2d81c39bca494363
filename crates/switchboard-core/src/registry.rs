//! Type registry: message kinds mapped to zero-value factories and decoders.

use std::collections::HashMap;

use crate::error::{DecodeError, RegistryError};
use crate::kind::MessageKind;
use crate::payload::{ErasedPayload, Payload};

/// Zero-value factory for a registered kind.
pub type FactoryFn = fn() -> Box<dyn ErasedPayload>;

type DecodeFn = fn(&[u8]) -> Result<Box<dyn ErasedPayload>, serde_json::Error>;

/// Per-kind entry: zero-value factory plus a monomorphized decoder.
struct KindEntry {
    factory: FactoryFn,
    decode: DecodeFn,
}

/// Registry of the message kinds known to the dispatch layer.
///
/// # Lifecycle
///
/// Construct → [`register`](Self::register) each kind →
/// [`seal`](Self::seal) → share behind `Arc`. Writes take `&mut self`, so
/// the single-threaded construction phase is enforced by the borrow
/// checker; a sealed registry is read-only and needs no locking under
/// concurrent dispatch.
#[derive(Default)]
pub struct TypeRegistry {
    entries: HashMap<MessageKind, KindEntry>,
    sealed: bool,
}

impl TypeRegistry {
    /// Creates an empty, unsealed registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under `T::KIND`, with `T::default` as the zero-value
    /// factory.
    ///
    /// The factory is referentially transparent by construction: every call
    /// yields a structurally identical empty instance, so it is safe to
    /// invoke from concurrent dispatches.
    pub fn register<T: Payload + Default>(&mut self) -> Result<(), RegistryError> {
        if self.sealed {
            return Err(RegistryError::Sealed);
        }
        if self.entries.contains_key(&T::KIND) {
            return Err(RegistryError::DuplicateKind { kind: T::KIND });
        }
        self.entries.insert(
            T::KIND,
            KindEntry {
                factory: || Box::new(T::default()),
                decode: |raw| {
                    serde_json::from_slice::<T>(raw).map(|v| Box::new(v) as Box<dyn ErasedPayload>)
                },
            },
        );
        Ok(())
    }

    /// Materializes a fresh zero value for `kind`.
    ///
    /// This is what the subscription layer is handed before subscribing, so
    /// broker-level deserialization already produces the right shape.
    pub fn instantiate(&self, kind: MessageKind) -> Result<Box<dyn ErasedPayload>, RegistryError> {
        let entry = self
            .entries
            .get(&kind)
            .ok_or(RegistryError::UnknownKind { kind })?;
        Ok((entry.factory)())
    }

    /// Returns the zero-value factory for `kind`.
    pub fn factory(&self, kind: MessageKind) -> Result<FactoryFn, RegistryError> {
        self.entries
            .get(&kind)
            .map(|entry| entry.factory)
            .ok_or(RegistryError::UnknownKind { kind })
    }

    /// Decodes raw payload bytes into the shape registered for `kind`.
    pub(crate) fn decode(
        &self,
        kind: MessageKind,
        raw: &[u8],
    ) -> Result<Box<dyn ErasedPayload>, DecodeError> {
        let entry = self
            .entries
            .get(&kind)
            .ok_or(DecodeError::UnknownKind { kind })?;
        (entry.decode)(raw).map_err(|source| DecodeError::Malformed {
            kind,
            len: raw.len(),
            source,
        })
    }

    /// Returns `true` if `kind` is registered.
    pub fn contains(&self, kind: MessageKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Iterates over all registered kinds.
    pub fn kinds(&self) -> impl Iterator<Item = MessageKind> + '_ {
        self.entries.keys().copied()
    }

    /// Returns the number of registered kinds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no kinds are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ends the registration phase.
    ///
    /// Subsequent [`register`](Self::register) calls fail with
    /// [`RegistryError::Sealed`].
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Returns `true` once the registration phase has ended.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("kinds", &self.entries.keys().collect::<Vec<_>>())
            .field("sealed", &self.sealed)
            .finish()
    }
}
