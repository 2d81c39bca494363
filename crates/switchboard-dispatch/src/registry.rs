//! Handler registry: one handler per (topic, kind) binding.

use std::collections::HashMap;
use std::sync::Arc;

use switchboard_core::{MessageKind, Payload, RegistryError};

use crate::error::DispatchError;
use crate::handler::{ErasedHandler, Handler, into_handler};

/// Registry of `(topic, kind)` → handler bindings.
///
/// Registering a second handler for an already-bound pair is a
/// configuration error, rejected at registration time without touching the
/// existing binding — never a silent overwrite.
///
/// # Lifecycle
///
/// Same discipline as [`TypeRegistry`](switchboard_core::TypeRegistry):
/// construct → [`register`](Self::register) → [`seal`](Self::seal) → share
/// behind `Arc`. Writes take `&mut self`; a sealed registry is read-only
/// and safe for concurrent lookup without locks.
#[derive(Default)]
pub struct HandlerRegistry {
    bindings: HashMap<String, HashMap<MessageKind, Arc<dyn ErasedHandler>>>,
    sealed: bool,
}

impl HandlerRegistry {
    /// Creates an empty, unsealed registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a typed handler for `(topic, T::KIND)`.
    pub fn register<T, H>(&mut self, topic: impl Into<String>, handler: H) -> Result<(), RegistryError>
    where
        T: Payload,
        H: Handler<T>,
    {
        self.register_erased(topic.into(), T::KIND, into_handler::<T, _>(handler))
    }

    /// Binds an already-erased handler for `(topic, kind)`.
    pub fn register_erased(
        &mut self,
        topic: String,
        kind: MessageKind,
        handler: Arc<dyn ErasedHandler>,
    ) -> Result<(), RegistryError> {
        if self.sealed {
            return Err(RegistryError::Sealed);
        }
        let kinds = self.bindings.entry(topic.clone()).or_default();
        if kinds.contains_key(&kind) {
            return Err(RegistryError::DuplicateBinding { topic, kind });
        }
        kinds.insert(kind, handler);
        Ok(())
    }

    /// Resolves the handler bound for `(topic, kind)`.
    ///
    /// A miss is a configuration defect surfaced as
    /// [`DispatchError::HandlerNotFound`]; it must not be retried.
    pub fn lookup(
        &self,
        topic: &str,
        kind: MessageKind,
    ) -> Result<&Arc<dyn ErasedHandler>, DispatchError> {
        self.bindings
            .get(topic)
            .and_then(|kinds| kinds.get(&kind))
            .ok_or_else(|| DispatchError::HandlerNotFound {
                topic: topic.to_string(),
                kind,
            })
    }

    /// Iterates over all registered `(topic, kind)` bindings.
    ///
    /// The composition root derives the subscription list from this.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, MessageKind)> {
        self.bindings
            .iter()
            .flat_map(|(topic, kinds)| kinds.keys().map(move |kind| (topic.as_str(), *kind)))
    }

    /// Returns the number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.values().map(HashMap::len).sum()
    }

    /// Returns `true` if no bindings are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
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

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("bindings", &self.bindings().collect::<Vec<_>>())
            .field("sealed", &self.sealed)
            .finish()
    }
}
