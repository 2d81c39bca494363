//! Dispatch-time error taxonomy.

use switchboard_core::{DecodeError, MessageKind};
use thiserror::Error;

/// A boxed domain-handler failure.
pub type HandlerFailure = Box<dyn std::error::Error + Send + Sync>;

/// Per-event dispatch failures surfaced to the subscription layer.
///
/// The dispatcher never retries and never logs: the error value is the sole
/// channel the subscription layer uses to decide whether to redeliver,
/// skip, or dead-letter. Every variant carries enough context (topic,
/// expected/observed kind, byte length) to diagnose without re-reading
/// source.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Payload bytes could not be decoded for the expected kind.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The event body's concrete shape disagrees with the kind bound for
    /// this (topic, kind) pair. Data is never coerced or dropped silently.
    #[error("unexpected payload type: expected kind '{expected}', observed '{observed}'")]
    PayloadTypeMismatch {
        /// The kind the bound handler expects.
        expected: MessageKind,
        /// The kind of the shape actually observed.
        observed: MessageKind,
    },

    /// No handler is bound for (topic, kind).
    ///
    /// A configuration defect, not a transient failure; must not be
    /// retried.
    #[error("no handler bound for topic '{topic}' and kind '{kind}'")]
    HandlerNotFound {
        /// Topic of the unroutable event.
        topic: String,
        /// Kind of the unroutable event.
        kind: MessageKind,
    },

    /// The dispatch context was cancelled.
    ///
    /// Transient from the subscription layer's point of view, not a defect.
    #[error("dispatch cancelled")]
    Cancelled,

    /// A domain handler failed; propagated unchanged to the subscription
    /// layer.
    #[error("handler failed: {0}")]
    Handler(#[source] HandlerFailure),
}

impl DispatchError {
    /// Wraps a domain failure for propagation through the dispatcher.
    pub fn handler(err: impl Into<HandlerFailure>) -> Self {
        Self::Handler(err.into())
    }

    /// Returns `true` if the failure came from context cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
