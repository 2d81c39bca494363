//! The event-loop-facing dispatch entry point.

use std::sync::Arc;

use switchboard_core::{EventBody, InboundEvent, PayloadCodec, TypeRegistry};

use crate::context::DispatchContext;
use crate::error::{DispatchError, DispatchResult};
use crate::registry::HandlerRegistry;

/// Routes one inbound broker event to its bound handler.
///
/// For each event the dispatcher performs, in order: a cancellation check,
/// handler lookup by `(topic, kind)`, payload materialization (codec decode
/// for raw bodies, checked narrowing for already-typed ones), and a
/// synchronous handler invocation whose result is returned unchanged.
///
/// # Contract
///
/// - Stateless between invocations; each dispatch is an independent
///   transaction. Safe for concurrent, reentrant use — the only shared
///   state are the sealed registries behind `Arc`.
/// - No retry policy: redelivery, backoff, and dead-lettering belong to
///   the subscription layer, which acts on the returned result.
/// - No side effects beyond the handler invocation: no logging, no
///   metrics, no shared-state mutation. Cross-cutting behavior wraps the
///   dispatcher (see [`TracedDispatcher`](crate::middleware::TracedDispatcher)).
#[derive(Clone)]
pub struct Dispatcher {
    handlers: Arc<HandlerRegistry>,
    codec: PayloadCodec,
}

impl Dispatcher {
    /// Creates a dispatcher over sealed registries.
    ///
    /// Both registries must be sealed before the dispatcher is shared; the
    /// composition root enforces this ordering.
    pub fn new(types: Arc<TypeRegistry>, handlers: Arc<HandlerRegistry>) -> Self {
        Self {
            handlers,
            codec: PayloadCodec::new(types),
        }
    }

    /// Returns the payload codec used for raw bodies.
    pub fn codec(&self) -> &PayloadCodec {
        &self.codec
    }

    /// Returns the handler registry.
    pub fn handlers(&self) -> &Arc<HandlerRegistry> {
        &self.handlers
    }

    /// Processes a single inbound event end to end.
    pub async fn dispatch(&self, ctx: &DispatchContext, event: InboundEvent) -> DispatchResult<()> {
        if ctx.is_cancelled() {
            return Err(DispatchError::Cancelled);
        }

        let InboundEvent {
            topic,
            kind,
            headers,
            body,
            // Delivery metadata is the subscription layer's concern.
            delivery: _,
        } = event;

        let handler = self.handlers.lookup(&topic, kind)?;

        let payload = match body {
            EventBody::Raw(bytes) => self.codec.decode(kind, &bytes)?,
            EventBody::Typed(payload) => payload,
        };

        handler.call(ctx.clone(), topic, headers, payload).await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("bindings", &self.handlers.len())
            .finish()
    }
}
