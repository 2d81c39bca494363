//! Cross-cutting wrappers around the dispatcher.
//!
//! The core [`Dispatcher`] performs no logging of its own — error values
//! are its sole output channel. Deployments that want per-dispatch
//! observability wrap it here instead.

use switchboard_core::InboundEvent;
use tracing::{Instrument, Level, debug, span, warn};

use crate::context::DispatchContext;
use crate::dispatcher::Dispatcher;
use crate::error::DispatchResult;

/// Dispatcher wrapper that records each dispatch in a tracing span.
///
/// Successes and cancellations are logged at `DEBUG`; genuine failures at
/// `WARN`. The result itself is passed through untouched so the
/// subscription layer still sees the exact dispatch outcome.
#[derive(Debug, Clone)]
pub struct TracedDispatcher {
    inner: Dispatcher,
}

impl TracedDispatcher {
    /// Wraps a dispatcher.
    pub fn new(inner: Dispatcher) -> Self {
        Self { inner }
    }

    /// Returns the wrapped dispatcher.
    pub fn inner(&self) -> &Dispatcher {
        &self.inner
    }

    /// Dispatches one event inside a `dispatch` span.
    pub async fn dispatch(&self, ctx: &DispatchContext, event: InboundEvent) -> DispatchResult<()> {
        let span = span!(
            Level::DEBUG,
            "dispatch",
            topic = %event.topic,
            kind = %event.kind,
        );

        async {
            let result = self.inner.dispatch(ctx, event).await;
            match &result {
                Ok(()) => debug!("dispatch succeeded"),
                Err(err) if err.is_cancelled() => debug!("dispatch cancelled"),
                Err(err) => warn!(error = %err, "dispatch failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}
