//! Per-dispatch execution context.

use tokio_util::sync::CancellationToken;

/// The cancellation scope of a single dispatch.
///
/// One context is created per inbound event and dropped when the dispatch
/// returns; no state is carried between dispatches. Handlers observe the
/// scope through [`is_cancelled`](Self::is_cancelled) or by awaiting
/// [`cancelled`](Self::cancelled), and fail fast with
/// [`DispatchError::Cancelled`](crate::DispatchError::Cancelled) — the
/// dispatcher never retries internally on cancellation.
#[derive(Debug, Clone, Default)]
pub struct DispatchContext {
    cancellation: CancellationToken,
}

impl DispatchContext {
    /// Creates a context with a fresh cancellation scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context scoped under an existing token, typically the
    /// subscription layer's per-partition shutdown token.
    pub fn with_token(cancellation: CancellationToken) -> Self {
        Self { cancellation }
    }

    /// Returns `true` if this dispatch has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Resolves once the scope is cancelled.
    pub async fn cancelled(&self) {
        self.cancellation.cancelled().await;
    }

    /// Cancels the scope. Driven by the subscription layer on shutdown or
    /// per-dispatch timeout.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Creates a child scope that is cancelled whenever this one is.
    pub fn child(&self) -> Self {
        Self {
            cancellation: self.cancellation.child_token(),
        }
    }

    /// Returns the underlying cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.cancellation
    }
}
