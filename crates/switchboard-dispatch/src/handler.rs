//! Handler traits and type-erased handler storage.
//!
//! Handlers are plain async functions over `(context, topic, headers,
//! payload)` returning success or a typed failure. The registry stores them
//! type-erased behind `Arc<dyn ErasedHandler>`; [`TypedHandler`] is the
//! bridge that narrows the erased payload back to the concrete type with a
//! checked downcast before the user function ever runs.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::future;
use switchboard_core::{ErasedPayload, Headers, MessageKind, Payload, downcast_payload};

use crate::context::DispatchContext;
use crate::error::{DispatchError, DispatchResult};

/// A type alias for a boxed, pinned future that is `Send`.
pub type BoxFuture<'a, T> = futures::future::BoxFuture<'a, T>;

// ============================================================================
// Handler Trait
// ============================================================================

/// A domain handler for payloads of type `T`.
///
/// # Blanket Implementation
///
/// Automatically implemented for async functions and closures of the shape:
///
/// ```rust,ignore
/// async fn handle(
///     ctx: DispatchContext,
///     topic: String,
///     headers: Headers,
///     payload: Sensor,
/// ) -> DispatchResult<()> {
///     // domain work
///     Ok(())
/// }
/// ```
///
/// The handler owns its captured state; the registry holds it behind `Arc`
/// and never copies that state per dispatch.
pub trait Handler<T: Payload>: Send + Sync + 'static {
    /// Calls the handler with the narrowed payload.
    fn call(
        &self,
        ctx: DispatchContext,
        topic: String,
        headers: Headers,
        payload: T,
    ) -> BoxFuture<'static, DispatchResult<()>>;
}

impl<T, F, Fut> Handler<T> for F
where
    T: Payload,
    F: Fn(DispatchContext, String, Headers, T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = DispatchResult<()>> + Send + 'static,
{
    fn call(
        &self,
        ctx: DispatchContext,
        topic: String,
        headers: Headers,
        payload: T,
    ) -> BoxFuture<'static, DispatchResult<()>> {
        Box::pin((self)(ctx, topic, headers, payload))
    }
}

// ============================================================================
// Type-erased handlers
// ============================================================================

/// Type-erased handler stored by the
/// [`HandlerRegistry`](crate::registry::HandlerRegistry).
pub trait ErasedHandler: Send + Sync {
    /// The kind the wrapped handler expects; used for mismatch diagnostics.
    fn expected_kind(&self) -> MessageKind;

    /// Narrows the erased payload and executes the handler.
    fn call(
        &self,
        ctx: DispatchContext,
        topic: String,
        headers: Headers,
        payload: Box<dyn ErasedPayload>,
    ) -> BoxFuture<'static, DispatchResult<()>>;
}

/// Wrapper that narrows the erased payload before calling the typed
/// handler.
///
/// Narrowing is a checked downcast against the closed set of registered
/// shapes: a body whose concrete type disagrees with the bound kind fails
/// with [`DispatchError::PayloadTypeMismatch`] and the inner handler is
/// never invoked.
pub struct TypedHandler<H, T> {
    inner: H,
    _marker: PhantomData<fn(T)>,
}

impl<H, T> TypedHandler<H, T> {
    /// Wraps a typed handler for erased storage.
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<H, T> ErasedHandler for TypedHandler<H, T>
where
    H: Handler<T>,
    T: Payload,
{
    fn expected_kind(&self) -> MessageKind {
        T::KIND
    }

    fn call(
        &self,
        ctx: DispatchContext,
        topic: String,
        headers: Headers,
        payload: Box<dyn ErasedPayload>,
    ) -> BoxFuture<'static, DispatchResult<()>> {
        let observed = payload.kind();
        match downcast_payload::<T>(payload) {
            Ok(typed) => self.inner.call(ctx, topic, headers, typed),
            Err(_) => Box::pin(future::ready(Err(DispatchError::PayloadTypeMismatch {
                expected: T::KIND,
                observed,
            }))),
        }
    }
}

/// Erases a typed handler for storage in the handler registry.
pub fn into_handler<T, H>(handler: H) -> Arc<dyn ErasedHandler>
where
    T: Payload,
    H: Handler<T>,
{
    Arc::new(TypedHandler::new(handler))
}
