//! # Switchboard Dispatch
//!
//! The behavioral heart of the Switchboard message layer: receives one
//! inbound broker event at a time, decodes or narrows its payload, resolves
//! the handler bound for the (topic, kind) pair, and translates the handler
//! outcome into the success/failure signal the subscription layer acts on.
//!
//! ```text
//! broker ─▶ subscription ─▶ Dispatcher ─▶ codec / narrowing
//!                              │
//!                              ▼
//!                       HandlerRegistry ─▶ domain handler
//!                              │
//!                              ▼
//!                   ack / retry decision (subscription layer)
//! ```
//!
//! The dispatcher is stateless between invocations and adds no retry policy
//! of its own; the only stateful collaborators are the sealed
//! [`TypeRegistry`](switchboard_core::TypeRegistry) and [`HandlerRegistry`].
//! It also never logs — observability lives in
//! [`TracedDispatcher`](middleware::TracedDispatcher).

pub mod context;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod registry;

pub use context::DispatchContext;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchResult, HandlerFailure};
pub use handler::{BoxFuture, ErasedHandler, Handler, TypedHandler, into_handler};
pub use middleware::TracedDispatcher;
pub use registry::HandlerRegistry;
