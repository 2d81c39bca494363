//! # Switchboard Core
//!
//! Data model and leaf components for the Switchboard dispatch layer:
//!
//! - [`MessageKind`]: identifier for a logical payload schema
//! - [`Payload`] / [`ErasedPayload`]: strongly-typed payloads and their
//!   object-safe erasure
//! - [`InboundEvent`]: one broker delivery as handed over by the
//!   subscription layer
//! - [`TypeRegistry`]: kind → zero-value factory / decoder table
//! - [`PayloadCodec`]: JSON wire codec over the registry
//!
//! The dispatch loop itself lives in `switchboard-dispatch`; this crate is
//! deliberately free of async machinery so the data model can be shared by
//! broker-facing code without pulling in a runtime.

pub mod codec;
pub mod error;
pub mod event;
pub mod kind;
pub mod payload;
pub mod registry;

pub use codec::PayloadCodec;
pub use error::{DecodeError, EncodeError, RegistryError};
pub use event::{Delivery, EventBody, Headers, InboundEvent};
pub use kind::MessageKind;
pub use payload::{ErasedPayload, Payload, downcast_payload};
pub use registry::TypeRegistry;
