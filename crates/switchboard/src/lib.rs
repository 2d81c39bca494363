//! # Switchboard
//!
//! A typed message-dispatch layer between a broker subscription and the
//! domain handlers that consume it.
//!
//! ## Overview
//!
//! Switchboard turns raw broker deliveries into strongly-typed payloads and
//! routes them to exactly one handler per `(topic, kind)` binding. The
//! routing table is built once at startup and sealed before the first
//! delivery, so dispatch itself is lock-free and safe under concurrency.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌───────────────────────────┐
//! │ Subscription │────▶│  Dispatcher  │────▶│ handler(topic A, kind X)  │──▶ domain
//! │    layer     │     │ codec+lookup │────▶│ handler(topic B, kind Y)  │──▶ domain
//! └──────────────┘     └──────────────┘────▶│ handler ...               │──▶ domain
//!                                           └───────────────────────────┘
//! ```
//!
//! - **TypeRegistry**: maps message kinds to payload factories and decoders
//! - **PayloadCodec**: JSON wire format in and out of erased payloads
//! - **HandlerRegistry**: one async handler per `(topic, kind)` binding
//! - **Dispatcher**: resolves the handler, decodes the body, awaits the call
//! - **Consumer**: composition root enforcing the register-then-seal lifecycle
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use switchboard::prelude::*;
//!
//! #[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
//! struct Sensor { id: u64, name: String }
//!
//! impl Payload for Sensor {
//!     const KIND: MessageKind = MessageKind::new("Sensor");
//! }
//!
//! async fn store_sensor(
//!     _ctx: DispatchContext,
//!     _topic: String,
//!     _headers: Headers,
//!     sensor: Sensor,
//! ) -> DispatchResult<()> {
//!     tracing::info!(id = sensor.id, "sensor stored");
//!     Ok(())
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = switchboard::runtime::config::load_config()?;
//!     switchboard::runtime::logging::init_from_config(&config.logging);
//!
//!     let consumer = Consumer::builder()
//!         .register_kind::<Sensor>()?
//!         .register_handler::<Sensor, _>("logger.sensor.instance", store_sensor)?
//!         .build();
//!     consumer.verify_subscriptions(&config.broker)?;
//!
//!     // hand `consumer.dispatcher()` to the subscription layer
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: structured JSON log output

pub use switchboard_core as core;
pub use switchboard_dispatch as dispatch;
pub use switchboard_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use switchboard::prelude::*;
/// ```
pub mod prelude {
    // Composition root - main entry point
    pub use switchboard_runtime::{Consumer, ConsumerBuilder};

    // Payload model - for declaring message kinds
    pub use switchboard_core::{
        ErasedPayload, Headers, InboundEvent, MessageKind, Payload, PayloadCodec, TypeRegistry,
    };

    // Dispatch - for writing handlers
    pub use switchboard_dispatch::{
        DispatchContext, DispatchError, DispatchResult, Dispatcher, Handler, HandlerRegistry,
        TracedDispatcher,
    };

    // Error taxonomy
    pub use switchboard_core::{DecodeError, EncodeError, RegistryError};
}
