//! # Switchboard Runtime
//!
//! Composition-root facilities around the dispatch layer:
//!
//! - Layered configuration loading (defaults → file → environment) via
//!   figment, with `toml-config` (default) and `yaml-config` features
//! - Logging bootstrap over `tracing-subscriber`
//! - The [`ConsumerBuilder`] / [`Consumer`] pair enforcing the
//!   construct → register factories → register handlers → seal lifecycle
//!
//! The broker connection itself is out of scope: a subscription layer is
//! expected to obtain factories from the sealed [`Consumer`], subscribe to
//! its bound topics, and drive
//! [`Dispatcher::dispatch`](switchboard_dispatch::Dispatcher::dispatch)
//! once per delivery.
//!
//! ```rust,ignore
//! use switchboard_runtime::{Consumer, config::load_config, logging};
//!
//! let config = load_config()?;
//! logging::init_from_config(&config.logging);
//!
//! let consumer = Consumer::builder()
//!     .register_kind::<Sensor>()?
//!     .register_kind::<SensorBatch>()?
//!     .register_handler::<Sensor, _>("logger.sensor.instance", store_sensor)?
//!     .register_handler::<SensorBatch, _>("logger.sensor.ts", store_readings)?
//!     .build();
//!
//! consumer.verify_subscriptions(&config.broker)?;
//! ```

pub mod config;
pub mod consumer;
pub mod logging;

pub use config::{
    BrokerConfig, ConfigError, ConfigLoader, ConfigResult, LoggingConfig, SwitchboardConfig,
    load_config,
};
pub use consumer::{Consumer, ConsumerBuilder};
pub use logging::LoggingBuilder;

// Re-export tracing for use by composition roots
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
