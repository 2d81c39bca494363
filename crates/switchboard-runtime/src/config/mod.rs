//! Configuration module for the Switchboard runtime.
//!
//! Layered loading (defaults → profile file → main file → environment
//! variables) with schema validation for broker subscriptions and logging.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    BrokerConfig, LogFormat, LogLevel, LogOutput, LoggingConfig, SubscriptionConfig,
    SwitchboardConfig,
};
pub use validation::validate_config;
