//! Composition root: wiring registries into a sealed, dispatch-ready
//! consumer.

use std::sync::Arc;

use switchboard_core::{ErasedPayload, MessageKind, Payload, RegistryError, TypeRegistry};
use switchboard_dispatch::{Dispatcher, Handler, HandlerRegistry, TracedDispatcher};
use tracing::debug;

use crate::config::{BrokerConfig, ConfigError, ConfigResult};

/// Builder enforcing the registration lifecycle:
/// construct → register factories → register handlers → seal.
///
/// Handlers reference kinds by type, and binding a handler whose kind has
/// no registered factory is rejected with
/// [`RegistryError::UnknownKind`] — so the "factories before handlers"
/// ordering of the registration API holds by construction. Every error
/// here is a configuration defect: the process should refuse to start
/// rather than consume with an incomplete routing table.
///
/// ```rust,ignore
/// let consumer = Consumer::builder()
///     .register_kind::<Sensor>()?
///     .register_kind::<SensorBatch>()?
///     .register_handler::<Sensor, _>("logger.sensor.instance", store_sensor)?
///     .register_handler::<SensorBatch, _>("logger.sensor.ts", store_readings)?
///     .build();
/// ```
#[derive(Default)]
pub struct ConsumerBuilder {
    types: TypeRegistry,
    handlers: HandlerRegistry,
}

impl ConsumerBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the zero-value factory for `T::KIND`.
    pub fn register_kind<T: Payload + Default>(mut self) -> Result<Self, RegistryError> {
        self.types.register::<T>()?;
        Ok(self)
    }

    /// Binds a handler for `(topic, T::KIND)`.
    ///
    /// `T` must have been registered via
    /// [`register_kind`](Self::register_kind) first.
    pub fn register_handler<T, H>(
        mut self,
        topic: impl Into<String>,
        handler: H,
    ) -> Result<Self, RegistryError>
    where
        T: Payload,
        H: Handler<T>,
    {
        if !self.types.contains(T::KIND) {
            return Err(RegistryError::UnknownKind { kind: T::KIND });
        }
        self.handlers.register::<T, H>(topic, handler)?;
        Ok(self)
    }

    /// Seals both registries and produces the consumer.
    ///
    /// After this point no registration is possible; the registries are
    /// shared read-only across concurrent dispatches.
    pub fn build(mut self) -> Consumer {
        self.types.seal();
        self.handlers.seal();

        let types = Arc::new(self.types);
        let handlers = Arc::new(self.handlers);
        let dispatcher = Dispatcher::new(Arc::clone(&types), Arc::clone(&handlers));

        debug!(
            kinds = types.len(),
            bindings = handlers.len(),
            "consumer sealed"
        );

        Consumer {
            types,
            handlers,
            dispatcher,
        }
    }
}

/// A sealed dispatch pipeline, ready to be driven by a subscription layer.
///
/// The subscription layer obtains per-kind factories via
/// [`instantiate`](Self::instantiate) *before* subscribing (so broker-level
/// deserialization produces the right shape), subscribes to the
/// [`subscriptions`](Self::subscriptions) this consumer is bound for, and
/// calls [`Dispatcher::dispatch`] once per delivery.
pub struct Consumer {
    types: Arc<TypeRegistry>,
    handlers: Arc<HandlerRegistry>,
    dispatcher: Dispatcher,
}

impl Consumer {
    /// Starts a builder.
    pub fn builder() -> ConsumerBuilder {
        ConsumerBuilder::new()
    }

    /// Returns the dispatch entry point.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Returns a dispatcher wrapped with per-dispatch tracing spans.
    pub fn traced_dispatcher(&self) -> TracedDispatcher {
        TracedDispatcher::new(self.dispatcher.clone())
    }

    /// Materializes a fresh zero value for `kind`.
    pub fn instantiate(&self, kind: MessageKind) -> Result<Box<dyn ErasedPayload>, RegistryError> {
        self.types.instantiate(kind)
    }

    /// The `(topic, kind)` pairs the subscription layer should consume.
    pub fn subscriptions(&self) -> Vec<(String, MessageKind)> {
        self.handlers
            .bindings()
            .map(|(topic, kind)| (topic.to_string(), kind))
            .collect()
    }

    /// Cross-checks the declared broker subscriptions against the
    /// registered bindings.
    ///
    /// Every subscription in the configuration must have a matching
    /// handler binding; a mismatch means a typo on one side or the other
    /// and is fatal before the first dispatch.
    pub fn verify_subscriptions(&self, broker: &BrokerConfig) -> ConfigResult<()> {
        for sub in &broker.subscriptions {
            let bound = self
                .handlers
                .bindings()
                .any(|(topic, kind)| topic == sub.topic && kind == sub.kind.as_str());
            if !bound {
                return Err(ConfigError::UnboundSubscription {
                    topic: sub.topic.clone(),
                    kind: sub.kind.clone(),
                });
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Consumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Consumer")
            .field("kinds", &self.types.len())
            .field("bindings", &self.handlers.len())
            .finish()
    }
}
