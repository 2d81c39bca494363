//! Payload traits: strongly-typed schemas and their object-safe erasure.
//!
//! Broker-facing code cannot be generic over every payload shape, so values
//! cross that boundary as `Box<dyn ErasedPayload>`. Typed handlers recover
//! the concrete type with a checked downcast — narrowing against the closed
//! set of registered shapes rather than an open-ended runtime inspection.

use std::any::Any;
use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::kind::MessageKind;

/// A strongly-typed broker payload.
///
/// Implemented by every schema the dispatch layer carries. Two wire shapes
/// are supported end-to-end: a single structured record, and an ordered
/// batch of records sharing one schema (typically a newtype over `Vec<R>`
/// with `#[serde(transparent)]`).
pub trait Payload: Serialize + DeserializeOwned + Debug + Send + Sync + 'static {
    /// The kind this payload shape is registered under.
    ///
    /// Must be unique within a [`TypeRegistry`](crate::registry::TypeRegistry).
    const KIND: MessageKind;
}

/// Object-safe erasure of [`Payload`].
///
/// Implemented for every `Payload` via a blanket impl; user code never
/// implements this directly.
pub trait ErasedPayload: Any + Debug + Send + Sync {
    /// The kind of the concrete value behind the erasure.
    fn kind(&self) -> MessageKind;

    /// Borrowing downcast hook.
    fn as_any(&self) -> &dyn Any;

    /// Consuming downcast hook.
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;

    /// Projects the value into its JSON wire form.
    fn to_json(&self) -> Result<serde_json::Value, serde_json::Error>;
}

impl<T: Payload> ErasedPayload for T {
    fn kind(&self) -> MessageKind {
        T::KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }

    fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Attempts to recover the concrete payload type from an erased value.
///
/// On mismatch the erased value is handed back untouched so the caller can
/// report its observed kind; nothing is coerced or dropped.
pub fn downcast_payload<T: Payload>(
    payload: Box<dyn ErasedPayload>,
) -> Result<T, Box<dyn ErasedPayload>> {
    if payload.as_any().is::<T>() {
        // Infallible: the concrete type was just checked.
        Ok(*payload
            .into_any()
            .downcast::<T>()
            .expect("type checked via is::<T>"))
    } else {
        Err(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Sensor {
        id: u64,
        name: String,
    }

    impl Payload for Sensor {
        const KIND: MessageKind = MessageKind::new("Sensor");
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(transparent)]
    struct SensorBatch(Vec<Sensor>);

    impl Payload for SensorBatch {
        const KIND: MessageKind = MessageKind::new("SensorBatch");
    }

    #[test]
    fn erased_kind_reports_concrete_type() {
        let erased: Box<dyn ErasedPayload> = Box::new(Sensor {
            id: 1,
            name: "t1".into(),
        });
        assert_eq!(erased.kind(), Sensor::KIND);
    }

    #[test]
    fn downcast_recovers_value() {
        let sensor = Sensor {
            id: 7,
            name: "hall".into(),
        };
        let erased: Box<dyn ErasedPayload> = Box::new(sensor.clone());
        let recovered = downcast_payload::<Sensor>(erased).unwrap();
        assert_eq!(recovered, sensor);
    }

    #[test]
    fn downcast_mismatch_returns_original() {
        let erased: Box<dyn ErasedPayload> = Box::new(SensorBatch::default());
        let err = downcast_payload::<Sensor>(erased).unwrap_err();
        assert_eq!(err.kind(), SensorBatch::KIND);
    }

    #[test]
    fn to_json_projects_fields() {
        let erased: Box<dyn ErasedPayload> = Box::new(Sensor {
            id: 2,
            name: "flow".into(),
        });
        let value = erased.to_json().unwrap();
        assert_eq!(value["id"], 2);
        assert_eq!(value["name"], "flow");
    }
}
