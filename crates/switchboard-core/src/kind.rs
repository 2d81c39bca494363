//! Logical message kind identifiers.

use serde::Serialize;

/// Identifier for a logical payload schema, e.g. `"Sensor"` or
/// `"SensorBatch"`.
///
/// Kinds are declared as associated constants on payload types (see
/// [`Payload::KIND`](crate::payload::Payload::KIND)) and must be unique
/// within a [`TypeRegistry`](crate::registry::TypeRegistry). Backing them
/// with `&'static str` keeps them `Copy` and makes comparison at dispatch
/// time a pointer-width equality check in the common interned case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageKind(&'static str);

impl MessageKind {
    /// Declares a new kind identifier.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the kind name.
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl PartialEq<str> for MessageKind {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MessageKind {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
