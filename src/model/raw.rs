use serde::Deserialize;
use serde_json::Value;

/// A map exactly as it came out of the JSON decoder.
///
/// Nothing about its shape is trusted yet: the payload may not even be an
/// object. The only way to turn it into a
/// [`GridDocument`](crate::model::GridDocument) is
/// [`processor::validator::validate`](crate::processor::validator::validate).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawDocument {
    pub raw: Value,
}

impl RawDocument {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// The `grid` entry, if the payload is an object carrying one.
    pub fn grid(&self) -> Option<&Value> {
        self.raw.get("grid")
    }

    /// The `enemies` entry; absent is the same as an empty list.
    pub fn enemies(&self) -> Option<&Value> {
        self.raw.get("enemies").filter(|v| !v.is_null())
    }
}
