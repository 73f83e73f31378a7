//! Conversions between masks and external representations.
//!
//! Three boundary forms are supported:
//! - a sequence of field names, always read as an include mask
//! - a marker map (`{field: 0|1}`), the canonical wire form
//! - dynamic `serde_json::Value`s carrying either of the above
//!
//! Fallible conversions go through [`TryFrom`]; the serde `Deserialize` impl
//! accepts both forms so a mask field in a larger config or request type
//! works without a wrapper.

use crate::{Error, FieldMask, Result};
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Collecting field names yields an include mask.
impl<S: Into<String>> FromIterator<S> for FieldMask {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::include(iter)
    }
}

/// Bulk insertion into the entry set, the iterator form of [`FieldMask::add`].
impl<S: Into<String>> Extend<S> for FieldMask {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for field in iter {
            self.add(field);
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn marker_from_json(field: &str, value: &Value) -> Result<u8> {
    let invalid = || Error::InvalidMarker {
        field: field.to_owned(),
        value: value.to_string(),
    };
    match value {
        Value::Bool(b) => Ok(u8::from(*b)),
        Value::Number(n) => match n.as_u64() {
            Some(m @ (0 | 1)) => Ok(m as u8),
            _ => Err(invalid()),
        },
        _ => Err(invalid()),
    }
}

impl TryFrom<&Value> for FieldMask {
    type Error = Error;

    /// Reads a mask from a dynamic JSON value.
    ///
    /// An array of strings becomes an include mask. An object is read as a
    /// marker map, where `1`/`true` mark include entries and `0`/`false`
    /// mark exclude entries; the markers must be uniform. Any other value
    /// is rejected.
    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => {
                let mut mask = FieldMask::new();
                for item in items {
                    match item {
                        Value::String(field) => {
                            mask.add(field.clone());
                        }
                        other => {
                            return Err(Error::UnsupportedValue {
                                kind: json_kind(other),
                            });
                        }
                    }
                }
                Ok(mask)
            }
            Value::Object(map) => {
                let mut markers = Vec::with_capacity(map.len());
                for (field, value) in map {
                    markers.push((field.clone(), marker_from_json(field, value)?));
                }
                FieldMask::from_markers(markers)
            }
            other => Err(Error::UnsupportedValue {
                kind: json_kind(other),
            }),
        }
    }
}

impl TryFrom<Value> for FieldMask {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::try_from(&value)
    }
}

/// Serializes as the marker map, matching [`FieldMask::markers`].
impl Serialize for FieldMask {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let marker = self.mode().marker();
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for field in self.entries() {
            map.serialize_entry(field, &marker)?;
        }
        map.end()
    }
}

/// Deserializes from either a sequence of field names (include mask) or a
/// marker map. Non-uniform markers fail deserialization.
impl<'de> Deserialize<'de> for FieldMask {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MaskVisitor;

        impl<'de> Visitor<'de> for MaskVisitor {
            type Value = FieldMask;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a sequence of field names or a map of 0/1 field markers")
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<FieldMask, A::Error> {
                let mut mask = FieldMask::new();
                while let Some(field) = seq.next_element::<String>()? {
                    mask.add(field);
                }
                Ok(mask)
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<FieldMask, A::Error> {
                let mut markers = Vec::new();
                while let Some(entry) = map.next_entry::<String, u8>()? {
                    markers.push(entry);
                }
                FieldMask::from_markers(markers).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(MaskVisitor)
    }
}
