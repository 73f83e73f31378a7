//! Field masks for selecting or suppressing named fields of a record.
//!
//! A [`FieldMask`] pairs a set of field names with a [`MaskMode`]:
//! - **Include** — the listed fields are selected, everything else is not
//! - **Exclude** — everything is selected except the listed fields
//!
//! Masks combine with [`FieldMask::join`] (union-like, more permissive) and
//! [`FieldMask::intersect`] (restrictive), invert with [`FieldMask::negate`],
//! and project onto records with [`FieldMask::apply`].
//!
//! The wire form is a flat map from field name to a binary marker: `1` for
//! include-mode entries, `0` for exclude-mode entries. A bare sequence of
//! field names is also accepted and always read as an include mask. Both
//! forms are available through `serde` and through `TryFrom<serde_json::Value>`.

mod convert;
mod mask;

pub use mask::{FieldMask, MaskMode};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when constructing a mask from external input.
///
/// Construction is the only fallible path in this crate; every query and
/// algebra operation on an already-built mask is total.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A marker map contained both include (`1`) and exclude (`0`) markers.
    #[error("invalid field mask input: mixed include and exclude markers")]
    MixedMarkers,

    /// A marker was neither `0` nor `1`.
    #[error("invalid field mask input: marker for field `{field}` must be 0 or 1, got {value}")]
    InvalidMarker { field: String, value: String },

    /// The input was not a sequence of field names or a marker map.
    #[error("invalid field mask input: expected a sequence of field names or a marker object, got {kind}")]
    UnsupportedValue { kind: &'static str },
}
