//! The field mask value type and its set algebra.
//!
//! A mask is a plain owned value: a mode tag plus a set of field names.
//! Everything except [`FieldMask::add`] is a pure function returning a new
//! mask, so masks clone and compare cheaply and can be shared read-only
//! across threads.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// How a mask's entry set is interpreted.
///
/// - [`Include`](MaskMode::Include): a field is selected iff it is listed.
/// - [`Exclude`](MaskMode::Exclude): a field is selected iff it is not listed.
///
/// An empty include mask selects nothing; an empty exclude mask selects
/// everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskMode {
    Include,
    Exclude,
}

impl MaskMode {
    /// The wire marker for entries of this mode: `1` for include, `0` for exclude.
    #[must_use]
    pub const fn marker(self) -> u8 {
        match self {
            Self::Include => 1,
            Self::Exclude => 0,
        }
    }

    /// Reads a mode back from a wire marker. Only `0` and `1` are valid.
    #[must_use]
    pub const fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            1 => Some(Self::Include),
            0 => Some(Self::Exclude),
            _ => None,
        }
    }

    /// The opposite mode.
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            Self::Include => Self::Exclude,
            Self::Exclude => Self::Include,
        }
    }
}

impl Default for MaskMode {
    fn default() -> Self {
        Self::Include
    }
}

impl fmt::Display for MaskMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Include => f.write_str("include"),
            Self::Exclude => f.write_str("exclude"),
        }
    }
}

/// A set of field names paired with a [`MaskMode`].
///
/// Equality is structural: same mode and same entry set, independent of
/// insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMask {
    mode: MaskMode,
    entries: BTreeSet<String>,
}

impl FieldMask {
    /// Creates an empty include mask (selects nothing).
    #[must_use]
    pub fn new() -> Self {
        Self::with_mode(MaskMode::Include)
    }

    /// Creates an empty mask of the given mode.
    #[must_use]
    pub fn with_mode(mode: MaskMode) -> Self {
        Self {
            mode,
            entries: BTreeSet::new(),
        }
    }

    /// Creates an include mask listing the given fields. Duplicates collapse.
    #[must_use]
    pub fn include<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode: MaskMode::Include,
            entries: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an exclude mask listing the given fields. Duplicates collapse.
    #[must_use]
    pub fn exclude<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode: MaskMode::Exclude,
            entries: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a mask from `(field, marker)` pairs, the wire form produced by
    /// [`markers`](Self::markers).
    ///
    /// All markers must agree: uniform `1`s give an include mask, uniform
    /// `0`s an exclude mask. An empty input gives an empty include mask.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidMarker`] if a marker is neither `0` nor `1`, and
    /// [`Error::MixedMarkers`] if both marker values occur.
    pub fn from_markers<I, S>(markers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u8)>,
        S: Into<String>,
    {
        let mut mode = None;
        let mut entries = BTreeSet::new();
        for (field, marker) in markers {
            let field = field.into();
            let marker_mode = MaskMode::from_marker(marker).ok_or_else(|| Error::InvalidMarker {
                field: field.clone(),
                value: marker.to_string(),
            })?;
            match mode {
                None => mode = Some(marker_mode),
                Some(seen) if seen != marker_mode => return Err(Error::MixedMarkers),
                Some(_) => {}
            }
            entries.insert(field);
        }
        Ok(Self {
            mode: mode.unwrap_or(MaskMode::Include),
            entries,
        })
    }

    /// Returns the mask's mode.
    #[must_use]
    pub fn mode(&self) -> MaskMode {
        self.mode
    }

    /// Returns the number of listed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no fields are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the listed field names in sorted order.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Raw set membership, ignoring the mode.
    #[must_use]
    pub fn contains_entry(&self, field: &str) -> bool {
        self.entries.contains(field)
    }

    /// Inserts a field into the entry set. Re-adding an existing field is a
    /// no-op. This is the only mutating operation on a mask.
    pub fn add(&mut self, field: impl Into<String>) -> &mut Self {
        self.entries.insert(field.into());
        self
    }

    /// Returns true if the mask selects `field`.
    ///
    /// Include mode selects listed fields; exclude mode selects unlisted ones.
    #[must_use]
    pub fn includes(&self, field: &str) -> bool {
        match self.mode {
            MaskMode::Include => self.entries.contains(field),
            MaskMode::Exclude => !self.entries.contains(field),
        }
    }

    /// Returns true if the mask does not select `field`.
    #[must_use]
    pub fn excludes(&self, field: &str) -> bool {
        !self.includes(field)
    }

    /// The wire form: each listed field mapped to this mode's marker.
    ///
    /// Feeding the result back through [`from_markers`](Self::from_markers)
    /// reproduces the mask, except that an empty exclude mask comes back as
    /// an empty include mask (an empty marker map carries no mode).
    #[must_use]
    pub fn markers(&self) -> BTreeMap<String, u8> {
        let marker = self.mode.marker();
        self.entries
            .iter()
            .map(|field| (field.clone(), marker))
            .collect()
    }

    /// Flips the mode, keeping the entry set. Inverts the selection
    /// predicate; applying `negate` twice gives back an equal mask.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            mode: self.mode.inverted(),
            entries: self.entries.clone(),
        }
    }

    /// Union-like combination: the result selects at least whatever either
    /// operand selects, biased toward `self`'s mode.
    ///
    /// - (Include, Include): include the union of both entry sets.
    /// - (Include, Exclude): `self` unchanged; an exclude set cannot be
    ///   merged into a finite include set without losing meaning.
    /// - (Exclude, _): exclude `self`'s entries minus any field the other
    ///   mask selects, so joining can only make an exclude mask more
    ///   permissive.
    #[must_use]
    pub fn join(&self, other: &FieldMask) -> Self {
        match self.mode {
            MaskMode::Include => {
                let mut entries = self.entries.clone();
                if other.mode == MaskMode::Include {
                    entries.extend(other.entries.iter().cloned());
                }
                Self {
                    mode: MaskMode::Include,
                    entries,
                }
            }
            MaskMode::Exclude => Self {
                mode: MaskMode::Exclude,
                entries: self
                    .entries
                    .iter()
                    .filter(|field| !other.includes(field))
                    .cloned()
                    .collect(),
            },
        }
    }

    /// Restrictive combination: the result selects only what both operands
    /// select, biased toward `self`'s mode. Dual to [`join`](Self::join).
    ///
    /// - (Include, _): keep only `self`'s entries that the other mask also
    ///   selects.
    /// - (Exclude, Exclude): exclude the union of both entry sets.
    /// - (Exclude, Include): `self` unchanged, mirroring join's
    ///   (Include, Exclude) case.
    #[must_use]
    pub fn intersect(&self, other: &FieldMask) -> Self {
        match self.mode {
            MaskMode::Include => Self {
                mode: MaskMode::Include,
                entries: self
                    .entries
                    .iter()
                    .filter(|field| other.includes(field))
                    .cloned()
                    .collect(),
            },
            MaskMode::Exclude => {
                let mut entries = self.entries.clone();
                if other.mode == MaskMode::Exclude {
                    entries.extend(other.entries.iter().cloned());
                }
                Self {
                    mode: MaskMode::Exclude,
                    entries,
                }
            }
        }
    }

    /// Projects the mask onto a record, keeping exactly the pairs whose key
    /// the mask selects.
    ///
    /// The record is consumed so retained values move into the result with
    /// no copying; clone the record first if the original is still needed.
    /// Works with any map-like collection of `(key, value)` pairs, including
    /// `BTreeMap`, `HashMap`, and `serde_json::Map`.
    pub fn apply<K, V, R>(&self, record: R) -> R
    where
        R: IntoIterator<Item = (K, V)> + FromIterator<(K, V)>,
        K: AsRef<str>,
    {
        record
            .into_iter()
            .filter(|(key, _)| self.includes(key.as_ref()))
            .collect()
    }
}

impl Default for FieldMask {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FieldMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.mode)?;
        for (i, field) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(field)?;
        }
        f.write_str(")")
    }
}
