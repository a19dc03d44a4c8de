//! Fastener size catalog
//!
//! Maps a size key such as `M3` to the five lengths needed to cut a bore,
//! a socket-head counterbore and a hex-nut pocket. All lengths are in mm.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SIZE;
use crate::error::{FastenerError, FastenerResult};

/// Key of a catalog entry (e.g. "M3")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeKey(String);

impl SizeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SizeKey {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl From<&str> for SizeKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for SizeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Dimensions of one fastener size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeSpec {
    /// Clearance hole diameter
    pub bore_diameter: f32,
    /// Counterbore diameter for a socket head
    pub socket_diameter: f32,
    /// Counterbore depth for a socket head
    pub socket_length: f32,
    /// Circumscribed diameter of the hex-nut pocket
    pub hex_nut_diameter: f32,
    /// Hex-nut pocket depth
    pub hex_nut_length: f32,
}

impl SizeSpec {
    pub const fn new(
        bore_diameter: f32,
        socket_diameter: f32,
        socket_length: f32,
        hex_nut_diameter: f32,
        hex_nut_length: f32,
    ) -> Self {
        Self {
            bore_diameter,
            socket_diameter,
            socket_length,
            hex_nut_diameter,
            hex_nut_length,
        }
    }

    /// Named fields, in table order
    pub fn fields(&self) -> [(&'static str, f32); 5] {
        [
            ("bore_diameter", self.bore_diameter),
            ("socket_diameter", self.socket_diameter),
            ("socket_length", self.socket_length),
            ("hex_nut_diameter", self.hex_nut_diameter),
            ("hex_nut_length", self.hex_nut_length),
        ]
    }

    /// Check that every length is positive and finite
    pub fn validate(&self, key: &SizeKey) -> FastenerResult<()> {
        for (name, value) in self.fields() {
            if !(value.is_finite() && value > 0.0) {
                return Err(FastenerError::InvalidSize {
                    key: key.to_string(),
                    reason: format!("{} must be positive, got {}", name, value),
                });
            }
        }
        Ok(())
    }
}

/// One row of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeEntry {
    pub key: SizeKey,
    pub spec: SizeSpec,
}

impl SizeEntry {
    pub fn new(key: impl Into<String>, spec: SizeSpec) -> Self {
        Self {
            key: SizeKey::new(key),
            spec,
        }
    }
}

const BUILTIN_SIZES: [(&str, SizeSpec); 5] = [
    ("M5", SizeSpec::new(5.0, 8.5, 5.0, 8.0, 4.0)),
    ("M4", SizeSpec::new(4.0, 7.0, 4.0, 7.0, 3.2)),
    ("M3", SizeSpec::new(3.0, 5.5, 3.0, 5.5, 2.4)),
    ("M2.5", SizeSpec::new(2.5, 4.4, 2.2, 4.8, 2.0)),
    ("M2", SizeSpec::new(2.0, 3.8, 2.0, 4.0, 1.6)),
];

/// Ordered, immutable table of fastener sizes
#[derive(Debug, Clone, PartialEq)]
pub struct SizeCatalog {
    entries: Vec<SizeEntry>,
}

impl Default for SizeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SizeCatalog {
    /// The metric socket-head cap screw table, largest first
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_SIZES
                .iter()
                .map(|(key, spec)| SizeEntry::new(*key, *spec))
                .collect(),
        }
    }

    /// Build a catalog from custom entries, keeping their order
    pub fn with_entries(entries: Vec<SizeEntry>) -> FastenerResult<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            entry.spec.validate(&entry.key)?;
            if !seen.insert(entry.key.clone()) {
                return Err(FastenerError::DuplicateSize(entry.key.to_string()));
            }
        }
        Ok(Self { entries })
    }

    /// Dimensions for a size key
    pub fn lookup(&self, key: &SizeKey) -> FastenerResult<SizeSpec> {
        self.entries
            .iter()
            .find(|e| &e.key == key)
            .map(|e| e.spec)
            .ok_or_else(|| FastenerError::UnknownSizeKind(key.to_string()))
    }

    pub fn contains(&self, key: &SizeKey) -> bool {
        self.entries.iter().any(|e| &e.key == key)
    }

    /// Keys in dropdown order
    pub fn keys(&self) -> impl Iterator<Item = &SizeKey> {
        self.entries.iter().map(|e| &e.key)
    }

    pub fn entries(&self) -> &[SizeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
