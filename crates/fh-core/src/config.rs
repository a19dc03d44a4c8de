//! Command configuration
//!
//! Size table, dialog defaults, resolver policy and the names given to the
//! created component, sketches, features and history group. Stored as RON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{SizeCatalog, SizeEntry, SizeKey};
use crate::command::{AnchorKind, CommandInputs, HeadKind};
use crate::constants::*;
use crate::error::FastenerResult;
use crate::planner::CutKind;
use crate::resolver::ResolvePolicy;

/// Names of everything the command creates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NamingConfig {
    pub component: String,
    pub group: String,
    pub bore_sketch: String,
    pub head_sketch: String,
    pub anchor_sketch: String,
    pub bore_feature: String,
    pub head_feature: String,
    pub anchor_feature: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            component: COMPONENT_NAME.to_string(),
            group: GROUP_NAME.to_string(),
            bore_sketch: BORE_SKETCH_NAME.to_string(),
            head_sketch: HEAD_SKETCH_NAME.to_string(),
            anchor_sketch: ANCHOR_SKETCH_NAME.to_string(),
            bore_feature: BORE_FEATURE_NAME.to_string(),
            head_feature: HEAD_FEATURE_NAME.to_string(),
            anchor_feature: ANCHOR_FEATURE_NAME.to_string(),
        }
    }
}

impl NamingConfig {
    pub fn sketch_name(&self, kind: CutKind) -> &str {
        match kind {
            CutKind::Bore => &self.bore_sketch,
            CutKind::Head => &self.head_sketch,
            CutKind::Anchor => &self.anchor_sketch,
        }
    }

    pub fn feature_name(&self, kind: CutKind) -> &str {
        match kind {
            CutKind::Bore => &self.bore_feature,
            CutKind::Head => &self.head_feature,
            CutKind::Anchor => &self.anchor_feature,
        }
    }
}

/// Dialog values preselected when the command opens
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DefaultsConfig {
    pub size: SizeKey,
    pub head: HeadKind,
    pub anchor: AnchorKind,
    pub invert: bool,
}

/// Complete command configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FastenerConfig {
    /// Size table in dropdown order
    pub sizes: Vec<SizeEntry>,
    pub defaults: DefaultsConfig,
    pub resolve_policy: ResolvePolicy,
    pub naming: NamingConfig,
}

impl Default for FastenerConfig {
    fn default() -> Self {
        Self {
            sizes: SizeCatalog::builtin().entries().to_vec(),
            defaults: DefaultsConfig::default(),
            resolve_policy: ResolvePolicy::default(),
            naming: NamingConfig::default(),
        }
    }
}

impl FastenerConfig {
    /// Validated size catalog
    pub fn catalog(&self) -> FastenerResult<SizeCatalog> {
        SizeCatalog::with_entries(self.sizes.clone())
    }

    /// Dialog state with the configured defaults and no selection
    pub fn default_inputs(&self) -> CommandInputs {
        CommandInputs {
            size: self.defaults.size.clone(),
            head: self.defaults.head,
            anchor: self.defaults.anchor,
            invert: self.defaults.invert,
            ..Default::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_bytes()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// Serialize configuration to RON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Load configuration from RON bytes
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, ConfigError> {
        let content =
            std::str::from_utf8(data).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }
}

/// Configuration file errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SizeSpec;
    use crate::error::FastenerError;
    use tempfile::tempdir;

    #[test]
    fn test_default_matches_builtin() {
        let config = FastenerConfig::default();
        assert_eq!(config.catalog().unwrap(), SizeCatalog::builtin());
        assert_eq!(config.naming.sketch_name(CutKind::Anchor), "anchor");
        assert_eq!(config.naming.feature_name(CutKind::Bore), "cut-bore");
        assert_eq!(config.default_inputs(), CommandInputs::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("fastener.ron");

        let mut config = FastenerConfig::default();
        config.sizes.push(SizeEntry::new("M6", SizeSpec::new(6.0, 10.0, 6.0, 10.0, 5.0)));
        config.defaults.anchor = AnchorKind::None;
        config.resolve_policy = ResolvePolicy::Unique;
        config.save(&path).unwrap();

        let loaded = FastenerConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(loaded.catalog().unwrap().contains(&SizeKey::from("M6")));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config =
            FastenerConfig::load_from_bytes(b"(defaults: (size: \"M5\", invert: true))").unwrap();
        assert_eq!(config.defaults.size.as_str(), "M5");
        assert!(config.defaults.invert);
        assert_eq!(config.defaults.head, HeadKind::Socket);
        assert_eq!(config.sizes.len(), 5);
        assert_eq!(config.naming, NamingConfig::default());
    }

    #[test]
    fn test_invalid_sizes_rejected_by_catalog() {
        let mut config = FastenerConfig::default();
        config.sizes[0].spec.bore_diameter = -1.0;
        assert!(matches!(
            config.catalog(),
            Err(FastenerError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_load_errors() {
        let temp = tempdir().unwrap();
        assert!(matches!(
            FastenerConfig::load(temp.path().join("missing.ron")),
            Err(ConfigError::Io(_))
        ));
        assert!(matches!(
            FastenerConfig::load_from_bytes(b"(sizes: 3)"),
            Err(ConfigError::Deserialize(_))
        ));
    }
}
