//! Dimension configuration management.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── presets    # Preset, PresetConfiguration, ResolutionConfig
//! ├── error      # ConfigError
//! ├── handle     # Global config handle (arc-swap)
//! └── mod.rs     # DimensionConfig (this file)
//! ```
//!
//! # File format
//!
//! ```toml
//! uri_path_segment_delimiter = "-"
//! support_empty_segment = false
//!
//! [[dimension]]
//! name = "language"
//! default_preset = "en"
//!
//! [dimension.resolution]
//! mode = "subdomain"
//!
//! [[dimension.preset]]
//! identifier = "en"
//! values = ["en"]
//! resolution_value = "en"
//! ```

mod error;
mod handle;
mod presets;

pub use error::ConfigError;
pub use handle::{CONFIG, cfg, init_config};
pub use presets::{
    DimensionDeclaration, Preset, PresetConfiguration, ResolutionConfig, ResolutionOptions,
};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::detection::resolve_detector;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration: the ordered dimension declarations plus global
/// resolution settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionConfig {
    /// Ordered dimension declarations. Declaration order is the tie-break
    /// for detection and the application order for link processors.
    #[serde(default, rename = "dimension")]
    pub dimensions: Vec<DimensionDeclaration>,

    /// Delimiter injected into path-segment detection, overriding
    /// per-dimension delimiters.
    #[serde(default)]
    pub uri_path_segment_delimiter: Option<String>,

    /// Global fallback for legacy configurations lacking explicit options:
    /// tolerate missing path segments by using the default preset.
    #[serde(default)]
    pub support_empty_segment: bool,
}

impl DimensionConfig {
    /// Load and validate a dimension configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a dimension configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// All dimension declarations in declaration order.
    pub fn dimensions(&self) -> &[DimensionDeclaration] {
        &self.dimensions
    }

    /// Look up a dimension by name.
    pub fn dimension(&self, name: &str) -> Option<&DimensionDeclaration> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    /// Validate the configuration.
    ///
    /// Unknown resolution modes fail here rather than at first use, and the
    /// default preset of every dimension must actually exist.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = FxHashSet::default();
        for declaration in &self.dimensions {
            if !names.insert(declaration.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "dimension `{}` is declared more than once",
                    declaration.name
                )));
            }

            resolve_detector(&declaration.name, &declaration.config.resolution.mode)?;

            let mut identifiers = FxHashSet::default();
            for preset in &declaration.config.presets {
                if !identifiers.insert(preset.identifier.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "dimension `{}` declares preset `{}` more than once",
                        declaration.name, preset.identifier
                    )));
                }
            }

            if !declaration.config.default_preset.is_empty()
                && declaration.config.default_preset().is_none()
            {
                return Err(ConfigError::Validation(format!(
                    "dimension `{}` names default preset `{}`, which does not exist",
                    declaration.name, declaration.config.default_preset
                )));
            }
        }
        Ok(())
    }
}
