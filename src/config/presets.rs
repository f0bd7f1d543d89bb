//! Dimension preset configuration types.

use serde::{Deserialize, Serialize};

use crate::detection::MODE_URI_PATH_SEGMENT;

/// One allowed coordinate on a dimension.
///
/// `values` is the ordered value sequence, most-specific first
/// (e.g. `["en_UK", "en"]`). `resolution_value` and `resolution_host`
/// drive request-time detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Preset identifier, unique within its dimension.
    pub identifier: String,
    /// Value sequence selected by this preset.
    pub values: Vec<String>,
    /// Value matched against the request (path segment, subdomain, TLD).
    #[serde(default)]
    pub resolution_value: String,
    /// Optional host constraint; presence changes detector behavior.
    #[serde(default)]
    pub resolution_host: Option<String>,
}

/// How a dimension is recovered from a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Resolution mode name; validated against the detector registry.
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Explicit detector options. Absent for legacy configurations, which
    /// get options synthesized by the orchestrator.
    #[serde(default)]
    pub options: Option<ResolutionOptions>,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            options: None,
        }
    }
}

fn default_mode() -> String {
    MODE_URI_PATH_SEGMENT.to_string()
}

/// Detector options as configured per dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionOptions {
    /// Position among path-segment-resolved dimensions; also the sort key
    /// for detection order.
    #[serde(default)]
    pub offset: Option<usize>,
    /// Delimiter separating multiple dimension codes in one path segment.
    #[serde(default)]
    pub delimiter: Option<String>,
    /// Tolerate a missing segment by falling back to the default preset.
    #[serde(default)]
    pub allow_empty_value: Option<bool>,
    /// Preset to fall back to under `allow_empty_value`; defaults to the
    /// dimension's `default_preset`.
    #[serde(default)]
    pub default_preset_identifier: Option<String>,
}

/// Per-dimension preset bundle: the presets, the default preset identifier
/// and the resolution descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetConfiguration {
    /// Identifier of the preset to fall back to.
    pub default_preset: String,
    /// Resolution mode and options.
    #[serde(default)]
    pub resolution: ResolutionConfig,
    /// Ordered presets; iteration order decides detection ties.
    #[serde(default, rename = "preset")]
    pub presets: Vec<Preset>,
}

impl PresetConfiguration {
    /// Look up a preset by identifier.
    pub fn preset(&self, identifier: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.identifier == identifier)
    }

    /// Look up the preset whose value sequence equals `values`.
    pub fn preset_by_values(&self, values: &[String]) -> Option<&Preset> {
        self.presets.iter().find(|p| p.values == values)
    }

    /// The default preset, if its identifier is configured and exists.
    pub fn default_preset(&self) -> Option<&Preset> {
        if self.default_preset.is_empty() {
            return None;
        }
        self.preset(&self.default_preset)
    }
}

/// A named dimension with its preset configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionDeclaration {
    /// Dimension name, e.g. `language`.
    pub name: String,
    #[serde(flatten)]
    pub config: PresetConfiguration,
}
