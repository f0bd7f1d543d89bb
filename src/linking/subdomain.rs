//! Subdomain link processing.

use crate::config::{Preset, PresetConfiguration};
use crate::core::UriConstraints;

/// Expresses a dimension value as the leading host label.
///
/// The chosen preset's `resolution_value` becomes the host prefix, replacing
/// whichever other preset's label the base URI currently carries. A preset
/// with an empty `resolution_value` strips the label entirely, so the
/// implicit default lives on the bare host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubdomainLinkProcessor;

impl SubdomainLinkProcessor {
    pub fn process(
        &self,
        constraints: UriConstraints,
        configuration: &PresetConfiguration,
        preset: &Preset,
    ) -> UriConstraints {
        let replace: Vec<String> = configuration
            .presets
            .iter()
            .map(|p| p.resolution_value.clone())
            .filter(|value| !value.is_empty())
            .collect();
        let prefix = if preset.resolution_value.is_empty() {
            String::new()
        } else {
            format!("{}.", preset.resolution_value)
        };
        constraints.with_host_prefix(prefix, replace)
    }
}
