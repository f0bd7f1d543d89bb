//! Subdomain-based preset detection.

use crate::config::Preset;
use crate::detection::RequestInfo;

/// Matches a preset whose `resolution_value` is the leading label of the
/// request host.
///
/// Presets with an empty `resolution_value` are skipped; whether an empty
/// value selects a default is the orchestrator's decision, not this
/// detector's. A declared `resolution_host` additionally requires the host
/// remainder after the prefix and one separator character to equal it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubdomainDetector;

impl SubdomainDetector {
    pub fn detect<'a>(&self, presets: &'a [Preset], request: &RequestInfo) -> Option<&'a Preset> {
        let host = request.host();

        presets.iter().find(|preset| {
            if preset.resolution_value.is_empty() {
                return false;
            }
            let Some(remainder) = host.strip_prefix(preset.resolution_value.as_str()) else {
                return false;
            };
            match &preset.resolution_host {
                Some(resolution_host) => {
                    // skip the separator character after the matched prefix
                    let mut chars = remainder.chars();
                    chars.next();
                    chars.as_str() == resolution_host
                }
                None => true,
            }
        })
    }
}
