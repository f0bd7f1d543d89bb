//! Top-level-domain link processing.

use crate::config::{Preset, PresetConfiguration};
use crate::core::UriConstraints;

/// Expresses a dimension value as the host's trailing end.
///
/// A preset with a `resolution_host` pins the full host; otherwise the
/// preset's `resolution_value` replaces whichever other preset's suffix the
/// base URI currently carries.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopLevelDomainLinkProcessor;

impl TopLevelDomainLinkProcessor {
    pub fn process(
        &self,
        constraints: UriConstraints,
        configuration: &PresetConfiguration,
        preset: &Preset,
    ) -> UriConstraints {
        if let Some(host) = &preset.resolution_host {
            return constraints.with_host(host.clone());
        }
        let replace: Vec<String> = configuration
            .presets
            .iter()
            .map(|p| p.resolution_value.clone())
            .filter(|value| !value.is_empty())
            .collect();
        constraints.with_host_suffix(preset.resolution_value.clone(), replace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn configuration() -> PresetConfiguration {
        PresetConfiguration {
            default_preset: "com".to_string(),
            resolution: Default::default(),
            presets: vec![
                Preset {
                    identifier: "com".to_string(),
                    values: vec!["com".to_string()],
                    resolution_value: "com".to_string(),
                    resolution_host: None,
                },
                Preset {
                    identifier: "de".to_string(),
                    values: vec!["de".to_string()],
                    resolution_value: "de".to_string(),
                    resolution_host: None,
                },
            ],
        }
    }

    #[test]
    fn test_replaces_suffix() {
        let configuration = configuration();
        let preset = configuration.preset("de").unwrap();
        let constraints = TopLevelDomainLinkProcessor.process(
            UriConstraints::empty(),
            &configuration,
            preset,
        );

        let base = Url::parse("http://example.com/").unwrap();
        let uri = constraints.apply_to(&base, "");
        assert_eq!(uri.host_str(), Some("example.de"));
    }

    #[test]
    fn test_resolution_host_pins_full_host() {
        let mut configuration = configuration();
        configuration.presets[1].resolution_host = Some("example.co.at".to_string());
        let preset = configuration.preset("de").unwrap().clone();
        let constraints = TopLevelDomainLinkProcessor.process(
            UriConstraints::empty(),
            &configuration,
            &preset,
        );

        let base = Url::parse("http://example.com/").unwrap();
        let uri = constraints.apply_to(&base, "");
        assert_eq!(uri.host_str(), Some("example.co.at"));
    }
}
