//! Top-level-domain-based preset detection.

use crate::config::Preset;
use crate::detection::RequestInfo;

/// Matches a preset against the trailing end of the request host.
///
/// A preset declaring a `resolution_host` matches only on exact host
/// equality; otherwise the host must end with the preset's
/// `resolution_value`. First match in iteration order wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopLevelDomainDetector;

impl TopLevelDomainDetector {
    pub fn detect<'a>(&self, presets: &'a [Preset], request: &RequestInfo) -> Option<&'a Preset> {
        let host = request.host();

        presets.iter().find(|preset| match &preset.resolution_host {
            Some(resolution_host) => host == resolution_host,
            None => host.ends_with(&preset.resolution_value),
        })
    }
}
