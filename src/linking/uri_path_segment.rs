//! URI-path-segment link processing.

use crate::config::Preset;
use crate::core::UriConstraints;

/// Expresses a dimension value in the leading path segment.
///
/// Consecutive path-segment dimensions share that segment, joined by the
/// configured delimiter: the first contributes `de/`, the second turns it
/// into `de-at/`. Presets with an empty `resolution_value` contribute
/// nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriPathSegmentLinkProcessor;

impl UriPathSegmentLinkProcessor {
    pub fn process(
        &self,
        constraints: UriConstraints,
        preset: &Preset,
        delimiter: &str,
    ) -> UriConstraints {
        constraints.with_packed_path_prefix(&preset.resolution_value, delimiter)
    }
}
