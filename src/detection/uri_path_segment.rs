//! URI-path-segment-based preset detection.

use crate::config::Preset;
use crate::detection::{DEFAULT_URI_PATH_SEGMENT_DELIMITER, DetectorOptions, RequestInfo};

/// Matches a preset against a dimension code packed into the first path
/// segment.
///
/// Multiple path-segment-resolved dimensions share the first segment,
/// separated by the configured delimiter; `offset` selects this dimension's
/// piece. A missing or empty segment is a plain no-match - the default
/// preset fallback under `allow_empty_value` is handled by the
/// orchestrator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriPathSegmentDetector;

impl UriPathSegmentDetector {
    pub fn detect<'a>(
        &self,
        presets: &'a [Preset],
        request: &RequestInfo,
        options: &DetectorOptions,
    ) -> Option<&'a Preset> {
        let path = request.path();
        if path.is_empty() {
            return None;
        }

        let first_segment = path.first_segment()?;
        let delimiter = options
            .delimiter
            .as_deref()
            .unwrap_or(DEFAULT_URI_PATH_SEGMENT_DELIMITER);
        let pieces: Vec<&str> = first_segment.split(delimiter).collect();
        let value = pieces.get(options.offset.unwrap_or(0))?;

        presets.iter().find(|p| p.resolution_value == *value)
    }
}
