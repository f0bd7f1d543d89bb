//! Backend context-path preset detection.

use crate::config::Preset;
use crate::content::context_path;
use crate::detection::RequestInfo;

/// Extracts dimension values directly from a request path using the
/// reserved context-path syntax, as produced by editorial/backend tooling.
///
/// Matches the preset whose value sequence equals the decoded values for
/// the dimension; malformed encodings are a plain no-match.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackendUriDetector;

impl BackendUriDetector {
    pub fn detect<'a>(
        &self,
        dimension_name: &str,
        presets: &'a [Preset],
        request: &RequestInfo,
    ) -> Option<&'a Preset> {
        let path = request.path().as_str();
        if !context_path::is_context_path(path) {
            return None;
        }
        let parts = context_path::decode(path).ok()?;
        let values = parts.dimensions.get(dimension_name)?;
        presets.iter().find(|p| p.values == values)
    }
}
