//! Dimension preset detection.
//!
//! Each configured dimension names a resolution mode; the mode selects one of
//! a closed set of detector strategies. Detection itself is a normal-outcome
//! affair: "no preset matched" is `None`, not an error. Only an unknown mode
//! is fatal, because without a detector the dimension's content cannot be
//! addressed at all.
//!
//! # Module Structure
//!
//! - [`request`]: the request facts detectors inspect (host + path)
//! - [`subdomain`], [`top_level_domain`], [`uri_path_segment`],
//!   [`backend_uri`]: the four strategies
//! - [`subgraph`]: the per-request orchestrator
//! - `mod.rs`: mode names, [`DetectorOptions`], the [`Detector`] registry

mod backend_uri;
mod request;
mod subdomain;
mod subgraph;
mod top_level_domain;
mod uri_path_segment;

pub use backend_uri::BackendUriDetector;
pub use request::RequestInfo;
pub use subdomain::SubdomainDetector;
pub use subgraph::{DetectedSubgraph, SubgraphDetector};
pub use top_level_domain::TopLevelDomainDetector;
pub use uri_path_segment::UriPathSegmentDetector;

use thiserror::Error;

use crate::config::Preset;

// ============================================================================
// resolution modes
// ============================================================================

/// Resolution mode: dimension code in the first path segment.
pub const MODE_URI_PATH_SEGMENT: &str = "uriPathSegment";

/// Resolution mode: dimension code as the leading host label.
pub const MODE_SUBDOMAIN: &str = "subdomain";

/// Resolution mode: dimension code as the host's trailing end.
pub const MODE_TOP_LEVEL_DOMAIN: &str = "topLevelDomain";

/// Resolution mode: dimension values carried in a backend context path.
pub const MODE_BACKEND_URI: &str = "backendUriContextPath";

/// Delimiter between dimension codes packed into one path segment, when
/// neither the dimension options nor the global setting configure one.
pub const DEFAULT_URI_PATH_SEGMENT_DELIMITER: &str = "-";

// ============================================================================
// options and errors
// ============================================================================

/// Fully-built options for one detection run, after the orchestrator has
/// merged explicit configuration, legacy synthesis and global settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectorOptions {
    /// Position among path-segment-resolved dimensions.
    pub offset: Option<usize>,
    /// Delimiter between packed dimension codes.
    pub delimiter: Option<String>,
    /// Fall back to the default preset when no segment matches.
    pub allow_empty_value: bool,
    /// Identifier of the fallback preset under `allow_empty_value`.
    pub default_preset_identifier: Option<String>,
}

/// Detection configuration errors. Fatal: a request cannot be routed
/// without knowing how to detect its dimensions.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("dimension `{dimension}` configures unknown resolution mode `{mode}`")]
    InvalidPresetDetector { dimension: String, mode: String },
}

// ============================================================================
// registry
// ============================================================================

/// The closed set of detector strategies, keyed by resolution mode.
#[derive(Debug, Clone, Copy)]
pub enum Detector {
    Subdomain(SubdomainDetector),
    TopLevelDomain(TopLevelDomainDetector),
    UriPathSegment(UriPathSegmentDetector),
    BackendUri(BackendUriDetector),
}

impl Detector {
    /// Run the strategy. `None` is the normal no-match outcome.
    pub fn detect<'a>(
        &self,
        dimension_name: &str,
        presets: &'a [Preset],
        request: &RequestInfo,
        options: &DetectorOptions,
    ) -> Option<&'a Preset> {
        match self {
            Self::Subdomain(detector) => detector.detect(presets, request),
            Self::TopLevelDomain(detector) => detector.detect(presets, request),
            Self::UriPathSegment(detector) => detector.detect(presets, request, options),
            Self::BackendUri(detector) => detector.detect(dimension_name, presets, request),
        }
    }

    /// Whether this strategy consumes a URI path segment on match.
    pub fn is_uri_path_segment(&self) -> bool {
        matches!(self, Self::UriPathSegment(_))
    }
}

/// Map a dimension's resolution mode to its detector.
///
/// Called at configuration validation time as well, so misconfigured modes
/// fail fast rather than at first request.
pub fn resolve_detector(dimension: &str, mode: &str) -> Result<Detector, DetectionError> {
    match mode {
        MODE_URI_PATH_SEGMENT => Ok(Detector::UriPathSegment(UriPathSegmentDetector)),
        MODE_SUBDOMAIN => Ok(Detector::Subdomain(SubdomainDetector)),
        MODE_TOP_LEVEL_DOMAIN => Ok(Detector::TopLevelDomain(TopLevelDomainDetector)),
        MODE_BACKEND_URI => Ok(Detector::BackendUri(BackendUriDetector)),
        _ => Err(DetectionError::InvalidPresetDetector {
            dimension: dimension.to_string(),
            mode: mode.to_string(),
        }),
    }
}
