//! Dimension link processors.
//!
//! The inverse of detection: where detectors recover dimension values from a
//! request, link processors express a node's dimension values in generated
//! URIs, by rewriting the host or prefixing the path. Processors only add
//! constraints; none removes what an earlier one set.
//!
//! # Module Structure
//!
//! - [`subdomain`]: host prefix rewriting
//! - [`top_level_domain`]: host suffix rewriting
//! - [`uri_path_segment`]: leading path segment packing
//! - [`subgraph_uri`]: the per-node orchestrator
//! - `mod.rs`: the [`LinkProcessor`] registry, mirroring the detector one

mod subdomain;
mod subgraph_uri;
mod top_level_domain;
mod uri_path_segment;

pub use subdomain::SubdomainLinkProcessor;
pub use subgraph_uri::SubgraphUriProcessor;
pub use top_level_domain::TopLevelDomainLinkProcessor;
pub use uri_path_segment::UriPathSegmentLinkProcessor;

use crate::config::{Preset, PresetConfiguration};
use crate::core::UriConstraints;
use crate::detection::{
    DetectionError, MODE_BACKEND_URI, MODE_SUBDOMAIN, MODE_TOP_LEVEL_DOMAIN,
    MODE_URI_PATH_SEGMENT,
};

/// The closed set of link processor strategies, keyed by resolution mode.
#[derive(Debug, Clone, Copy)]
pub enum LinkProcessor {
    Subdomain(SubdomainLinkProcessor),
    TopLevelDomain(TopLevelDomainLinkProcessor),
    UriPathSegment(UriPathSegmentLinkProcessor),
    /// Backend context paths carry their dimension values in the context
    /// suffix; the URI itself needs no decoration.
    NoOp,
}

impl LinkProcessor {
    /// Decorate the constraints with this dimension's chosen preset.
    pub fn process_uri_constraints(
        &self,
        constraints: UriConstraints,
        configuration: &PresetConfiguration,
        preset: &Preset,
        delimiter: &str,
    ) -> UriConstraints {
        match self {
            Self::Subdomain(processor) => processor.process(constraints, configuration, preset),
            Self::TopLevelDomain(processor) => {
                processor.process(constraints, configuration, preset)
            }
            Self::UriPathSegment(processor) => {
                processor.process(constraints, preset, delimiter)
            }
            Self::NoOp => constraints,
        }
    }
}

/// Map a dimension's resolution mode to its link processor.
pub fn resolve_link_processor(
    dimension: &str,
    mode: &str,
) -> Result<LinkProcessor, DetectionError> {
    match mode {
        MODE_URI_PATH_SEGMENT => Ok(LinkProcessor::UriPathSegment(UriPathSegmentLinkProcessor)),
        MODE_SUBDOMAIN => Ok(LinkProcessor::Subdomain(SubdomainLinkProcessor)),
        MODE_TOP_LEVEL_DOMAIN => {
            Ok(LinkProcessor::TopLevelDomain(TopLevelDomainLinkProcessor))
        }
        MODE_BACKEND_URI => Ok(LinkProcessor::NoOp),
        _ => Err(DetectionError::InvalidPresetDetector {
            dimension: dimension.to_string(),
            mode: mode.to_string(),
        }),
    }
}
