//! Per-request dimension and workspace detection.
//!
//! Runs once per inbound request, before route matching: every configured
//! dimension gets one detection attempt, the active workspace is read from a
//! trailing context path if present, and the results are persisted into the
//! request's routing parameters for the matcher to consume.

use std::cmp::Ordering;

use crate::config::{DimensionConfig, DimensionDeclaration};
use crate::content::{LIVE_WORKSPACE, context_path};
use crate::core::CoordinateSet;
use crate::debug;
use crate::detection::{
    BackendUriDetector, DetectionError, Detector, DetectorOptions, RequestInfo,
    UriPathSegmentDetector, resolve_detector,
};
use crate::routing::RouteParameters;

/// Everything one request's subgraph detection produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedSubgraph {
    /// Dimension name -> winning preset's values, in detection order.
    /// Dimensions with no winner and no fallback are absent.
    pub coordinates: CoordinateSet,
    /// The active workspace, `live` unless a context path names another.
    pub workspace_name: String,
    /// Whether the first path segment carried a dimension code. Downstream
    /// matching strips that segment before tree traversal.
    pub uri_path_segment_used: bool,
}

impl DetectedSubgraph {
    /// Persist the detection result into the request's routing parameters.
    pub fn apply_to(&self, parameters: &mut RouteParameters) {
        parameters.set_dimension_values(&self.coordinates);
        parameters.set_workspace_name(&self.workspace_name);
        parameters.set_uri_path_segment_used(self.uri_path_segment_used);
    }
}

/// Orchestrates preset detection across all configured dimensions.
pub struct SubgraphDetector<'a> {
    config: &'a DimensionConfig,
}

impl<'a> SubgraphDetector<'a> {
    pub fn new(config: &'a DimensionConfig) -> Self {
        Self { config }
    }

    /// Detect and persist in one step, including the request host the site
    /// lookup keys off later.
    pub fn detect_into(
        &self,
        request: &RequestInfo,
        parameters: &mut RouteParameters,
    ) -> Result<DetectedSubgraph, DetectionError> {
        parameters.set_request_uri_host(request.host());
        let detected = self.detect(request)?;
        detected.apply_to(parameters);
        Ok(detected)
    }

    /// Detect the dimension coordinates, workspace and path-segment
    /// consumption for one request.
    pub fn detect(&self, request: &RequestInfo) -> Result<DetectedSubgraph, DetectionError> {
        let is_context = context_path::is_context_path(request.path().as_str());
        let backend = BackendUriDetector;
        let probe = UriPathSegmentDetector;

        let mut coordinates = CoordinateSet::new();
        let mut uri_path_segment_used = false;
        // running counter: position of the next path-segment-resolved
        // dimension among its peers
        let mut path_segment_counter = 0usize;

        for declaration in detection_order(self.config) {
            let presets = &declaration.config.presets;
            let detector =
                resolve_detector(&declaration.name, &declaration.config.resolution.mode)?;
            let options = self.build_options(declaration, &detector, path_segment_counter);

            if is_context {
                // backend tooling encodes dimension values directly; the
                // first segment may still carry a code that has to be
                // stripped, hence the probe
                if let Some(preset) = backend.detect(&declaration.name, presets, request) {
                    if detector.is_uri_path_segment()
                        && probe.detect(presets, request, &options).is_some()
                    {
                        uri_path_segment_used = true;
                    }
                    coordinates.insert(declaration.name.as_str(), preset.values.clone());
                    continue;
                }
            }

            match detector.detect(&declaration.name, presets, request, &options) {
                Some(preset) => {
                    if detector.is_uri_path_segment() {
                        path_segment_counter += 1;
                        uri_path_segment_used = true;
                    }
                    coordinates.insert(declaration.name.as_str(), preset.values.clone());
                }
                None => {
                    let fallback = options
                        .allow_empty_value
                        .then_some(options.default_preset_identifier.as_deref())
                        .flatten()
                        .and_then(|identifier| declaration.config.preset(identifier));
                    match fallback {
                        Some(preset) => {
                            coordinates
                                .insert(declaration.name.as_str(), preset.values.clone());
                        }
                        None => {
                            debug!(
                                "detection";
                                "no preset matched for dimension `{}`",
                                declaration.name
                            );
                        }
                    }
                }
            }
        }

        Ok(DetectedSubgraph {
            coordinates,
            workspace_name: detect_workspace(request),
            uri_path_segment_used,
        })
    }

    /// Merge explicit resolution options, legacy synthesis and global
    /// settings into one option set for this detection run.
    fn build_options(
        &self,
        declaration: &DimensionDeclaration,
        detector: &Detector,
        path_segment_counter: usize,
    ) -> DetectorOptions {
        let default_preset = (!declaration.config.default_preset.is_empty())
            .then(|| declaration.config.default_preset.clone());

        let mut options = match &declaration.config.resolution.options {
            Some(explicit) => DetectorOptions {
                offset: explicit.offset,
                delimiter: explicit.delimiter.clone(),
                allow_empty_value: explicit.allow_empty_value.unwrap_or(false),
                default_preset_identifier: explicit
                    .default_preset_identifier
                    .clone()
                    .or(default_preset),
            },
            // legacy configuration: position follows the running counter,
            // empty-segment tolerance follows the global setting
            None if detector.is_uri_path_segment() => DetectorOptions {
                offset: Some(path_segment_counter),
                delimiter: None,
                allow_empty_value: self.config.support_empty_segment,
                default_preset_identifier: default_preset,
            },
            None => DetectorOptions::default(),
        };

        if detector.is_uri_path_segment()
            && let Some(delimiter) = &self.config.uri_path_segment_delimiter
        {
            options.delimiter = Some(delimiter.clone());
        }

        options
    }
}

/// Stable detection order: ascending declared offset, declaration order for
/// dimensions without one.
fn detection_order(config: &DimensionConfig) -> Vec<&DimensionDeclaration> {
    let mut order: Vec<&DimensionDeclaration> = config.dimensions().iter().collect();
    order.sort_by(|a, b| match (declared_offset(a), declared_offset(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => Ordering::Equal,
    });
    order
}

fn declared_offset(declaration: &DimensionDeclaration) -> Option<usize> {
    declaration
        .config
        .resolution
        .options
        .as_ref()
        .and_then(|options| options.offset)
}

/// The active workspace for a request: `live`, unless the last path segment
/// is a context path naming another. Malformed encodings fall back to
/// `live`.
fn detect_workspace(request: &RequestInfo) -> String {
    let tail = request.path().tail();
    if !context_path::is_context_path(tail) {
        return LIVE_WORKSPACE.to_string();
    }
    match context_path::decode(tail) {
        Ok(parts) => parts.workspace_name,
        Err(err) => {
            debug!("detection"; "malformed context path `{tail}`: {err}");
            LIVE_WORKSPACE.to_string()
        }
    }
}
