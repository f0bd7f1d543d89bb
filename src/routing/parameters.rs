//! Request-scoped routing parameters and cache tags.

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use crate::content::NodeHandle;
use crate::core::CoordinateSet;

/// Parameter: serialized dimension coordinate set (JSON object).
pub const PARAM_DIMENSION_VALUES: &str = "dimensionValues";

/// Parameter: active workspace name.
pub const PARAM_WORKSPACE_NAME: &str = "workspaceName";

/// Parameter: whether the first path segment carried a dimension code.
pub const PARAM_URI_PATH_SEGMENT_USED: &str = "uriPathSegmentUsed";

/// Parameter: the request's host name, keying the site lookup.
pub const PARAM_REQUEST_URI_HOST: &str = "requestUriHost";

/// Request-scoped key/value carrier between detection and matching.
///
/// Created once per request by the subgraph detector, read by the route part
/// later in the same request. Append-only by convention: writers add keys,
/// nobody removes them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteParameters {
    values: FxHashMap<String, Value>,
}

impl RouteParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_str()
    }

    pub fn set_dimension_values(&mut self, coordinates: &CoordinateSet) {
        let mut map = Map::new();
        for (dimension, values) in coordinates.iter() {
            let values = values.iter().cloned().map(Value::String).collect();
            map.insert(dimension.to_string(), Value::Array(values));
        }
        self.set(PARAM_DIMENSION_VALUES, Value::Object(map));
    }

    /// The detected coordinate set, empty when none was persisted.
    pub fn dimension_values(&self) -> CoordinateSet {
        let Some(Value::Object(map)) = self.get(PARAM_DIMENSION_VALUES) else {
            return CoordinateSet::new();
        };
        map.iter()
            .map(|(dimension, values)| {
                let values = values
                    .as_array()
                    .map(|values| {
                        values
                            .iter()
                            .filter_map(|value| value.as_str().map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_default();
                (dimension.clone(), values)
            })
            .collect()
    }

    pub fn set_workspace_name(&mut self, name: &str) {
        self.set(PARAM_WORKSPACE_NAME, Value::String(name.to_string()));
    }

    pub fn workspace_name(&self) -> Option<&str> {
        self.get_str(PARAM_WORKSPACE_NAME)
    }

    pub fn set_uri_path_segment_used(&mut self, used: bool) {
        self.set(PARAM_URI_PATH_SEGMENT_USED, Value::Bool(used));
    }

    pub fn uri_path_segment_used(&self) -> bool {
        self.get(PARAM_URI_PATH_SEGMENT_USED)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn set_request_uri_host(&mut self, host: &str) {
        self.set(PARAM_REQUEST_URI_HOST, Value::String(host.to_string()));
    }

    pub fn request_uri_host(&self) -> Option<&str> {
        self.get_str(PARAM_REQUEST_URI_HOST)
    }
}

/// Cache-invalidation tags attached to a successful match: the workspace,
/// the matched node and every ancestor. Invalidating any of them
/// invalidates the cached route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTags {
    tags: Vec<String>,
}

impl RouteTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag, keeping the set free of duplicates.
    pub fn push(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Tags for a matched node: workspace name, the node's identifier and
    /// every ancestor's identifier up to the tree root.
    pub fn for_matched_node(workspace_name: &str, node: &NodeHandle) -> Self {
        let mut tags = Self::new();
        tags.push(workspace_name);
        tags.push(node.identifier());
        let mut current = node.parent();
        while let Some(ancestor) = current {
            tags.push(ancestor.identifier());
            current = ancestor.parent();
        }
        tags
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
