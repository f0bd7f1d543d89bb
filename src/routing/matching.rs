//! Request path to node matching.

use crate::content::{
    ContentContext, DOCUMENT_TYPE, NodeHandle, URI_PATH_SEGMENT_PROPERTY, context_path,
};
use crate::debug;
use crate::routing::{FrontendRoutePart, RouteParameters, RouteTags, RoutingError};

/// A successful match: the node's context path and its cache tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Canonical internal node address, context-path encoded.
    pub context_path: String,
    /// Workspace, node and ancestor identifiers for cache invalidation.
    pub tags: RouteTags,
}

impl FrontendRoutePart {
    /// Match a request path against the content tree.
    ///
    /// `Ok(None)` is the ordinary negative outcome, letting a surrounding
    /// route chain try the next candidate. The one escalated failure is the
    /// empty request path against a site without content: a site that cannot
    /// even serve its homepage is not a route mismatch but a configuration
    /// gap, reported as [`RoutingError::NoHomepage`].
    pub fn match_value(
        &self,
        request_path: &str,
        parameters: &RouteParameters,
    ) -> Result<Option<MatchResult>, RoutingError> {
        let value = self.find_value_to_match(request_path);
        match self.convert_request_path(value, parameters) {
            Ok(result) => Ok(Some(result)),
            Err(err @ RoutingError::NoHomepage(_)) => Err(err),
            Err(err) => {
                debug!("routing"; "no match for `{value}`: {err}");
                Ok(None)
            }
        }
    }

    fn convert_request_path(
        &self,
        value: &str,
        parameters: &RouteParameters,
    ) -> Result<MatchResult, RoutingError> {
        let path = self.truncate_uri_path_suffix(value)?;
        let path = remove_context_from_path(&path, parameters.uri_path_segment_used())
            .ok_or_else(|| RoutingError::NoSuchNode(value.to_string()))?;

        let ctx = self.context_from_parameters(parameters)?;
        let site = self.current_site(parameters)?;
        let site_node = self.backend.site_node(&ctx, &site).ok_or_else(|| {
            if path.is_empty() {
                RoutingError::NoHomepage(site.name.clone())
            } else {
                RoutingError::NoSiteNode(site.name.clone(), ctx.workspace_name.clone())
            }
        })?;

        let node = if path.is_empty() {
            site_node.clone()
        } else {
            node_by_uri_path_segments(&site_node, &path)
                .ok_or_else(|| RoutingError::NoSuchNode(path.clone()))?
        };

        if self.options.only_match_site_nodes && node.identifier() != site_node.identifier() {
            return Err(RoutingError::NoSuchNode(path));
        }
        if !node.is_of_type(&self.options.node_type) {
            return Err(RoutingError::NoSuchNode(path));
        }

        let context_path = node_context_path(&node, &ctx);
        let tags = RouteTags::for_matched_node(&ctx.workspace_name, &node);
        debug!("routing"; "matched `{value}` to `{context_path}`");
        Ok(MatchResult { context_path, tags })
    }

    /// Strip the configured literal suffix. A non-empty path without it is a
    /// failed precondition; the homepage path carries no suffix by design.
    fn truncate_uri_path_suffix(&self, path: &str) -> Result<String, RoutingError> {
        let Some(suffix) = self
            .options
            .uri_path_suffix
            .as_deref()
            .filter(|suffix| !suffix.is_empty())
        else {
            return Ok(path.to_string());
        };
        if path.is_empty() {
            return Ok(String::new());
        }
        path.strip_suffix(suffix)
            .map(str::to_string)
            .ok_or_else(|| RoutingError::InvalidRequestPath {
                path: path.to_string(),
                suffix: suffix.to_string(),
            })
    }
}

/// Strip context information from a relative request path.
///
/// When subgraph detection consumed a URI path segment, the first segment
/// still sits in front of the path and is dropped here. A remaining context
/// suffix is decoded away; its workspace and dimensions were already picked
/// up by detection. `None` for malformed context encodings.
pub(crate) fn remove_context_from_path(path: &str, uri_path_segment_used: bool) -> Option<String> {
    let path = if uri_path_segment_used {
        match path.split_once('/') {
            Some((_, rest)) => rest,
            // dimension code and context marker share the only segment,
            // e.g. `de@user-jdoe`
            None => match path.find('@') {
                Some(at) => &path[at..],
                None => "",
            },
        }
    } else {
        path
    };

    if path.is_empty() || !context_path::is_context_path(path) {
        return Some(path.to_string());
    }

    let parts = context_path::decode(path).ok()?;
    Some(parts.node_path.trim_matches('/').to_string())
}

/// Walk the tree from the site node, matching each path segment against the
/// `uriPathSegment` property of document children. First match per level is
/// final; a level without a match fails the whole traversal.
pub(crate) fn node_by_uri_path_segments(site_node: &NodeHandle, path: &str) -> Option<NodeHandle> {
    let mut node = site_node.clone();
    for segment in path.split('/') {
        node = node
            .children_of_type(DOCUMENT_TYPE)
            .into_iter()
            .find(|child| {
                child.property(URI_PATH_SEGMENT_PROPERTY).as_deref() == Some(segment)
            })?;
    }
    Some(node)
}

/// A node's canonical address: its internal path plus the context suffix
/// for non-live workspaces.
pub(crate) fn node_context_path(node: &NodeHandle, ctx: &ContentContext) -> String {
    context_path::encode(&node.path(), &ctx.workspace_name, &ctx.dimensions)
}
