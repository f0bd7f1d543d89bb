//! Node to request path resolution.

use url::Url;

use crate::content::{
    ContentContext, LIVE_WORKSPACE, NodeHandle, ShortcutError, ShortcutResolution, Site,
    URI_PATH_SEGMENT_PROPERTY, context_path, resolve_shortcuts,
};
use crate::core::{CoordinateSet, UriConstraints, UriPath};
use crate::debug;
use crate::linking::SubgraphUriProcessor;
use crate::routing::{FrontendRoutePart, RoutingError};

/// What a resolution attempt starts from.
pub enum ResolveTarget {
    /// A node handle with the context it was fetched in.
    Node {
        node: NodeHandle,
        context: ContentContext,
    },
    /// A context-path string referencing a node, e.g.
    /// `/sites/examplecom/about@user-jdoe;language=de`.
    ContextPath(String),
}

/// A successful resolution: the route path plus the URI constraints the
/// dimension link processors accumulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveResult {
    pub uri_path: UriPath,
    pub constraints: UriConstraints,
}

impl FrontendRoutePart {
    /// Resolve a node (or a context path referencing one) to a route path.
    ///
    /// `Ok(None)` is the ordinary negative outcome so a surrounding route
    /// chain can try the next candidate; this includes unresolvable
    /// shortcuts, which are logged here. The one escalated failure is a
    /// missing `uriPathSegment` property on an ancestor - a data-integrity
    /// gap that link generation must not paper over.
    pub fn resolve_value(
        &self,
        target: ResolveTarget,
    ) -> Result<Option<ResolveResult>, RoutingError> {
        match self.resolve_inner(target) {
            Ok(result) => Ok(Some(result)),
            Err(err @ RoutingError::MissingNodeProperty { .. }) => Err(err),
            Err(err) => {
                debug!("routing"; "resolution failed: {err}");
                Ok(None)
            }
        }
    }

    fn resolve_inner(&self, target: ResolveTarget) -> Result<ResolveResult, RoutingError> {
        let (node, ctx) = match target {
            ResolveTarget::Node { node, context } => (node, context),
            ResolveTarget::ContextPath(path) => self.node_from_context_path(&path)?,
        };

        if !node.is_of_type(&self.options.node_type) {
            return Err(RoutingError::NoSuchNode(node.path()));
        }
        if self.options.only_match_site_nodes && !node.is_site_root() {
            return Err(RoutingError::NoSuchNode(node.path()));
        }

        let resolved_node = match resolve_shortcuts(self.backend.as_ref(), &ctx, node.clone())? {
            ShortcutResolution::ExternalUri(uri) => {
                // external targets bypass path construction entirely
                let uri = Url::parse(&uri).map_err(|_| {
                    RoutingError::InvalidShortcut(ShortcutError::Unresolvable {
                        identifier: node.identifier(),
                    })
                })?;
                return Ok(ResolveResult {
                    uri_path: UriPath::default(),
                    constraints: UriConstraints::from_uri(&uri),
                });
            }
            ShortcutResolution::Node(resolved) => resolved,
        };

        let mut constraints =
            SubgraphUriProcessor.dimension_constraints(&self.config, &ctx)?;
        let uri_path = self.route_path_for_node(&resolved_node, &ctx)?;

        if let Some(suffix) = self
            .options
            .uri_path_suffix
            .as_deref()
            .filter(|suffix| !suffix.is_empty())
            && !node.is_site_root()
        {
            constraints = constraints.with_path_suffix(suffix);
        }

        Ok(ResolveResult {
            uri_path,
            constraints,
        })
    }

    /// Look a node up from a context-path string. Plain paths resolve in
    /// the live workspace.
    fn node_from_context_path(
        &self,
        path: &str,
    ) -> Result<(NodeHandle, ContentContext), RoutingError> {
        let parts = if context_path::is_context_path(path) {
            context_path::decode(path)
                .map_err(|_| RoutingError::NoSuchNode(path.to_string()))?
        } else {
            context_path::ContextPathParts {
                node_path: path.to_string(),
                workspace_name: LIVE_WORKSPACE.to_string(),
                dimensions: CoordinateSet::new(),
            }
        };
        let ctx = self.context_from_path(&parts)?;

        let relative = parts
            .node_path
            .strip_prefix("/sites/")
            .ok_or_else(|| RoutingError::NoSuchNode(parts.node_path.clone()))?;
        let (site_name, rest) = relative.split_once('/').unwrap_or((relative, ""));
        let node = self
            .backend
            .node_at(&ctx, &Site::new(site_name), rest)
            .ok_or_else(|| RoutingError::NoSuchNode(parts.node_path.clone()))?;
        Ok((node, ctx))
    }

    /// The route path identifying a node: its `uriPathSegment` chain, plus
    /// the context suffix for non-live workspaces.
    fn route_path_for_node(
        &self,
        node: &NodeHandle,
        ctx: &ContentContext,
    ) -> Result<UriPath, RoutingError> {
        let suffix = if ctx.is_live() {
            String::new()
        } else {
            context_path::encode_suffix(&ctx.workspace_name, &ctx.dimensions)
        };
        let request_path = self.request_path_by_node(node, ctx)?;
        Ok(UriPath::new(&format!("{request_path}{suffix}")))
    }

    /// Reverse tree walk collecting `uriPathSegment` properties up to (but
    /// excluding) the site root.
    ///
    /// The walk runs in a hidden-inclusive context: paths must be
    /// constructible even beneath hidden ancestors; visibility enforcement
    /// belongs to matching, not generation.
    fn request_path_by_node(
        &self,
        node: &NodeHandle,
        ctx: &ContentContext,
    ) -> Result<String, RoutingError> {
        if node.is_site_root() {
            return Ok(String::new());
        }

        let relaxed = ctx.allowing_hidden();
        let mut current = self.backend.node_by_identifier(&relaxed, &node.identifier());

        let mut segments = Vec::new();
        while let Some(ancestor) = current {
            if ancestor.is_site_root() {
                break;
            }
            let segment = ancestor.property(URI_PATH_SEGMENT_PROPERTY).ok_or_else(|| {
                RoutingError::MissingNodeProperty {
                    identifier: ancestor.identifier(),
                    property: URI_PATH_SEGMENT_PROPERTY.to_string(),
                }
            })?;
            segments.push(segment);
            current = ancestor.parent();
        }
        segments.reverse();
        Ok(segments.join("/"))
    }
}
