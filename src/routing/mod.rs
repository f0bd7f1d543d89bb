//! The frontend route part: translating request paths to content nodes and
//! back.
//!
//! # Module Structure
//!
//! ```text
//! routing/
//! ├── parameters   # RouteParameters, RouteTags
//! ├── error        # RoutingError
//! ├── matching     # request path -> node (MatchResult)
//! ├── resolving    # node -> request path + constraints (ResolveResult)
//! ├── tests        # end-to-end matcher/resolver tests
//! └── mod.rs       # FrontendRoutePart and shared context plumbing
//! ```

mod error;
mod matching;
mod parameters;
mod resolving;

#[cfg(test)]
mod tests;

pub use error::RoutingError;
pub use matching::MatchResult;
pub use parameters::{
    PARAM_DIMENSION_VALUES, PARAM_REQUEST_URI_HOST, PARAM_URI_PATH_SEGMENT_USED,
    PARAM_WORKSPACE_NAME, RouteParameters, RouteTags,
};
pub use resolving::{ResolveResult, ResolveTarget};

use std::sync::Arc;

use crate::config::DimensionConfig;
use crate::content::{
    ContentBackend, ContentContext, DOCUMENT_TYPE, LIVE_WORKSPACE, Site, SiteDirectory,
    context_path,
};

/// Options configuring one frontend route part.
#[derive(Debug, Clone)]
pub struct RoutePartOptions {
    /// Literal suffix required on matched request paths, e.g. `.html`.
    pub uri_path_suffix: Option<String>,
    /// Restrict matching to the site root node itself.
    pub only_match_site_nodes: bool,
    /// Node type the matched node must carry.
    pub node_type: String,
    /// Matching consumes the request path only up to this string; the
    /// remainder belongs to other route parts.
    pub split_string: Option<String>,
}

impl Default for RoutePartOptions {
    fn default() -> Self {
        Self {
            uri_path_suffix: None,
            only_match_site_nodes: false,
            node_type: DOCUMENT_TYPE.to_string(),
            split_string: None,
        }
    }
}

/// Route part translating between request paths and content nodes.
///
/// Matching reads the routing parameters persisted by the subgraph detector;
/// resolving additionally consults the dimension configuration to decorate
/// generated URIs.
pub struct FrontendRoutePart {
    backend: Arc<dyn ContentBackend>,
    sites: SiteDirectory,
    config: DimensionConfig,
    options: RoutePartOptions,
}

impl FrontendRoutePart {
    pub fn new(
        backend: Arc<dyn ContentBackend>,
        sites: SiteDirectory,
        config: DimensionConfig,
    ) -> Self {
        Self {
            backend,
            sites,
            config,
            options: RoutePartOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RoutePartOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RoutePartOptions {
        &self.options
    }

    /// The part of the request path this route part is responsible for:
    /// everything before the configured split string.
    pub fn find_value_to_match<'p>(&self, request_path: &'p str) -> &'p str {
        match self.options.split_string.as_deref() {
            Some(split) if !split.is_empty() => match request_path.find(split) {
                Some(position) => &request_path[..position],
                None => request_path,
            },
            _ => request_path,
        }
    }

    /// Build the matching context from the parameters the subgraph detector
    /// persisted. The workspace defaults to `live` when detection never ran.
    fn context_from_parameters(
        &self,
        parameters: &RouteParameters,
    ) -> Result<ContentContext, RoutingError> {
        let workspace_name = parameters.workspace_name().unwrap_or(LIVE_WORKSPACE);
        if !self.backend.workspace_exists(workspace_name) {
            return Err(RoutingError::NoWorkspace(workspace_name.to_string()));
        }
        Ok(ContentContext::for_workspace(
            workspace_name,
            parameters.dimension_values(),
        ))
    }

    /// Build a resolving context from a context path's encoded workspace and
    /// dimensions. Resolving contexts always see hidden content: link
    /// generation must work for nodes that matching would refuse.
    fn context_from_path(
        &self,
        parts: &context_path::ContextPathParts,
    ) -> Result<ContentContext, RoutingError> {
        if !self.backend.workspace_exists(&parts.workspace_name) {
            return Err(RoutingError::NoWorkspace(parts.workspace_name.clone()));
        }
        let mut ctx =
            ContentContext::for_workspace(&parts.workspace_name, parts.dimensions.clone());
        ctx.invisible_content_shown = true;
        ctx.inaccessible_content_shown = true;
        Ok(ctx)
    }

    /// The site serving the request, keyed by the `requestUriHost` routing
    /// parameter.
    fn current_site(&self, parameters: &RouteParameters) -> Result<Site, RoutingError> {
        let host = parameters.request_uri_host().unwrap_or_default();
        self.sites
            .site_for_host(host)
            .ok_or_else(|| RoutingError::NoSite(host.to_string()))
    }
}

#[cfg(test)]
mod options_tests {
    use super::*;

    fn route_part(options: RoutePartOptions) -> FrontendRoutePart {
        use crate::content::SiteSource;
        use crate::content::memory::MemoryBackend;

        struct NoSites;
        impl SiteSource for NoSites {
            fn find_by_host(&self, _host: &str) -> Option<Site> {
                None
            }
            fn default_site(&self) -> Option<Site> {
                None
            }
        }

        FrontendRoutePart::new(
            Arc::new(MemoryBackend::new()),
            SiteDirectory::new(Arc::new(NoSites)),
            DimensionConfig::default(),
        )
        .with_options(options)
    }

    #[test]
    fn test_default_node_type_is_document() {
        assert_eq!(RoutePartOptions::default().node_type, DOCUMENT_TYPE);
    }

    #[test]
    fn test_find_value_to_match_honors_split_string() {
        let part = route_part(RoutePartOptions {
            split_string: Some(".".to_string()),
            ..RoutePartOptions::default()
        });
        assert_eq!(part.find_value_to_match("about-us.html"), "about-us");
        assert_eq!(part.find_value_to_match("about-us"), "about-us");

        let part = route_part(RoutePartOptions::default());
        assert_eq!(part.find_value_to_match("about-us.html"), "about-us.html");
    }
}
