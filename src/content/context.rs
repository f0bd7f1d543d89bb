//! Request-scoped content context and the tree-traversal contract.

use crate::content::{NodeHandle, Site};
use crate::core::CoordinateSet;

/// Name of the default (published) workspace.
pub const LIVE_WORKSPACE: &str = "live";

/// A request-scoped view onto one workspace and dimension coordinate.
///
/// Visibility flags follow the workspace: non-live workspaces show invisible
/// and inaccessible content so editors can address unpublished nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentContext {
    pub workspace_name: String,
    pub invisible_content_shown: bool,
    pub inaccessible_content_shown: bool,
    pub dimensions: CoordinateSet,
}

impl ContentContext {
    /// The live context without dimension values.
    pub fn live() -> Self {
        Self::for_workspace(LIVE_WORKSPACE, CoordinateSet::new())
    }

    /// Context for a workspace, with visibility flags derived from it.
    pub fn for_workspace(workspace_name: impl Into<String>, dimensions: CoordinateSet) -> Self {
        let workspace_name = workspace_name.into();
        let relaxed = workspace_name != LIVE_WORKSPACE;
        Self {
            workspace_name,
            invisible_content_shown: relaxed,
            inaccessible_content_shown: relaxed,
            dimensions,
        }
    }

    /// A copy of this context with hidden nodes included.
    ///
    /// Path construction must succeed even for content not currently
    /// visible; visibility enforcement belongs to the matching side.
    pub fn allowing_hidden(&self) -> Self {
        let mut ctx = self.clone();
        ctx.invisible_content_shown = true;
        ctx
    }

    pub fn is_live(&self) -> bool {
        self.workspace_name == LIVE_WORKSPACE
    }
}

/// Tree-traversal collaborator: looks up context-bound node handles.
pub trait ContentBackend: Send + Sync {
    /// Whether a workspace with the given name exists.
    fn workspace_exists(&self, name: &str) -> bool;

    /// The root node of the given site in the given context.
    fn site_node(&self, ctx: &ContentContext, site: &Site) -> Option<NodeHandle>;

    /// Look a node up by its stable identifier.
    fn node_by_identifier(&self, ctx: &ContentContext, identifier: &str) -> Option<NodeHandle>;

    /// Look a node up by its path relative to the site node.
    ///
    /// An empty relative path yields the site node itself.
    fn node_at(&self, ctx: &ContentContext, site: &Site, relative_path: &str)
    -> Option<NodeHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_context_hides_invisible_content() {
        let ctx = ContentContext::live();
        assert!(ctx.is_live());
        assert!(!ctx.invisible_content_shown);
        assert!(!ctx.inaccessible_content_shown);
    }

    #[test]
    fn test_workspace_context_relaxes_visibility() {
        let ctx = ContentContext::for_workspace("user-jdoe", CoordinateSet::new());
        assert!(!ctx.is_live());
        assert!(ctx.invisible_content_shown);
        assert!(ctx.inaccessible_content_shown);
    }

    #[test]
    fn test_allowing_hidden() {
        let ctx = ContentContext::live().allowing_hidden();
        assert!(ctx.invisible_content_shown);
        assert!(!ctx.inaccessible_content_shown);
        assert!(ctx.is_live());
    }
}
