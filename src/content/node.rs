//! Content node contract.
//!
//! The persistent content tree is an external collaborator; the routing core
//! only relies on the capabilities below. Node handles returned by a
//! [`ContentBackend`](crate::content::ContentBackend) are bound to the
//! context they were fetched with: `parent` and `children_of_type` stay
//! within that context's workspace and visibility rules.

use std::sync::Arc;

/// Node type category for addressable pages.
pub const DOCUMENT_TYPE: &str = "document";

/// Node type for shortcut nodes.
pub const SHORTCUT_TYPE: &str = "shortcut";

/// The property holding a node's public path segment.
pub const URI_PATH_SEGMENT_PROPERTY: &str = "uriPathSegment";

/// Shared handle to a context-bound content node.
pub type NodeHandle = Arc<dyn ContentNode>;

/// The capabilities the routing core requires from a content node.
pub trait ContentNode: Send + Sync {
    /// Stable node identity, independent of workspace.
    fn identifier(&self) -> String;

    /// Internal node name (the last segment of the node path).
    fn name(&self) -> String;

    /// Absolute node path, e.g. `/sites/examplecom/about`.
    fn path(&self) -> String;

    /// The node's type name.
    fn node_type(&self) -> String;

    /// Node-type membership test, including super-type relations.
    fn is_of_type(&self, type_name: &str) -> bool;

    /// Read a string property, absent if unset.
    fn property(&self, name: &str) -> Option<String>;

    /// The parent node within the same context, none at the tree root.
    fn parent(&self) -> Option<NodeHandle>;

    /// Child nodes restricted to the given type, in declaration order.
    fn children_of_type(&self, type_filter: &str) -> Vec<NodeHandle>;

    /// Whether the node is hidden. Hidden nodes are excluded from matching
    /// but included in reverse path construction.
    fn is_hidden(&self) -> bool;

    /// Whether this node is a site root (a direct child of the sites root).
    fn is_site_root(&self) -> bool;

    /// The configured shortcut target; only meaningful for shortcut nodes.
    fn shortcut_target(&self) -> Option<ShortcutTarget>;
}

/// Configured target of a shortcut node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutTarget {
    /// Redirect to the first document child.
    FirstChild,
    /// Redirect to the parent node.
    Parent,
    /// Redirect to the node with the given identifier.
    Node(String),
    /// Redirect to an external URI.
    Uri(String),
}
