//! In-memory content backend for tests and demos.
//!
//! Builds workspace-separated node trees under a `/sites` root from
//! [`NodeSpec`] declarations. Node handles are context-bound: traversal
//! respects the context's visibility flags the way a persistent backend
//! would.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::content::{
    ContentBackend, ContentContext, ContentNode, DOCUMENT_TYPE, NodeHandle, SHORTCUT_TYPE,
    ShortcutTarget, Site, URI_PATH_SEGMENT_PROPERTY,
};

/// Node type of the `/sites` root container.
const SITES_TYPE: &str = "sites";

// ============================================================================
// NodeSpec builder
// ============================================================================

/// Declarative node description for building in-memory trees.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    name: String,
    identifier: Option<String>,
    node_type: String,
    properties: FxHashMap<String, String>,
    hidden: bool,
    shortcut: Option<ShortcutTarget>,
    children: Vec<NodeSpec>,
}

impl NodeSpec {
    /// A document node with the given internal name and public path segment.
    pub fn document(name: &str, uri_path_segment: &str) -> Self {
        Self {
            name: name.to_string(),
            identifier: None,
            node_type: DOCUMENT_TYPE.to_string(),
            properties: FxHashMap::from_iter([(
                URI_PATH_SEGMENT_PROPERTY.to_string(),
                uri_path_segment.to_string(),
            )]),
            hidden: false,
            shortcut: None,
            children: Vec::new(),
        }
    }

    /// A site root node. Site nodes carry no path segment; they are
    /// addressed by the empty request path.
    pub fn site(name: &str) -> Self {
        Self {
            name: name.to_string(),
            identifier: None,
            node_type: DOCUMENT_TYPE.to_string(),
            properties: FxHashMap::default(),
            hidden: false,
            shortcut: None,
            children: Vec::new(),
        }
    }

    /// A shortcut node with the given target.
    pub fn shortcut(name: &str, uri_path_segment: &str, target: ShortcutTarget) -> Self {
        let mut spec = Self::document(name, uri_path_segment);
        spec.node_type = SHORTCUT_TYPE.to_string();
        spec.shortcut = Some(target);
        spec
    }

    pub fn with_identifier(mut self, identifier: &str) -> Self {
        self.identifier = Some(identifier.to_string());
        self
    }

    pub fn with_property(mut self, name: &str, value: &str) -> Self {
        self.properties.insert(name.to_string(), value.to_string());
        self
    }

    /// Remove a property set by the constructor (for building broken trees
    /// in tests).
    pub fn without_property(mut self, name: &str) -> Self {
        self.properties.remove(name);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn with_child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }
}

// ============================================================================
// Raw storage nodes
// ============================================================================

#[derive(Debug)]
struct MemoryNode {
    identifier: String,
    name: String,
    path: String,
    node_type: String,
    properties: FxHashMap<String, String>,
    hidden: bool,
    shortcut: Option<ShortcutTarget>,
    parent: RwLock<Weak<MemoryNode>>,
    children: RwLock<Vec<Arc<MemoryNode>>>,
}

impl MemoryNode {
    fn container(name: &str, path: &str, node_type: &str) -> Arc<Self> {
        Arc::new(Self {
            identifier: format!("id{}", path.replace('/', "-")),
            name: name.to_string(),
            path: path.to_string(),
            node_type: node_type.to_string(),
            properties: FxHashMap::default(),
            hidden: false,
            shortcut: None,
            parent: RwLock::new(Weak::new()),
            children: RwLock::new(Vec::new()),
        })
    }

    fn from_spec(spec: NodeSpec, parent: &Arc<MemoryNode>) -> Arc<Self> {
        let path = format!("{}/{}", parent.path, spec.name);
        let node = Arc::new(Self {
            identifier: spec
                .identifier
                .unwrap_or_else(|| format!("id{}", path.replace('/', "-"))),
            name: spec.name,
            path,
            node_type: spec.node_type,
            properties: spec.properties,
            hidden: spec.hidden,
            shortcut: spec.shortcut,
            parent: RwLock::new(Arc::downgrade(parent)),
            children: RwLock::new(Vec::new()),
        });
        for child_spec in spec.children {
            let child = Self::from_spec(child_spec, &node);
            node.children.write().push(child);
        }
        node
    }

    fn find_by_identifier(self: &Arc<Self>, identifier: &str) -> Option<Arc<Self>> {
        if self.identifier == identifier {
            return Some(Arc::clone(self));
        }
        for child in self.children.read().iter() {
            if let Some(found) = child.find_by_identifier(identifier) {
                return Some(found);
            }
        }
        None
    }
}

// ============================================================================
// Context-bound handles
// ============================================================================

struct ContextNode {
    node: Arc<MemoryNode>,
    show_hidden: bool,
}

impl ContextNode {
    fn wrap(node: Arc<MemoryNode>, show_hidden: bool) -> NodeHandle {
        Arc::new(Self { node, show_hidden })
    }
}

impl ContentNode for ContextNode {
    fn identifier(&self) -> String {
        self.node.identifier.clone()
    }

    fn name(&self) -> String {
        self.node.name.clone()
    }

    fn path(&self) -> String {
        self.node.path.clone()
    }

    fn node_type(&self) -> String {
        self.node.node_type.clone()
    }

    fn is_of_type(&self, type_name: &str) -> bool {
        // shortcuts are addressable pages, so they count as documents
        self.node.node_type == type_name
            || (type_name == DOCUMENT_TYPE && self.node.node_type == SHORTCUT_TYPE)
    }

    fn property(&self, name: &str) -> Option<String> {
        self.node.properties.get(name).cloned()
    }

    fn parent(&self) -> Option<NodeHandle> {
        let parent = self.node.parent.read().upgrade()?;
        if parent.node_type == SITES_TYPE {
            return None;
        }
        Some(Self::wrap(parent, self.show_hidden))
    }

    fn children_of_type(&self, type_filter: &str) -> Vec<NodeHandle> {
        self.node
            .children
            .read()
            .iter()
            .filter(|child| self.show_hidden || !child.hidden)
            .map(|child| Self::wrap(Arc::clone(child), self.show_hidden))
            .filter(|child| child.is_of_type(type_filter))
            .collect()
    }

    fn is_hidden(&self) -> bool {
        self.node.hidden
    }

    fn is_site_root(&self) -> bool {
        self.node
            .parent
            .read()
            .upgrade()
            .is_some_and(|parent| parent.node_type == SITES_TYPE)
    }

    fn shortcut_target(&self) -> Option<ShortcutTarget> {
        self.node.shortcut.clone()
    }
}

// ============================================================================
// Backend
// ============================================================================

/// In-memory [`ContentBackend`] with one node tree per workspace.
#[derive(Default)]
pub struct MemoryBackend {
    workspaces: RwLock<FxHashMap<String, Arc<MemoryNode>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a site tree into a workspace, creating the workspace's
    /// `/sites` root on first use.
    pub fn insert_site(&self, workspace: &str, site: NodeSpec) {
        let mut workspaces = self.workspaces.write();
        let root = workspaces
            .entry(workspace.to_string())
            .or_insert_with(|| MemoryNode::container("sites", "/sites", SITES_TYPE));
        let site_node = MemoryNode::from_spec(site, root);
        root.children.write().push(site_node);
    }

    fn workspace_root(&self, name: &str) -> Option<Arc<MemoryNode>> {
        self.workspaces.read().get(name).cloned()
    }

    fn raw_site_node(&self, ctx: &ContentContext, site: &Site) -> Option<Arc<MemoryNode>> {
        let root = self.workspace_root(&ctx.workspace_name)?;
        let children = root.children.read();
        children
            .iter()
            .find(|child| child.name == site.name)
            .cloned()
    }
}

impl ContentBackend for MemoryBackend {
    fn workspace_exists(&self, name: &str) -> bool {
        self.workspaces.read().contains_key(name)
    }

    fn site_node(&self, ctx: &ContentContext, site: &Site) -> Option<NodeHandle> {
        let node = self.raw_site_node(ctx, site)?;
        if node.hidden && !ctx.invisible_content_shown {
            return None;
        }
        Some(ContextNode::wrap(node, ctx.invisible_content_shown))
    }

    fn node_by_identifier(&self, ctx: &ContentContext, identifier: &str) -> Option<NodeHandle> {
        let root = self.workspace_root(&ctx.workspace_name)?;
        let node = root.find_by_identifier(identifier)?;
        if node.hidden && !ctx.invisible_content_shown {
            return None;
        }
        Some(ContextNode::wrap(node, ctx.invisible_content_shown))
    }

    fn node_at(
        &self,
        ctx: &ContentContext,
        site: &Site,
        relative_path: &str,
    ) -> Option<NodeHandle> {
        let mut current = self.raw_site_node(ctx, site)?;
        for segment in relative_path.split('/').filter(|s| !s.is_empty()) {
            let next = current
                .children
                .read()
                .iter()
                .find(|child| child.name == segment)
                .cloned()?;
            current = next;
        }
        if current.hidden && !ctx.invisible_content_shown {
            return None;
        }
        Some(ContextNode::wrap(current, ctx.invisible_content_shown))
    }
}
