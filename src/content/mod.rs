//! Content collaborators - the contracts the routing core consumes.
//!
//! The persistent content tree, site/domain storage and workspace handling
//! live outside this crate; this module specifies them at their interface
//! boundary and provides an in-memory implementation for tests and demos.
//!
//! # Module Structure
//!
//! - [`node`]: `ContentNode` trait, node-type constants, shortcut targets
//! - [`context`]: `ContentContext` and the `ContentBackend` traversal trait
//! - [`context_path`]: codec for the reserved `path@workspace;dims` syntax
//! - [`site`]: `Site`, `SiteSource` and the memoizing `SiteDirectory`
//! - [`shortcut`]: shortcut chain resolution with a depth guard
//! - [`memory`]: in-memory backend

pub mod context_path;
pub mod memory;
pub mod shortcut;

mod context;
mod node;
mod site;

pub use context::{ContentBackend, ContentContext, LIVE_WORKSPACE};
pub use node::{
    ContentNode, DOCUMENT_TYPE, NodeHandle, SHORTCUT_TYPE, ShortcutTarget,
    URI_PATH_SEGMENT_PROPERTY,
};
pub use shortcut::{MAX_SHORTCUT_DEPTH, ShortcutError, ShortcutResolution, resolve_shortcuts};
pub use site::{Site, SiteDirectory, SiteSource};
