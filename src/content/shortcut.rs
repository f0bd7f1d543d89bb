//! Shortcut target resolution.

use thiserror::Error;

use crate::content::{
    ContentBackend, ContentContext, DOCUMENT_TYPE, NodeHandle, SHORTCUT_TYPE, ShortcutTarget,
};

/// Maximum shortcut chain length. Chained shortcuts can form cycles; the
/// guard turns an endless chain into a resolution failure.
pub const MAX_SHORTCUT_DEPTH: usize = 32;

/// Terminal outcome of following a shortcut chain.
#[derive(Clone)]
pub enum ShortcutResolution {
    /// The chain ended on a regular node.
    Node(NodeHandle),
    /// The chain ended on an external URI.
    ExternalUri(String),
}

impl std::fmt::Debug for ShortcutResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node(node) => f.debug_tuple("Node").field(&node.path()).finish(),
            Self::ExternalUri(uri) => f.debug_tuple("ExternalUri").field(uri).finish(),
        }
    }
}

/// A shortcut chain that cannot be followed to a terminal target.
#[derive(Debug, Error)]
pub enum ShortcutError {
    #[error("shortcut `{identifier}` has no resolvable target")]
    Unresolvable { identifier: String },

    #[error("shortcut chain at `{identifier}` exceeds {MAX_SHORTCUT_DEPTH} hops")]
    DepthExceeded { identifier: String },
}

/// Follow shortcut targets until a non-shortcut node or an external URI is
/// reached. Non-shortcut input passes through unchanged.
pub fn resolve_shortcuts(
    backend: &dyn ContentBackend,
    ctx: &ContentContext,
    node: NodeHandle,
) -> Result<ShortcutResolution, ShortcutError> {
    let start = node.identifier();
    let mut current = node;

    for _ in 0..MAX_SHORTCUT_DEPTH {
        if !current.is_of_type(SHORTCUT_TYPE) {
            return Ok(ShortcutResolution::Node(current));
        }

        let target = current
            .shortcut_target()
            .ok_or_else(|| unresolvable(&current))?;
        current = match target {
            ShortcutTarget::FirstChild => current
                .children_of_type(DOCUMENT_TYPE)
                .into_iter()
                .next()
                .ok_or_else(|| unresolvable(&current))?,
            ShortcutTarget::Parent => current.parent().ok_or_else(|| unresolvable(&current))?,
            ShortcutTarget::Node(identifier) => backend
                .node_by_identifier(ctx, &identifier)
                .ok_or_else(|| unresolvable(&current))?,
            ShortcutTarget::Uri(uri) => return Ok(ShortcutResolution::ExternalUri(uri)),
        };
    }

    Err(ShortcutError::DepthExceeded { identifier: start })
}

fn unresolvable(node: &NodeHandle) -> ShortcutError {
    ShortcutError::Unresolvable {
        identifier: node.identifier(),
    }
}
