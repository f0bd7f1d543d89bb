//! Reserved context-path codec.
//!
//! A context path carries workspace and dimension information directly in a
//! request or node path, using the syntax
//!
//! ```text
//! <nodePath>@<workspaceName>[;<dimension>=<value>[,<value>...][&<dimension>=...]]
//! ```
//!
//! e.g. `/sites/examplecom/about@user-jdoe;language=de,en&country=global`.
//! Dimension values are percent-encoded on the wire.

use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use thiserror::Error;

use crate::content::LIVE_WORKSPACE;
use crate::core::CoordinateSet;

/// Longest accepted workspace name.
const MAX_WORKSPACE_NAME_LEN: usize = 200;

/// Decoded parts of a context path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextPathParts {
    /// The node path part before the `@` marker. May be empty or relative.
    pub node_path: String,
    /// The workspace name.
    pub workspace_name: String,
    /// Explicit dimension values, empty when the path carries none.
    pub dimensions: CoordinateSet,
}

/// Malformed context-path encodings.
#[derive(Debug, Error)]
pub enum ContextPathError {
    #[error("path `{0}` contains no context marker")]
    MissingContext(String),

    #[error("invalid workspace name `{0}` in context path")]
    InvalidWorkspaceName(String),

    #[error("invalid dimension serialization `{0}` in context path")]
    InvalidDimensionSerialization(String),
}

/// Whether the given path uses the reserved context-path syntax.
#[inline]
pub fn is_context_path(path: &str) -> bool {
    path.contains('@')
}

/// Decode a context path into its parts.
///
/// Fails on malformed input; callers that can degrade gracefully fall back
/// to the live workspace with no explicit dimensions.
pub fn decode(path: &str) -> Result<ContextPathParts, ContextPathError> {
    let (node_path, context) = path
        .split_once('@')
        .ok_or_else(|| ContextPathError::MissingContext(path.to_string()))?;

    let (workspace_name, dimension_part) = match context.split_once(';') {
        Some((workspace, dimensions)) => (workspace, Some(dimensions)),
        None => (context, None),
    };

    if !is_valid_workspace_name(workspace_name) {
        return Err(ContextPathError::InvalidWorkspaceName(
            workspace_name.to_string(),
        ));
    }

    let mut dimensions = CoordinateSet::new();
    if let Some(serialized) = dimension_part {
        for pair in serialized.split('&') {
            let (name, values) = pair.split_once('=').ok_or_else(|| {
                ContextPathError::InvalidDimensionSerialization(serialized.to_string())
            })?;
            if name.is_empty() {
                return Err(ContextPathError::InvalidDimensionSerialization(
                    serialized.to_string(),
                ));
            }
            let values = values
                .split(',')
                .map(|value| {
                    percent_decode_str(value)
                        .decode_utf8()
                        .map(|s| s.into_owned())
                        .map_err(|_| {
                            ContextPathError::InvalidDimensionSerialization(
                                serialized.to_string(),
                            )
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            dimensions.insert(name, values);
        }
    }

    Ok(ContextPathParts {
        node_path: node_path.to_string(),
        workspace_name: workspace_name.to_string(),
        dimensions,
    })
}

/// Encode a node path with workspace and dimension context.
///
/// The live workspace without explicit dimensions encodes as the plain node
/// path.
pub fn encode(node_path: &str, workspace_name: &str, dimensions: &CoordinateSet) -> String {
    format!(
        "{node_path}{}",
        encode_suffix(workspace_name, dimensions)
    )
}

/// Encode only the `@workspace;dimensions` suffix.
///
/// Returns an empty string for the live workspace without dimensions.
pub fn encode_suffix(workspace_name: &str, dimensions: &CoordinateSet) -> String {
    if workspace_name == LIVE_WORKSPACE && dimensions.is_empty() {
        return String::new();
    }

    let mut suffix = format!("@{workspace_name}");
    if !dimensions.is_empty() {
        suffix.push(';');
        let serialized = dimensions
            .iter()
            .map(|(name, values)| {
                let values = values
                    .iter()
                    .map(|value| utf8_percent_encode(value, NON_ALPHANUMERIC).to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{name}={values}")
            })
            .collect::<Vec<_>>()
            .join("&");
        suffix.push_str(&serialized);
    }
    suffix
}

fn is_valid_workspace_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_WORKSPACE_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}
