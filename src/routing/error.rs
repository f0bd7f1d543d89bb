//! Routing error taxonomy.

use thiserror::Error;

use crate::content::ShortcutError;
use crate::detection::DetectionError;

/// Failures during route matching and resolution.
///
/// Most variants are recovered into a plain no-match at the route level so a
/// surrounding route chain can try the next candidate. Two are not:
/// [`NoHomepage`](RoutingError::NoHomepage) (an empty request path against a
/// site with no content means nothing is addressable at all) and
/// [`MissingNodeProperty`](RoutingError::MissingNodeProperty) (a
/// data-integrity gap that link generation must not paper over).
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("no workspace `{0}` exists")]
    NoWorkspace(String),

    #[error("no site found for host `{0}`")]
    NoSite(String),

    #[error("site `{0}` has no root node in workspace `{1}`")]
    NoSiteNode(String, String),

    #[error("no node matches request path `{0}`")]
    NoSuchNode(String),

    #[error("site `{0}` has no homepage node")]
    NoHomepage(String),

    #[error("node `{identifier}` lacks required property `{property}`")]
    MissingNodeProperty {
        identifier: String,
        property: String,
    },

    #[error("shortcut resolution failed: {0}")]
    InvalidShortcut(#[from] ShortcutError),

    #[error("request path `{path}` lacks the configured suffix `{suffix}`")]
    InvalidRequestPath { path: String, suffix: String },

    #[error(transparent)]
    Detection(#[from] DetectionError),
}
