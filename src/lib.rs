//! Facetroute - content dimension detection and node path routing for
//! multi-workspace content trees.
//!
//! Content exists in dimensions (language, country, ...) and workspaces
//! (live, per-user drafts). This crate detects the active dimension presets
//! and workspace from an inbound request's host and path, matches the
//! remaining request path against a content tree, and resolves nodes back
//! into request paths decorated with the URI constraints the dimension
//! configuration demands.
//!
//! The content tree itself is an external collaborator, specified by the
//! [`content::ContentBackend`] and [`content::ContentNode`] contracts; an
//! in-memory implementation ships for tests and demos.

pub mod config;
pub mod content;
pub mod core;
pub mod detection;
pub mod linking;
pub mod logger;
pub mod routing;

pub use config::DimensionConfig;
pub use detection::{DetectedSubgraph, RequestInfo, SubgraphDetector};
pub use routing::{
    FrontendRoutePart, MatchResult, ResolveResult, ResolveTarget, RoutePartOptions,
    RouteParameters, RoutingError,
};
