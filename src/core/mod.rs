//! Core types - pure abstractions shared across the codebase.

mod constraints;
mod coordinates;
mod url;

pub use constraints::{HostPrefix, HostSuffix, UriConstraints};
pub use coordinates::CoordinateSet;
pub use url::UriPath;
