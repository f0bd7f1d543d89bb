//! Global config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement, so an
//! embedding server can swap the dimension configuration without restarting
//! in-flight request handling.

use crate::config::DimensionConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<DimensionConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(DimensionConfig::default()));

/// Load the currently active dimension configuration.
#[inline]
pub fn cfg() -> Arc<DimensionConfig> {
    CONFIG.load_full()
}

/// Install a new dimension configuration and return the shared handle.
#[inline]
pub fn init_config(config: DimensionConfig) -> Arc<DimensionConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}
