//! Logging utilities with colored module prefixes.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with a colored module prefix
//! - `debug!` macro for verbose-only diagnostics
//! - `warn!` macro for warnings
//!
//! # Example
//!
//! ```ignore
//! log!("routing"; "matched {} against {}", request_path, node_path);
//! debug!("detection"; "no preset matched for dimension {}", name);
//! ```

use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::io::{Write, stderr};
use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global verbose flag (set by the embedding application)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Serializes writers so concurrent requests don't interleave lines.
static OUTPUT: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

// ============================================================================
// Log Macros
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when verbose mode is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Log a warning message
#[macro_export]
macro_rules! warn {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::warn($module, &format!($($arg)*))
    }};
}

// ============================================================================
// Writers
// ============================================================================

/// Write a log line with a cyan module prefix.
pub fn log(module: &str, message: &str) {
    let _guard = OUTPUT.lock();
    let mut out = stderr();
    let _ = writeln!(out, "{} {}", format!("[{module}]").cyan(), message);
}

/// Write a warning line with a yellow module prefix.
pub fn warn(module: &str, message: &str) {
    let _guard = OUTPUT.lock();
    let mut out = stderr();
    let _ = writeln!(
        out,
        "{} {} {}",
        format!("[{module}]").yellow(),
        "warning:".yellow().bold(),
        message
    );
}
