#![deny(missing_docs)]
//! Shared logging utilities for the dashboard workspace.
//!
//! This crate provides the `dash_*` logging macros used across the codebase,
//! a per-thread render pass counter that render logs are tagged with, and a
//! minimal test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Number of the render pass currently executing on this thread.
    static RENDER_PASS: Cell<u64> = const { Cell::new(0) };
}

/// Records the render pass number for the current thread.
/// The renderer calls this once at the start of every pass.
pub fn set_render_pass(pass: u64) {
    RENDER_PASS.with(|v| v.set(pass));
}

/// Returns the render pass number for the current thread.
/// Returns 0 before the first pass.
pub fn current_render_pass() -> u64 {
    RENDER_PASS.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! dash_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! dash_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! dash_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! dash_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! dash_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Logs a debug-level message prefixed with the current render pass.
#[macro_export]
macro_rules! dash_render_debug {
    ($($arg:tt)*) => {{
        log::debug!(
            "[pass {}] {}",
            $crate::current_render_pass(),
            format_args!($($arg)*)
        );
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Debug in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // A logger may already be installed by another test in this binary.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
