//! Error types for URL checking operations.
//!
//! Distinguishes configuration problems (rejected before any browser
//! work), browser lifecycle failures, and per-URL navigation failures.
//! Per-URL variants are converted into counted diagnostics by the check
//! loop and never abort a run.

use std::time::Duration;
use thiserror::Error;

/// The main error type for all checking operations.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The selected engine cannot be driven over the Chrome DevTools
    /// Protocol.
    ///
    /// The CLI accepts the full engine set for compatibility, but only
    /// Chromium-family engines can actually be launched.
    #[error("engine '{engine}' is not supported by the CDP backend; pick a Chromium-family engine")]
    EngineUnsupported {
        /// The engine that was selected.
        engine: String,
    },

    /// No executable could be located for the selected engine.
    #[error("no executable found for engine '{engine}' (searched: {searched})")]
    BrowserNotFound {
        /// The engine that was selected.
        engine: String,
        /// The executable names that were probed.
        searched: String,
    },

    /// The navigation timeout was zero, negative, or not finite.
    #[error("invalid timeout: {seconds} (must be a positive, finite number of seconds)")]
    InvalidTimeout {
        /// The rejected value, in seconds.
        seconds: f64,
    },

    /// Failed to launch the browser process.
    ///
    /// This typically occurs when the browser is not installed or the
    /// executable is not runnable in the current environment.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Human-readable reason for the launch failure.
        reason: String,
        /// Optional underlying error that caused the failure.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to create or configure an isolated browsing context.
    #[error("context setup for '{url}' failed: {reason}")]
    ContextSetup {
        /// The URL whose context could not be set up.
        url: String,
        /// Reason for the setup failure.
        reason: String,
    },

    /// Navigation failed outright (net error, closed target, ...).
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The URL that failed to load.
        url: String,
        /// Reason reported by the browser.
        reason: String,
    },

    /// Navigation did not reach the configured wait-until condition
    /// within the timeout.
    #[error("navigation to '{url}' timed out after {timeout:?}")]
    NavigationTimeout {
        /// The URL that did not settle in time.
        url: String,
        /// The configured bound.
        timeout: Duration,
    },

    /// Wraps errors from the chromiumoxide library.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),

    /// Generic I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for checking operations.
pub type Result<T> = std::result::Result<T, CheckError>;
