//! Run configuration for the URL checker.

use std::fmt;
use std::time::Duration;

use crate::engine::Engine;
use crate::error::{CheckError, Result};

/// The navigation-completion criterion.
///
/// Maps to the browser's page lifecycle: a navigation is "done" either
/// when the request committed, when the DOM finished parsing, or when the
/// load event fired with all subresources fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitUntil {
    /// The DOM has been parsed (`DOMContentLoaded`).
    DomContentLoaded,
    /// The load event fired.
    #[default]
    Load,
    /// The navigation request committed; content may still be loading.
    Commit,
}

impl WaitUntil {
    /// The CDP lifecycle event satisfying this condition, if any.
    ///
    /// `Commit` is satisfied by completion of the navigate command itself
    /// and has no lifecycle event to wait for.
    pub(crate) fn lifecycle_event(self) -> Option<&'static str> {
        match self {
            WaitUntil::DomContentLoaded => Some("DOMContentLoaded"),
            WaitUntil::Load => Some("load"),
            WaitUntil::Commit => None,
        }
    }
}

impl fmt::Display for WaitUntil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WaitUntil::DomContentLoaded => "domcontentloaded",
            WaitUntil::Load => "load",
            WaitUntil::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// Immutable parameters for one checker run.
///
/// Built once from command-line input via [`CheckConfig::new`] and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Target URLs, visited in order. Empty means "do nothing, report
    /// zero errors".
    pub urls: Vec<String>,
    /// Engine to launch.
    pub engine: Engine,
    /// Run with a visible browser window instead of headless.
    pub headed: bool,
    /// Bound on each navigation.
    pub timeout: Duration,
    /// What "navigation complete" means.
    pub wait_until: WaitUntil,
}

impl CheckConfig {
    /// Default navigation timeout, in seconds.
    pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

    /// Builds a validated configuration.
    ///
    /// `timeout_secs` is the navigation bound as fractional seconds, the
    /// way it arrives from the command line.
    ///
    /// # Errors
    ///
    /// [`CheckError::InvalidTimeout`] when the timeout is not a positive
    /// finite number; [`CheckError::EngineUnsupported`] when the engine
    /// cannot be driven by the CDP backend.
    pub fn new(
        urls: Vec<String>,
        engine: Engine,
        headed: bool,
        timeout_secs: f64,
        wait_until: WaitUntil,
    ) -> Result<Self> {
        if !timeout_secs.is_finite() || timeout_secs <= 0.0 {
            return Err(CheckError::InvalidTimeout {
                seconds: timeout_secs,
            });
        }
        if !engine.is_chromium_family() {
            return Err(CheckError::EngineUnsupported {
                engine: engine.to_string(),
            });
        }

        Ok(Self {
            urls,
            engine,
            headed,
            timeout: Duration::from_secs_f64(timeout_secs),
            wait_until,
        })
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            engine: Engine::default(),
            headed: false,
            timeout: Duration::from_secs_f64(Self::DEFAULT_TIMEOUT_SECS),
            wait_until: WaitUntil::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_timeout(timeout_secs: f64) -> Result<CheckConfig> {
        CheckConfig::new(
            vec!["https://example.com".into()],
            Engine::Chromium,
            false,
            timeout_secs,
            WaitUntil::Load,
        )
    }

    #[test]
    fn accepts_fractional_timeouts() {
        let config = config_with_timeout(0.5).expect("0.5s is valid");
        assert_eq!(config.timeout, Duration::from_millis(500));
    }

    #[test]
    fn rejects_non_positive_timeouts() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = config_with_timeout(bad).unwrap_err();
            assert!(
                matches!(err, CheckError::InvalidTimeout { .. }),
                "timeout {bad} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_cdp_engines() {
        let err = CheckConfig::new(vec![], Engine::Firefox, false, 30.0, WaitUntil::Load)
            .unwrap_err();
        assert!(matches!(err, CheckError::EngineUnsupported { .. }));
    }

    #[test]
    fn defaults_match_the_documented_surface() {
        let config = CheckConfig::default();
        assert!(config.urls.is_empty());
        assert_eq!(config.engine, Engine::Chromium);
        assert!(!config.headed);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.wait_until, WaitUntil::Load);
    }

    #[test]
    fn wait_until_lifecycle_mapping() {
        assert_eq!(
            WaitUntil::DomContentLoaded.lifecycle_event(),
            Some("DOMContentLoaded")
        );
        assert_eq!(WaitUntil::Load.lifecycle_event(), Some("load"));
        assert_eq!(WaitUntil::Commit.lifecycle_event(), None);
    }

    #[test]
    fn wait_until_display_matches_cli_names() {
        assert_eq!(WaitUntil::DomContentLoaded.to_string(), "domcontentloaded");
        assert_eq!(WaitUntil::Load.to_string(), "load");
        assert_eq!(WaitUntil::Commit.to_string(), "commit");
    }
}
