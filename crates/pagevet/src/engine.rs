//! Browser engine selection and executable discovery.
//!
//! The checker speaks the Chrome DevTools Protocol, so every launchable
//! engine is a Chromium-family channel. Discovery probes PATH first (the
//! names package managers install) and falls back to the conventional
//! per-OS install locations.

use std::fmt;
use std::path::PathBuf;

use crate::error::{CheckError, Result};

/// A browser engine or release channel the checker can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    /// Generic Chromium; also matches an installed Chrome as a fallback.
    #[default]
    Chromium,
    /// Google Chrome, stable channel.
    Chrome,
    /// Google Chrome, beta channel.
    ChromeBeta,
    /// Microsoft Edge, stable channel.
    Msedge,
    /// Microsoft Edge, beta channel.
    MsedgeBeta,
    /// Microsoft Edge, dev channel.
    MsedgeDev,
    /// Mozilla Firefox. Accepted on the surface, rejected at launch:
    /// Firefox does not speak CDP.
    Firefox,
    /// WebKit. Accepted on the surface, rejected at launch.
    Webkit,
}

impl Engine {
    /// Whether this engine routes to the Chromium engine and can be
    /// driven by the CDP backend.
    #[must_use]
    pub fn is_chromium_family(self) -> bool {
        !matches!(self, Engine::Firefox | Engine::Webkit)
    }

    /// Executable names probed on PATH, in preference order.
    fn path_names(self) -> &'static [&'static str] {
        match self {
            Engine::Chromium => &[
                "chromium",
                "chromium-browser",
                "google-chrome-stable",
                "google-chrome",
            ],
            Engine::Chrome => &["google-chrome-stable", "google-chrome", "chrome"],
            Engine::ChromeBeta => &["google-chrome-beta"],
            Engine::Msedge => &["microsoft-edge-stable", "microsoft-edge", "msedge"],
            Engine::MsedgeBeta => &["microsoft-edge-beta"],
            Engine::MsedgeDev => &["microsoft-edge-dev"],
            Engine::Firefox | Engine::Webkit => &[],
        }
    }

    /// Conventional install locations probed after PATH.
    fn install_paths(self) -> &'static [&'static str] {
        if cfg!(target_os = "windows") {
            match self {
                Engine::Chromium => &[r"C:\Program Files\Chromium\Application\chrome.exe"],
                Engine::Chrome => &[
                    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
                    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
                ],
                Engine::ChromeBeta => {
                    &[r"C:\Program Files\Google\Chrome Beta\Application\chrome.exe"]
                }
                Engine::Msedge => &[
                    r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe",
                    r"C:\Program Files\Microsoft\Edge\Application\msedge.exe",
                ],
                Engine::MsedgeBeta => {
                    &[r"C:\Program Files (x86)\Microsoft\Edge Beta\Application\msedge.exe"]
                }
                Engine::MsedgeDev => {
                    &[r"C:\Program Files (x86)\Microsoft\Edge Dev\Application\msedge.exe"]
                }
                Engine::Firefox | Engine::Webkit => &[],
            }
        } else if cfg!(target_os = "macos") {
            match self {
                Engine::Chromium => &["/Applications/Chromium.app/Contents/MacOS/Chromium"],
                Engine::Chrome => {
                    &["/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"]
                }
                Engine::ChromeBeta => {
                    &["/Applications/Google Chrome Beta.app/Contents/MacOS/Google Chrome Beta"]
                }
                Engine::Msedge => {
                    &["/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge"]
                }
                Engine::MsedgeBeta => {
                    &["/Applications/Microsoft Edge Beta.app/Contents/MacOS/Microsoft Edge Beta"]
                }
                Engine::MsedgeDev => {
                    &["/Applications/Microsoft Edge Dev.app/Contents/MacOS/Microsoft Edge Dev"]
                }
                Engine::Firefox | Engine::Webkit => &[],
            }
        } else {
            match self {
                Engine::Chromium => &[
                    "/usr/bin/chromium",
                    "/usr/bin/chromium-browser",
                    "/snap/bin/chromium",
                ],
                Engine::Chrome => &[
                    "/usr/bin/google-chrome-stable",
                    "/usr/bin/google-chrome",
                    "/opt/google/chrome/chrome",
                ],
                Engine::ChromeBeta => {
                    &["/usr/bin/google-chrome-beta", "/opt/google/chrome-beta/chrome"]
                }
                Engine::Msedge => &[
                    "/usr/bin/microsoft-edge-stable",
                    "/usr/bin/microsoft-edge",
                    "/opt/microsoft/msedge/msedge",
                ],
                Engine::MsedgeBeta => &[
                    "/usr/bin/microsoft-edge-beta",
                    "/opt/microsoft/msedge-beta/msedge",
                ],
                Engine::MsedgeDev => &[
                    "/usr/bin/microsoft-edge-dev",
                    "/opt/microsoft/msedge-dev/msedge",
                ],
                Engine::Firefox | Engine::Webkit => &[],
            }
        }
    }

    /// Locates the executable for this engine.
    ///
    /// `Ok(None)` means "let chromiumoxide's own auto-detection have the
    /// last word", which is only offered for the generic [`Engine::Chromium`]
    /// selection. Channel selections must resolve to their channel binary.
    ///
    /// # Errors
    ///
    /// [`CheckError::EngineUnsupported`] for non-Chromium engines;
    /// [`CheckError::BrowserNotFound`] when a channel binary cannot be
    /// located.
    pub fn resolve_executable(self) -> Result<Option<PathBuf>> {
        if !self.is_chromium_family() {
            return Err(CheckError::EngineUnsupported {
                engine: self.to_string(),
            });
        }

        for name in self.path_names() {
            if let Ok(path) = which::which(name) {
                return Ok(Some(path));
            }
        }

        if let Some(path) = self
            .install_paths()
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
        {
            return Ok(Some(path));
        }

        if matches!(self, Engine::Chromium) {
            return Ok(None);
        }

        Err(CheckError::BrowserNotFound {
            engine: self.to_string(),
            searched: self.path_names().join(", "),
        })
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Engine::Chromium => "chromium",
            Engine::Chrome => "chrome",
            Engine::ChromeBeta => "chrome-beta",
            Engine::Msedge => "msedge",
            Engine::MsedgeBeta => "msedge-beta",
            Engine::MsedgeDev => "msedge-dev",
            Engine::Firefox => "firefox",
            Engine::Webkit => "webkit",
        };
        f.write_str(name)
    }
}
