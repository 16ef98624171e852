//! # pagevet
//!
//! A browser smoke-testing library built on chromiumoxide.
//!
//! Given a list of URLs, pagevet launches one real Chromium-family browser,
//! visits each URL in a fresh isolated browsing context, and counts the
//! error signals the page produced while loading: console messages of
//! severity error, uncaught script exceptions, navigation timeouts, hard
//! navigation failures, and non-200 document statuses.
//!
//! ## Architecture
//!
//! - **CheckBrowser**: manages the browser process lifecycle
//! - **IsolatedContext**: a per-URL browsing context (separate storage,
//!   downloads denied, service workers bypassed) owning a single page
//! - **ErrorTally**: thread-safe error counter shared with the observers
//! - **run**: the sequential per-URL fold producing the aggregate count
//!
//! ## Example Usage
//!
//! ```ignore
//! use pagevet::{run, CheckConfig, Engine, WaitUntil};
//!
//! #[tokio::main]
//! async fn main() -> pagevet::Result<()> {
//!     let config = CheckConfig::new(
//!         vec!["https://example.com".into()],
//!         Engine::Chromium,
//!         false,
//!         30.0,
//!         WaitUntil::Load,
//!     )?;
//!
//!     let errors = run(&config).await?;
//!     std::process::exit(if errors > 0 { 1 } else { 0 });
//! }
//! ```
//!
//! ## Testing Strategy
//!
//! Unit tests cover the browser-free logic (engine resolution, config
//! validation, diagnostic formatting). Integration tests in `tests/`
//! require Chrome installed and are `#[ignore]`d by default; run them
//! with `cargo test -- --ignored`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
pub mod check;
pub mod config;
mod console;
pub mod context;
pub mod engine;
pub mod error;
pub mod observe;

// Re-export main types for convenience
pub use browser::CheckBrowser;
pub use check::run;
pub use config::{CheckConfig, WaitUntil};
pub use context::IsolatedContext;
pub use engine::Engine;
pub use error::{CheckError, Result};
pub use observe::ErrorTally;
