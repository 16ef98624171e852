//! Error-signal observers attached to a page before navigation.
//!
//! Each observer drains one CDP event stream on its own task, bumps the
//! shared tally and writes a diagnostic line to stderr. Attaching happens
//! before the navigate call so signals raised while the page loads are
//! never missed; the tasks stay alive until the context closes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chromiumoxide::cdp::js_protocol::runtime::{EventConsoleApiCalled, EventExceptionThrown};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::console::{format_console_args, format_exception, is_error_level};
use crate::error::Result;

/// Shared error counter for one URL check.
///
/// Observer tasks race with the main control flow, so increments are
/// atomic. Monotonically non-decreasing; the final value is read once,
/// after the context closes, and folded into the run total.
#[derive(Debug, Clone, Default)]
pub struct ErrorTally {
    count: Arc<AtomicUsize>,
}

impl ErrorTally {
    /// Creates a tally at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one error signal.
    pub fn bump(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// The number of error signals recorded so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

pub(crate) fn console_error_line(url: &str, message: &str) -> String {
    format!("URL: {url} - ERROR: {message}")
}

pub(crate) fn exception_line(url: &str, exception: &str) -> String {
    format!("URL: {url} = EXCEPTION: {exception}")
}

/// Subscribes the console observer: every console message of severity
/// error bumps the tally and emits a diagnostic line.
pub(crate) async fn spawn_console_observer(
    page: &Page,
    url: String,
    tally: ErrorTally,
) -> Result<JoinHandle<()>> {
    let mut events = page.event_listener::<EventConsoleApiCalled>().await?;

    Ok(tokio::spawn(async move {
        while let Some(event) = events.next().await {
            if !is_error_level(&event.r#type) {
                continue;
            }
            let message = format_console_args(&event.args);
            tally.bump();
            eprintln!("{}", console_error_line(&url, &message));
        }
        debug!(%url, "console observer finished");
    }))
}

/// Subscribes the uncaught-exception observer: every page exception bumps
/// the tally and emits a diagnostic line.
pub(crate) async fn spawn_exception_observer(
    page: &Page,
    url: String,
    tally: ErrorTally,
) -> Result<JoinHandle<()>> {
    let mut events = page.event_listener::<EventExceptionThrown>().await?;

    Ok(tokio::spawn(async move {
        while let Some(event) = events.next().await {
            let exception = format_exception(&event.exception_details);
            tally.bump();
            eprintln!("{}", exception_line(&url, &exception));
        }
        debug!(%url, "exception observer finished");
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_bumps() {
        let tally = ErrorTally::new();
        assert_eq!(tally.count(), 0);

        tally.bump();
        tally.bump();
        assert_eq!(tally.count(), 2);
    }

    #[test]
    fn tally_clones_share_the_count() {
        let tally = ErrorTally::new();
        let observer_side = tally.clone();

        observer_side.bump();
        assert_eq!(tally.count(), 1);
    }

    #[test]
    fn console_error_line_format() {
        assert_eq!(
            console_error_line("https://a.example", "boom"),
            "URL: https://a.example - ERROR: boom"
        );
    }

    #[test]
    fn exception_line_format() {
        assert_eq!(
            exception_line("https://a.example", "Error: kaboom"),
            "URL: https://a.example = EXCEPTION: Error: kaboom"
        );
    }
}
