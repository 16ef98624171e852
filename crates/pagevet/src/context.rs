//! Per-URL isolated context: one page, its observers, and navigation.

use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::network::{
    EventResponseReceived, LoaderId, ResourceType,
};
use chromiumoxide::cdp::browser_protocol::page::{EventLifecycleEvent, NavigateParams};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::debug;

use crate::config::WaitUntil;
use crate::error::{CheckError, Result};
use crate::observe::{spawn_console_observer, spawn_exception_observer, ErrorTally};

/// Grace period for the main document response to show up after the
/// wait-until condition is reached. The response normally precedes the
/// lifecycle event, but the two arrive on independent streams.
const STATUS_GRACE: Duration = Duration::from_millis(250);

/// Bound on waiting for an observer task to finish draining its stream
/// after the page has closed.
const OBSERVER_DRAIN: Duration = Duration::from_secs(2);

/// An isolated browsing context bound to a single URL check.
///
/// Owns the page, the CDP browser-context id and the observer tasks.
/// Created by [`crate::CheckBrowser::isolated_context`] and always
/// released through [`crate::CheckBrowser::dispose_context`], on every
/// path of a check.
pub struct IsolatedContext {
    page: Page,
    context_id: BrowserContextId,
    observers: Vec<JoinHandle<()>>,
}

impl IsolatedContext {
    pub(crate) fn new(page: Page, context_id: BrowserContextId) -> Self {
        Self {
            page,
            context_id,
            observers: Vec::new(),
        }
    }

    /// Attaches the console-error and uncaught-exception observers.
    ///
    /// Must run before navigation so signals raised while the page loads
    /// are observed.
    ///
    /// # Errors
    ///
    /// Returns the CDP error when an event listener cannot be installed.
    pub async fn observe(&mut self, url: &str, tally: &ErrorTally) -> Result<()> {
        self.observers
            .push(spawn_console_observer(&self.page, url.to_owned(), tally.clone()).await?);
        self.observers
            .push(spawn_exception_observer(&self.page, url.to_owned(), tally.clone()).await?);
        Ok(())
    }

    /// Navigates to `url` and waits for `wait_until`, bounded by `limit`.
    ///
    /// Returns the HTTP status of the main document response when the
    /// navigation produced one; `data:` URLs and similar yield `None`.
    ///
    /// # Errors
    ///
    /// [`CheckError::NavigationTimeout`] when the condition is not
    /// reached within `limit`; [`CheckError::NavigationFailed`] when the
    /// browser reports a hard failure (net error, closed target).
    pub async fn navigate(
        &self,
        url: &str,
        wait_until: WaitUntil,
        limit: Duration,
    ) -> Result<Option<i64>> {
        let mut lifecycle = self.page.event_listener::<EventLifecycleEvent>().await?;
        let mut responses = self.page.event_listener::<EventResponseReceived>().await?;

        let mut status: Option<i64> = None;
        let mut loader_id: Option<LoaderId> = None;

        let navigation = async {
            let nav = self.page.execute(NavigateParams::new(url)).await?;
            if let Some(reason) = nav.result.error_text.clone() {
                return Err(CheckError::NavigationFailed {
                    url: url.to_owned(),
                    reason,
                });
            }
            loader_id = nav.result.loader_id.clone();

            let Some(event_name) = wait_until.lifecycle_event() else {
                // Commit is satisfied by the navigate command itself.
                return Ok(());
            };

            loop {
                tokio::select! {
                    Some(event) = lifecycle.next() => {
                        let ours = loader_id
                            .as_ref()
                            .map_or(true, |id| *id == event.loader_id);
                        if ours && event.name == event_name {
                            return Ok(());
                        }
                    }
                    Some(event) = responses.next() => {
                        if status.is_none() && is_document_response(&event, loader_id.as_ref()) {
                            status = Some(event.response.status);
                        }
                    }
                    else => {
                        return Err(CheckError::NavigationFailed {
                            url: url.to_owned(),
                            reason: "event streams closed before navigation settled".to_owned(),
                        });
                    }
                }
            }
        };

        match timeout(limit, navigation).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => {
                return Err(CheckError::NavigationTimeout {
                    url: url.to_owned(),
                    timeout: limit,
                })
            }
        }

        if status.is_none() {
            while let Ok(Some(event)) = timeout(STATUS_GRACE, responses.next()).await {
                if is_document_response(&event, loader_id.as_ref()) {
                    status = Some(event.response.status);
                    break;
                }
            }
        }

        debug!(%url, ?status, "navigation settled");
        Ok(status)
    }

    /// Closes the page and stops the observers; returns the context id so
    /// the owner can dispose the browser context.
    ///
    /// With `drain_observers` the observer tasks may finish processing
    /// events delivered while the context was open; without it they are
    /// aborted first so nothing fires for this URL afterwards.
    pub(crate) async fn close(self, drain_observers: bool) -> BrowserContextId {
        let IsolatedContext {
            page,
            context_id,
            observers,
        } = self;

        if !drain_observers {
            for observer in &observers {
                observer.abort();
            }
        }

        if let Err(e) = page.close().await {
            debug!("page close failed: {e}");
        }

        // The event streams end once the target is gone; the tasks drain
        // whatever was already delivered and exit.
        for mut observer in observers {
            if timeout(OBSERVER_DRAIN, &mut observer).await.is_err() {
                observer.abort();
            }
        }

        context_id
    }
}

/// The main document's HTTP response. Non-HTTP schemes (`data:`,
/// `about:`) have nothing to status-check.
fn is_document_response(event: &EventResponseReceived, loader_id: Option<&LoaderId>) -> bool {
    if !matches!(event.r#type, ResourceType::Document) {
        return false;
    }
    if !event.response.url.starts_with("http://") && !event.response.url.starts_with("https://") {
        return false;
    }
    loader_id.map_or(true, |id| *id == event.loader_id)
}
