//! Browser lifecycle management and isolated-context creation.
//!
//! One [`CheckBrowser`] serves a whole run. Every URL gets its own
//! isolated browsing context (separate cookies and storage) with
//! downloads denied and service workers bypassed, so one page's state
//! never bleeds into the next check.

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::{
    SetDownloadBehaviorBehavior, SetDownloadBehaviorParams,
};
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams as NetworkEnableParams, SetBypassServiceWorkerParams,
};
use chromiumoxide::cdp::browser_protocol::page::SetLifecycleEventsEnabledParams;
use chromiumoxide::cdp::browser_protocol::target::{
    CreateBrowserContextParams, CreateTargetParams, DisposeBrowserContextParams,
};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::CheckConfig;
use crate::context::IsolatedContext;
use crate::error::{CheckError, Result};

/// A launched browser instance, shared by all URL checks in a run.
///
/// Launched once per run and closed explicitly at the end; per-URL
/// failures never tear it down.
pub struct CheckBrowser {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl CheckBrowser {
    /// Launches the engine selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::EngineUnsupported`] or
    /// [`CheckError::BrowserNotFound`] when the engine cannot be resolved,
    /// and [`CheckError::LaunchFailed`] when the process fails to start.
    pub async fn launch(config: &CheckConfig) -> Result<Self> {
        let executable = config.engine.resolve_executable()?;

        let mut builder = BrowserConfig::builder();
        if config.headed {
            builder = builder.with_head();
        }

        // Unique profile directory so concurrent runs don't trip over
        // Chrome's ProcessSingleton lock.
        let user_data_dir = std::env::temp_dir().join(format!("pagevet-{}", uuid::Uuid::new_v4()));
        builder = builder
            .arg(format!("--user-data-dir={}", user_data_dir.display()))
            .args(vec!["--no-sandbox", "--disable-dev-shm-usage"]);

        if let Some(path) = &executable {
            builder = builder.chrome_executable(path.clone());
        }

        let browser_config = builder.build().map_err(|e| CheckError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })?;

        debug!(engine = %config.engine, headed = config.headed, executable = ?executable, "launching browser");

        let (browser, mut handler) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| CheckError::LaunchFailed {
                    reason: format!("failed to launch {}", config.engine),
                    source: Some(Box::new(e)),
                })?;

        // chromiumoxide requires the handler stream to be driven for any
        // CDP traffic to make progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("browser handler error: {e}");
                }
            }
        });

        debug!("browser launched");

        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Creates a fresh isolated context for one URL: separate storage,
    /// downloads denied, service workers bypassed, lifecycle events on.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::ContextSetup`] or the underlying CDP error
    /// when the browser refuses any of the setup commands.
    pub async fn isolated_context(&self, url: &str) -> Result<IsolatedContext> {
        let context_id = self
            .browser
            .execute(CreateBrowserContextParams::default())
            .await?
            .result
            .browser_context_id;

        let deny_downloads = SetDownloadBehaviorParams::builder()
            .behavior(SetDownloadBehaviorBehavior::Deny)
            .browser_context_id(context_id.clone())
            .build()
            .map_err(|reason| CheckError::ContextSetup {
                url: url.to_owned(),
                reason,
            })?;
        self.browser.execute(deny_downloads).await?;

        let target = CreateTargetParams::builder()
            .url("about:blank")
            .browser_context_id(context_id.clone())
            .build()
            .map_err(|reason| CheckError::ContextSetup {
                url: url.to_owned(),
                reason,
            })?;
        let page = self.browser.new_page(target).await?;

        page.enable_runtime().await?;
        page.execute(NetworkEnableParams::default()).await?;
        page.execute(SetBypassServiceWorkerParams::new(true)).await?;
        page.execute(SetLifecycleEventsEnabledParams::new(true))
            .await?;

        debug!(%url, context = ?context_id, "isolated context ready");

        Ok(IsolatedContext::new(page, context_id))
    }

    /// Releases a per-URL context on every exit path of a check.
    ///
    /// With `drain_observers` the observer tasks are allowed to finish
    /// processing already-delivered events before the tally is read;
    /// without it (timeout and failure paths) they are stopped at once so
    /// nothing fires for the URL afterwards.
    ///
    /// # Errors
    ///
    /// Returns the CDP error when the browser refuses to dispose the
    /// context; the page and observers are released regardless.
    pub async fn dispose_context(
        &self,
        context: IsolatedContext,
        drain_observers: bool,
    ) -> Result<()> {
        let context_id = context.close(drain_observers).await;
        self.browser
            .execute(DisposeBrowserContextParams::new(context_id))
            .await?;
        Ok(())
    }

    /// Closes the browser and reaps the process.
    ///
    /// Must be called explicitly at the end of a run; relying on Drop
    /// would kill the process without a graceful CDP shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error when the browser does not shut down cleanly.
    pub async fn close(mut self) -> Result<()> {
        debug!("closing browser");
        self.browser.close().await?;

        // The handler stream ends once the connection drops; don't hang
        // the shutdown on it if the process lingers.
        if tokio::time::timeout(std::time::Duration::from_secs(5), &mut self.handler_task)
            .await
            .is_err()
        {
            self.handler_task.abort();
        }
        Ok(())
    }
}
