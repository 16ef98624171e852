//! The check loop: visit each URL once and fold the per-URL tallies.

use tracing::{debug, info};

use crate::browser::CheckBrowser;
use crate::config::CheckConfig;
use crate::context::IsolatedContext;
use crate::error::{CheckError, Result};
use crate::observe::ErrorTally;

pub(crate) fn timed_out_line(url: &str) -> String {
    format!("Page: {url} timed out")
}

pub(crate) fn failed_line(url: &str, reason: &str) -> String {
    format!("Page: {url} failed to load: {reason}")
}

pub(crate) fn bad_status_line(url: &str, status: i64) -> String {
    format!("GET {url} returned status code: {status}")
}

/// Visits every configured URL in order and returns the total error count.
///
/// The count is the number of error signals observed across all URLs:
/// console errors, uncaught exceptions, navigation timeouts, hard
/// navigation failures and non-200 document statuses. Contributions are
/// URL-independent and additive; one URL's failure never aborts the run.
/// An empty URL list returns zero without touching the browser subsystem.
///
/// # Errors
///
/// Only launch problems are fatal here (configuration problems are
/// rejected earlier, by [`CheckConfig::new`]); per-URL failures are
/// folded into the returned count instead.
pub async fn run(config: &CheckConfig) -> Result<usize> {
    if config.urls.is_empty() {
        return Ok(0);
    }

    let browser = CheckBrowser::launch(config).await?;

    let mut total = 0;
    for url in &config.urls {
        let errors = check_url(&browser, url, config).await;
        debug!(%url, errors, "url check finished");
        total += errors;
    }

    browser.close().await?;
    info!(urls = config.urls.len(), total, "run complete");
    Ok(total)
}

/// Checks a single URL, converting every failure into counted
/// diagnostics. The context is released on every path.
async fn check_url(browser: &CheckBrowser, url: &str, config: &CheckConfig) -> usize {
    let tally = ErrorTally::new();

    let mut context = match browser.isolated_context(url).await {
        Ok(context) => context,
        Err(e) => {
            tally.bump();
            eprintln!("{}", failed_line(url, &e.to_string()));
            return tally.count();
        }
    };

    let drain_observers = match observe_and_navigate(&mut context, url, config, &tally).await {
        Ok(Some(status)) if status != 200 => {
            tally.bump();
            eprintln!("{}", bad_status_line(url, status));
            true
        }
        Ok(_) => true,
        Err(CheckError::NavigationTimeout { .. }) => {
            tally.bump();
            eprintln!("{}", timed_out_line(url));
            false
        }
        Err(CheckError::NavigationFailed { reason, .. }) => {
            tally.bump();
            eprintln!("{}", failed_line(url, &reason));
            false
        }
        Err(e) => {
            tally.bump();
            eprintln!("{}", failed_line(url, &e.to_string()));
            false
        }
    };

    if let Err(e) = browser.dispose_context(context, drain_observers).await {
        debug!(%url, "context dispose failed: {e}");
    }

    tally.count()
}

async fn observe_and_navigate(
    context: &mut IsolatedContext,
    url: &str,
    config: &CheckConfig,
    tally: &ErrorTally,
) -> Result<Option<i64>> {
    context.observe(url, tally).await?;
    context
        .navigate(url, config.wait_until, config.timeout)
        .await
}
