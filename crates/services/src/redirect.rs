//! Deferred page navigation issued when a survey completes.

use std::time::Duration;

use url::Url;

/// Performs the full-page navigation to a completion target.
pub trait PageNavigator {
    fn navigate(&self, destination: &Url);
}

/// Arranges a one-shot navigation after `delay`.
///
/// Once scheduled the redirect is not cancelable from the page; leaving the
/// page is the only way it does not fire.
pub trait RedirectScheduler {
    fn schedule(&self, delay: Duration, destination: Url);
}

/// Sleep for `delay`, then navigate. Hosts spawn this on their own executor.
pub async fn run_redirect<N: PageNavigator + ?Sized>(
    delay: Duration,
    destination: Url,
    navigator: &N,
) {
    tokio::time::sleep(delay).await;
    tracing::info!(%destination, "redirecting to completion target");
    navigator.navigate(&destination);
}
