use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::spawn;
use services::{PageNavigator, RedirectScheduler, run_redirect};
use url::Url;

use super::scripts::navigate_script;

/// Navigates the hosting webview through `window.location`.
struct EvalNavigator;

impl PageNavigator for EvalNavigator {
    fn navigate(&self, destination: &Url) {
        let _ = eval(&navigate_script(destination.as_str()));
    }
}

/// Schedules the completion redirect on the Dioxus task queue of the current scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrowserRedirect;

impl RedirectScheduler for BrowserRedirect {
    fn schedule(&self, delay: Duration, destination: Url) {
        spawn(async move {
            run_redirect(delay, destination, &EvalNavigator).await;
        });
    }
}
