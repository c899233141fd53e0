use std::sync::Arc;

use services::SurveyCatalog;

pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<SurveyCatalog>;

    /// Fixed shuffle seed; `None` shuffles from entropy each session.
    fn shuffle_seed(&self) -> Option<u64> {
        None
    }
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<SurveyCatalog>,
    shuffle_seed: Option<u64>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            shuffle_seed: app.shuffle_seed(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<SurveyCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn shuffle_seed(&self) -> Option<u64> {
        self.shuffle_seed
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
