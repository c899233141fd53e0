use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{CatalogOverrides, SurveyCatalog};
use survey_core::model::CompletionMode;

use crate::context::{UiApp, build_app_context};
use crate::views::SurveyView;
use crate::views::survey::SurveyTestHandles;

pub const ENERGY_BARS: &str = r#"{
    "title": "Energy Bar Research",
    "form_url": "https://forms.gle/YOUR_FORM_ID",
    "items": [
        { "id": "honey-crunch", "name": "Honey Crunch", "usp": "Real honey and oats.",
          "details": { "label": "Ingredients", "text": "Oats, honey, almonds" },
          "destination": "https://forms.gle/honey" },
        { "id": "rxbar", "name": "RXBAR", "usp": "Egg whites and dates.",
          "destination": "https://forms.gle/rxbar" },
        { "id": "clif-bar", "name": "Clif Bar", "usp": "Plant-based protein.",
          "destination": "https://forms.gle/clif" }
    ]
}"#;

#[derive(Clone)]
struct TestApp {
    catalog: Arc<SurveyCatalog>,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Arc<SurveyCatalog> {
        Arc::clone(&self.catalog)
    }

    fn shuffle_seed(&self) -> Option<u64> {
        Some(7)
    }
}

#[derive(Props, Clone)]
struct SurveyHarnessProps {
    app: Arc<dyn UiApp>,
    handles: SurveyTestHandles,
}

impl PartialEq for SurveyHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn SurveyHarness(props: SurveyHarnessProps) -> Element {
    let ctx = build_app_context(&props.app);
    use_context_provider(|| ctx);
    let handles = props.handles.clone();
    use_context_provider(|| handles);
    rsx! { SurveyView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: SurveyTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn catalog(raw: &str, mode: CompletionMode) -> SurveyCatalog {
    let overrides = CatalogOverrides {
        mode: Some(mode),
        form_url: None,
    };
    SurveyCatalog::from_json_str(raw, &overrides).expect("catalog")
}

pub fn setup_view_harness(catalog: SurveyCatalog) -> ViewHarness {
    let handles = SurveyTestHandles::default();
    let app: Arc<dyn UiApp> = Arc::new(TestApp {
        catalog: Arc::new(catalog),
    });
    let dom = VirtualDom::new_with_props(
        SurveyHarness,
        SurveyHarnessProps {
            app,
            handles: handles.clone(),
        },
    );
    ViewHarness { dom, handles }
}
