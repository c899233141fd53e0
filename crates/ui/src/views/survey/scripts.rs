use dioxus::document::eval;
use serde::Deserialize;
use survey_core::model::CardIndex;

use crate::vm::SurveyIntent;

/// One intersection report from the card observer.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub(super) struct VisibilitySignal {
    pub index: Option<usize>,
    pub ratio: f64,
}

/// Decode one raw observer message. A malformed message is logged and
/// skipped so later cards keep reporting.
pub(super) fn signal_intent(raw: serde_json::Value) -> Option<SurveyIntent> {
    match serde_json::from_value::<VisibilitySignal>(raw) {
        Ok(signal) => Some(SurveyIntent::Visible {
            index: signal.index.map(CardIndex::new),
            ratio: signal.ratio,
        }),
        Err(err) => {
            tracing::warn!(%err, "malformed visibility signal skipped");
            None
        }
    }
}

pub(super) fn card_observer_script(threshold: f64) -> String {
    format!(
        r#"(function() {{
                    const deck = document.getElementById("card-deck");
                    if (!deck) return;
                    if (window.__surveyCardObserver) {{
                        window.__surveyCardObserver.disconnect();
                    }}
                    const observer = new IntersectionObserver((entries) => {{
                        entries.forEach((entry) => {{
                            const raw = entry.target.getAttribute("data-index");
                            const index = raw === null ? null : parseInt(raw, 10);
                            dioxus.send({{
                                index: Number.isNaN(index) ? null : index,
                                ratio: entry.intersectionRatio,
                            }});
                        }});
                    }}, {{ threshold: [{threshold}], root: null }});
                    window.__surveyCardObserver = observer;
                    deck.querySelectorAll(".product-card").forEach((card) => observer.observe(card));
                }})();"#,
    )
}

pub(super) fn scroll_to_card_script(dom_id: &str) -> String {
    format!(
        r#"document.getElementById({dom_id:?})?.scrollIntoView({{ behavior: "smooth", block: "start" }});"#,
    )
}

pub(super) fn navigate_script(destination: &str) -> String {
    format!("window.location.assign({destination:?});")
}

pub(super) async fn scroll_to_card(dom_id: &str) {
    let script = scroll_to_card_script(dom_id);
    let _ = eval(&script).await;
}
