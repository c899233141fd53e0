use dioxus::document::eval;
use dioxus::prelude::*;

use survey_core::model::CardIndex;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{CardVm, SurveyEffect, SurveyIntent, SurveyVm, card_dom_id, start_survey};

use super::comparison::ComparisonView;
use super::redirect::BrowserRedirect;
use super::scripts::{card_observer_script, scroll_to_card, signal_intent};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

type SurveyState = Result<SurveyVm<BrowserRedirect>, ViewError>;

#[component]
pub fn SurveyView() -> Element {
    let ctx = use_context::<AppContext>();
    let title = ctx.catalog().title().to_owned();
    let survey: Signal<SurveyState> = use_signal(move || {
        start_survey(&ctx.catalog(), ctx.shuffle_seed(), BrowserRedirect)
    });
    let error = use_signal(|| None::<ViewError>);

    let dispatch_intent = use_callback(move |intent: SurveyIntent| {
        let mut survey = survey;
        let mut error = error;
        let effect = match survey.write().as_mut() {
            Ok(vm) => vm.dispatch(intent),
            Err(_) => return,
        };
        match effect {
            Ok(SurveyEffect::ScrollTo(index)) => {
                let dom_id = card_dom_id(index);
                spawn(async move {
                    scroll_to_card(&dom_id).await;
                });
            }
            Ok(SurveyEffect::None) => {}
            Err(err) => error.set(Some(err)),
        }
    });

    use_future(move || async move {
        let threshold = match survey.peek().as_ref() {
            Ok(vm) if !vm.cards().is_empty() => vm.visibility_threshold(),
            _ => return,
        };
        let mut observer = eval(&card_observer_script(threshold));
        while let Ok(raw) = observer.recv::<serde_json::Value>().await {
            if let Some(intent) = signal_intent(raw) {
                dispatch_intent.call(intent);
            }
        }
        tracing::debug!("card observer channel closed");
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<SurveyTestHandles>() {
                handles.register(dispatch_intent, survey);
            }
        }
    }

    let guard = survey.read();
    let vm = match guard.as_ref() {
        Ok(vm) => vm,
        Err(err) => {
            let message = err.message();
            return rsx! {
                div { id: "survey-root", class: "survey",
                    p { class: "error", role: "alert", "{message}" }
                }
            };
        }
    };

    let progress = vm.progress();
    let progress_label = progress.label();
    let position = progress.position;
    let total = progress.total;
    let cards = vm.cards().to_vec();
    let notice = vm.notice().map(str::to_owned);
    let acknowledgment = vm.acknowledgment().map(str::to_owned);
    let comparison = vm.shows_comparison().then(|| vm.comparison_options());
    let chosen = vm.chosen_item().cloned();
    let error_message = error().map(ViewError::message);
    drop(guard);

    rsx! {
        div { id: "survey-root", class: "survey",
            header { class: "survey-header",
                h1 { "{title}" }
                p {
                    class: "progress",
                    aria_label: "Progress: {progress_label}",
                    span { id: "current-card", "{position}" }
                    " / "
                    span { id: "total-cards", "{total}" }
                }
            }

            if let Some(message) = error_message {
                p { class: "error", role: "alert", "{message}" }
            }
            if let Some(notice) = notice {
                p { id: "blocked-notice", class: "notice", role: "alert", "{notice}" }
            }

            if let Some(options) = comparison {
                ComparisonView {
                    options,
                    chosen,
                    on_choose: move |id| dispatch_intent.call(SurveyIntent::Choose(id)),
                }
            } else if cards.is_empty() {
                p { class: "empty", "There are no products to show." }
            } else {
                main { id: "card-deck", class: "card-deck",
                    for card in cards {
                        ProductCard {
                            key: "{card.dom_id}",
                            card: card.clone(),
                            on_forward: move |index| dispatch_intent.call(SurveyIntent::Forward(index)),
                        }
                    }
                }
            }

            div {
                id: "toast",
                class: if acknowledgment.is_some() { "toast" } else { "toast hidden" },
                role: "status",
                aria_live: "polite",
                {acknowledgment.unwrap_or_default()}
            }
        }
    }
}

#[component]
fn ProductCard(card: CardVm, on_forward: EventHandler<CardIndex>) -> Element {
    let index = card.index;
    rsx! {
        article {
            id: "{card.dom_id}",
            class: "product-card",
            role: "article",
            "data-index": "{index}",
            aria_label: "{card.aria_label}",
            div { class: "card-content",
                h2 { "{card.name}" }
                if let Some(src) = card.image_url.as_ref() {
                    img { class: "product-image", src: "{src}", alt: "{card.image_label}" }
                } else {
                    div {
                        class: "product-image",
                        role: "img",
                        aria_label: "{card.image_label}",
                        "{card.image_label}"
                    }
                }
                p { class: "usp", "{card.usp}" }
                if let Some((label, text)) = card.details.as_ref() {
                    div { class: "ingredients-section",
                        h3 { "{label}" }
                        p { class: "ingredients", "{text}" }
                    }
                }
                button {
                    r#type: "button",
                    class: "next-button",
                    aria_label: card.nav_aria_label,
                    onclick: move |_| on_forward.call(index),
                    "{card.nav_label}"
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SurveyTestHandles {
    dispatch: Rc<RefCell<Option<Callback<SurveyIntent>>>>,
    survey: Rc<RefCell<Option<Signal<SurveyState>>>>,
}

#[cfg(test)]
impl SurveyTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<SurveyIntent>, survey: Signal<SurveyState>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.survey.borrow_mut() = Some(survey);
    }

    pub(crate) fn dispatch(&self) -> Callback<SurveyIntent> {
        (*self.dispatch.borrow()).expect("survey dispatch registered")
    }

    pub(crate) fn survey(&self) -> Signal<SurveyState> {
        (*self.survey.borrow()).expect("survey state registered")
    }
}
