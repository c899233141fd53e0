use dioxus::prelude::*;

use survey_core::model::ItemId;

use crate::vm::ComparisonOptionVm;

#[component]
pub(super) fn ComparisonView(
    options: Vec<ComparisonOptionVm>,
    chosen: Option<ItemId>,
    on_choose: EventHandler<ItemId>,
) -> Element {
    let locked = chosen.is_some();
    rsx! {
        section {
            id: "comparison",
            class: "comparison",
            aria_label: "Choose your favorite",
            h2 { "Which one would you choose?" }
            ul { class: "comparison-list",
                for option in options {
                    li {
                        key: "{option.id}",
                        class: if chosen.as_ref() == Some(&option.id) { "comparison-option chosen" } else { "comparison-option" },
                        h3 { "{option.name}" }
                        p { class: "comparison-summary", "{option.summary}" }
                        button {
                            r#type: "button",
                            class: "choose-button",
                            disabled: locked,
                            onclick: {
                                let id = option.id.clone();
                                move |_| on_choose.call(id.clone())
                            },
                            "{option.choose_label}"
                        }
                    }
                }
            }
        }
    }
}
