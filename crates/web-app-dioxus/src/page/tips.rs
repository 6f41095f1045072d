use dioxus::prelude::*;

use crate::{component::element::NoData, ensure_plan};

#[component]
pub fn Tips() -> Element {
    let plan = ensure_plan!();

    rsx! {
        if plan.plan.tips.is_empty() {
            NoData {}
        }
        for tip in plan.plan.tips.iter().cloned() {
            div {
                class: "box mx-2 my-3",
                div {
                    class: "is-flex",
                    span {
                        class: "icon is-medium has-text-link mr-3 mt-1",
                        i { class: "fas fa-lightbulb fa-lg" }
                    }
                    div {
                        p { class: "title is-size-5", "{tip.title}" }
                        p { "{tip.description}" }
                    }
                }
            }
        }
    }
}
