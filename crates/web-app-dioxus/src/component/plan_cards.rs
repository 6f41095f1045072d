use chrono::Local;
use dioxus::prelude::*;

use vigor_domain as domain;

/// Saved plans as cards, newest first, with load and delete actions.
#[component]
pub fn PlanCards(
    plans: Vec<domain::SavedPlan>,
    on_load: EventHandler<domain::PlanID>,
    on_delete: EventHandler<domain::PlanID>,
) -> Element {
    let mut plans = plans;
    plans.sort_by_key(|plan| std::cmp::Reverse(plan.created));

    rsx! {
        div {
            class: "grid is-col-min-12 mx-2",
            for plan in plans {
                PlanCard { plan, on_load, on_delete }
            }
        }
    }
}

#[component]
fn PlanCard(
    plan: domain::SavedPlan,
    on_load: EventHandler<domain::PlanID>,
    on_delete: EventHandler<domain::PlanID>,
) -> Element {
    let id = plan.id;
    let created = plan
        .created
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string();

    rsx! {
        div {
            class: "cell",
            div {
                class: "box",
                div {
                    class: "is-flex is-justify-content-space-between",
                    p { class: "title is-size-6", "{plan.name}" }
                    span { class: "tag is-link is-light", "{plan.profile.goal}" }
                }
                p {
                    class: "is-size-7 has-text-grey mb-3",
                    "{created}"
                }
                div {
                    class: "field is-grouped",
                    div {
                        class: "control is-expanded",
                        button {
                            class: "button is-link is-fullwidth is-small",
                            onclick: move |_| on_load.call(id),
                            "Load plan"
                        }
                    }
                    div {
                        class: "control",
                        button {
                            class: "button is-small",
                            onclick: move |_| on_delete.call(id),
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}
