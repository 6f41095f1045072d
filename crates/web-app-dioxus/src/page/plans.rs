use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::PlanService;

use crate::{
    ACTIVE_PLAN, DATA_CHANGED, DOMAIN_SERVICE, NOTIFICATIONS, Route,
    component::{
        element::{DeleteConfirmationDialog, ErrorMessage, LoadingPage, NoData, Subtitle},
        plan_cards::PlanCards,
    },
    signal_changed_data,
};

#[component]
pub fn Plans() -> Element {
    let navigator = use_navigator();
    let mut delete_request = use_signal(|| None::<domain::PlanID>);

    let plans = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_plans().await
    });

    let load = move |id: domain::PlanID| {
        spawn(async move {
            match DOMAIN_SERVICE.read().get_plan(id).await {
                Ok(plan) => {
                    *ACTIVE_PLAN.write() = Some(plan);
                    navigator.push(Route::Home {});
                }
                Err(err) => {
                    NOTIFICATIONS
                        .write()
                        .push(format!("Failed to load plan: {err}"));
                }
            }
        });
    };

    let delete = move |id: domain::PlanID| {
        spawn(async move {
            match DOMAIN_SERVICE.read().delete_plan(id).await {
                Ok(id) => {
                    if ACTIVE_PLAN.read().as_ref().is_some_and(|plan| plan.id == id) {
                        *ACTIVE_PLAN.write() = None;
                    }
                    signal_changed_data();
                }
                Err(err) => {
                    NOTIFICATIONS
                        .write()
                        .push(format!("Failed to delete plan: {err}"));
                }
            }
            delete_request.set(None);
        });
    };

    match &*plans.read() {
        Some(Ok(plans)) => rsx! {
            div {
                class: "mx-3",
                Subtitle {
                    text: "Load a previously generated plan or clean up plans you no \
                           longer need."
                }
            }
            if plans.is_empty() {
                NoData {}
            } else {
                PlanCards {
                    plans: plans.clone(),
                    on_load: load,
                    on_delete: move |id| delete_request.set(Some(id)),
                }
            }
            if let Some(id) = delete_request() {
                DeleteConfirmationDialog {
                    element_type: "plan",
                    element_name: rsx! { "" },
                    delete_event: move |_| delete(id),
                    cancel_event: move |_| delete_request.set(None),
                }
            }
        },
        Some(Err(err)) => rsx! {
            ErrorMessage { message: "{err}" }
        },
        None => rsx! {
            LoadingPage {}
        },
    }
}
