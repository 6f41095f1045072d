use chrono::{Local, Utc};
use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::{CoachService, PlanService};

use crate::{
    ACTIVE_PLAN, DATA_CHANGED, DOMAIN_SERVICE, NOTIFICATIONS, Route,
    component::{
        element::{CenteredBlock, DeleteConfirmationDialog, Dialog, LoadingPage, Title, WhiteBox},
        form::{FieldValue, InputField},
        plan_cards::PlanCards,
        profile_form::ProfileForm,
    },
    signal_changed_data,
};

#[component]
pub fn Welcome() -> Element {
    let navigator = use_navigator();
    let mut generating = use_signal(|| false);
    let mut generation_error = use_signal(|| None::<String>);
    let mut pending = use_signal(|| None::<(domain::UserProfile, domain::FitnessPlan)>);
    let mut name = use_signal(FieldValue::<domain::Name>::default);
    let mut delete_request = use_signal(|| None::<domain::PlanID>);

    let plans = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_plans().await
    });

    let generate = move |profile: domain::UserProfile| {
        generating.set(true);
        generation_error.set(None);
        spawn(async move {
            match DOMAIN_SERVICE.read().generate_plan(&profile).await {
                Ok(plan) => {
                    let default_name =
                        domain::default_plan_name(profile.goal, Local::now().date_naive());
                    name.set(FieldValue {
                        input: default_name.clone(),
                        validated: domain::Name::new(&default_name)
                            .map_err(|err| err.to_string()),
                        orig: default_name,
                    });
                    pending.set(Some((profile, plan)));
                }
                Err(err) => {
                    generation_error
                        .set(Some(format!("Failed to generate your fitness plan: {err}")));
                }
            }
            generating.set(false);
        });
    };

    let save = move |_| {
        let Some((profile, plan)) = pending() else {
            return;
        };
        let Ok(plan_name) = name.read().validated.clone() else {
            return;
        };
        spawn(async move {
            let saved_plan = domain::SavedPlan {
                id: domain::PlanID::random(),
                name: plan_name,
                created: Utc::now(),
                profile,
                plan,
            };
            match DOMAIN_SERVICE.read().create_plan(saved_plan).await {
                Ok(saved_plan) => {
                    *ACTIVE_PLAN.write() = Some(saved_plan);
                    pending.set(None);
                    signal_changed_data();
                    navigator.push(Route::Home {});
                }
                Err(err) => {
                    NOTIFICATIONS
                        .write()
                        .push(format!("Failed to save plan: {err}"));
                }
            }
        });
    };

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

    if generating() {
        return rsx! {
            LoadingPage {}
            CenteredBlock {
                p { class: "title is-5", "Creating your personalized plan" }
                p {
                    class: "has-text-grey",
                    "The coach is putting together your workouts, meals and tips. \
                     This can take a moment."
                }
            }
        };
    }

    rsx! {
        CenteredBlock {
            h1 { class: "title is-3", "Your AI fitness coach" }
            p {
                class: "has-text-grey",
                "Fill out your profile and get a personalized weekly workout plan, \
                 a daily meal plan and professional tips."
            }
        }

        if let Some(error) = generation_error() {
            div {
                class: "message is-danger mx-2",
                div { class: "message-body", "{error}" }
            }
        }

        WhiteBox {
            ProfileForm {
                profile: domain::UserProfile::default(),
                submit_label: "Generate my plan",
                onsubmit: generate,
            }
        }

        match &*plans.read() {
            Some(Ok(plans)) if !plans.is_empty() => rsx! {
                Title { title: "My plans" }
                PlanCards {
                    plans: plans.clone(),
                    on_load: load,
                    on_delete: move |id| delete_request.set(Some(id)),
                }
            },
            _ => rsx! {},
        }

        if let Some((ref profile, _)) = *pending.read() {
            Dialog {
                title: rsx! { "Save your plan" },
                close_event: move |_| pending.set(None),
                InputField {
                    label: "Plan name",
                    value: name.read().input.clone(),
                    error: if let Err(err) = &name.read().validated { err.clone() },
                    has_changed: false,
                    oninput: move |evt: FormEvent| {
                        let orig = name.read().orig.clone();
                        name.set(FieldValue {
                            input: evt.value(),
                            validated: domain::Name::new(&evt.value())
                                .map_err(|err| err.to_string()),
                            orig,
                        });
                    },
                }
                p {
                    class: "is-size-7 has-text-grey mb-3",
                    "Goal: {profile.goal}"
                }
                div {
                    class: "field is-grouped is-grouped-centered",
                    div {
                        class: "control",
                        button {
                            class: "button is-link",
                            disabled: name.read().validated.is_err(),
                            onclick: save,
                            "Save plan"
                        }
                    }
                }
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
    }
}
