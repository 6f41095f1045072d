use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::{CoachService, PlanService};

use crate::{
    ACTIVE_PLAN, DOMAIN_SERVICE, NOTIFICATIONS,
    component::{
        element::{LoadingPage, Subtitle, WhiteBox},
        profile_form::ProfileForm,
    },
    ensure_plan, signal_changed_data,
};

#[component]
pub fn Profile(edit: bool) -> Element {
    let plan = ensure_plan!();
    let mut editing = use_signal(|| edit);
    let mut regenerating = use_signal(|| false);

    let save = move |profile: domain::UserProfile| {
        let Some(mut updated) = ACTIVE_PLAN.read().clone() else {
            return;
        };
        updated.profile = profile;
        spawn(async move {
            match DOMAIN_SERVICE.read().replace_plan(updated).await {
                Ok(updated) => {
                    *ACTIVE_PLAN.write() = Some(updated);
                    editing.set(false);
                    signal_changed_data();
                }
                Err(err) => {
                    NOTIFICATIONS
                        .write()
                        .push(format!("Failed to save profile: {err}"));
                }
            }
        });
    };

    let regenerate = move |_| {
        let Some(mut updated) = ACTIVE_PLAN.read().clone() else {
            return;
        };
        regenerating.set(true);
        spawn(async move {
            match DOMAIN_SERVICE.read().generate_plan(&updated.profile).await {
                Ok(plan) => {
                    updated.plan = plan;
                    match DOMAIN_SERVICE.read().replace_plan(updated).await {
                        Ok(updated) => {
                            *ACTIVE_PLAN.write() = Some(updated);
                            signal_changed_data();
                        }
                        Err(err) => {
                            NOTIFICATIONS
                                .write()
                                .push(format!("Failed to save regenerated plan: {err}"));
                        }
                    }
                }
                Err(err) => {
                    NOTIFICATIONS
                        .write()
                        .push(format!("Failed to regenerate plan: {err}"));
                }
            }
            regenerating.set(false);
        });
    };

    if regenerating() {
        return rsx! {
            LoadingPage {}
            div {
                class: "has-text-centered has-text-grey",
                "Regenerating your plan from the updated profile..."
            }
        };
    }

    if editing() {
        return rsx! {
            WhiteBox {
                ProfileForm {
                    profile: plan.profile.clone(),
                    submit_label: "Save profile",
                    onsubmit: save,
                }
            }
        };
    }

    rsx! {
        div {
            class: "mx-3",
            Subtitle {
                text: "The profile the active plan was generated for. Editing it only \
                       changes the stored data; regenerate to get a matching plan."
            }
        }
        WhiteBox {
            ProfileInfo { label: "Age", value: plan.profile.age.to_string() }
            ProfileInfo { label: "Gender", value: plan.profile.gender.to_string() }
            ProfileInfo { label: "Weight", value: format!("{} kg", plan.profile.weight) }
            ProfileInfo { label: "Height", value: format!("{} cm", plan.profile.height) }
            ProfileInfo { label: "BMI", value: format!("{:.1}", plan.profile.bmi()) }
            ProfileInfo { label: "Main goal", value: plan.profile.goal.to_string() }
            ProfileInfo {
                label: "Workout days",
                value: plan.profile.workout_days.to_string(),
            }
            ProfileInfo {
                label: "Activity level",
                value: plan.profile.activity_level.to_string(),
            }
            ProfileInfo {
                label: "Workout style",
                value: plan.profile.workout_style.to_string(),
            }
            ProfileInfo {
                label: "Equipment",
                value: or_none(&plan.profile.available_equipment),
            }
            ProfileInfo {
                label: "Dietary restrictions",
                value: or_none(&plan.profile.dietary_restrictions),
            }
            ProfileInfo {
                label: "Disliked exercises",
                value: or_none(&plan.profile.disliked_exercises),
            }
        }
        div {
            class: "field is-grouped is-grouped-centered",
            div {
                class: "control",
                button {
                    class: "button is-link",
                    onclick: move |_| editing.set(true),
                    "Edit profile"
                }
            }
            div {
                class: "control",
                button {
                    class: "button",
                    onclick: regenerate,
                    "Regenerate plan"
                }
            }
        }
    }
}

#[component]
fn ProfileInfo(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "is-flex is-justify-content-space-between py-1",
            span { class: "has-text-grey", "{label}" }
            span { class: "has-text-weight-bold has-text-right", "{value}" }
        }
    }
}

fn or_none(value: &str) -> String {
    if value.trim().is_empty() {
        "None".to_string()
    } else {
        value.to_string()
    }
}
