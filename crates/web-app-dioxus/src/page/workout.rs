use std::collections::HashMap;

use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::CoachService;

use crate::{
    DOMAIN_SERVICE,
    component::{
        element::{Error, Icon, Loading},
        exercise_image::ExerciseImage,
    },
    ensure_plan,
};

#[component]
pub fn Workout() -> Element {
    let plan = ensure_plan!();
    let mut open_day = use_signal(|| Some(0_usize));
    let mut variations = use_signal(HashMap::<String, Vec<domain::ExerciseVariation>>::new);
    let mut loading_variations = use_signal(|| None::<String>);
    let mut variations_error = use_signal(|| None::<String>);
    let mut expanded_exercise = use_signal(|| None::<String>);

    let goal = plan.profile.goal;
    let style = plan.profile.workout_style;

    let mut toggle_variations = move |exercise: String| {
        if expanded_exercise.read().as_deref() == Some(exercise.as_str()) {
            expanded_exercise.set(None);
            return;
        }
        if variations.read().contains_key(&exercise) {
            expanded_exercise.set(Some(exercise));
            return;
        }
        loading_variations.set(Some(exercise.clone()));
        variations_error.set(None);
        expanded_exercise.set(Some(exercise.clone()));
        spawn(async move {
            match DOMAIN_SERVICE
                .read()
                .get_exercise_variations(&exercise, goal, style)
                .await
            {
                Ok(found) => {
                    variations.write().insert(exercise, found);
                }
                Err(_) => {
                    variations_error.set(Some(exercise));
                }
            }
            loading_variations.set(None);
        });
    };

    rsx! {
        for (day_index, day) in plan.plan.workout.iter().cloned().enumerate() {
            div {
                class: "box mx-2 my-3 p-0",
                a {
                    class: "is-flex is-justify-content-space-between p-4",
                    onclick: move |_| {
                        open_day.set(if open_day() == Some(day_index) { None } else { Some(day_index) });
                    },
                    div {
                        span { class: "title is-size-5 has-text-link", "{day.day}" }
                        span { class: "ml-3 has-text-weight-bold", "{day.focus}" }
                        span {
                            class: "tag is-rounded ml-2",
                            "{day.exercises.len()} exercises"
                        }
                    }
                    if open_day() == Some(day_index) {
                        Icon { name: "chevron-up" }
                    } else {
                        Icon { name: "chevron-down" }
                    }
                }
                if open_day() == Some(day_index) {
                    div {
                        class: "p-4",
                        RoutineStep { title: "Warmup", content: day.warmup.clone() }
                        for (exercise_index, exercise) in day.exercises.iter().cloned().enumerate() {
                            div {
                                class: "box my-3",
                                div {
                                    class: "columns is-mobile",
                                    div {
                                        class: "column is-narrow",
                                        ExerciseImage {
                                            exercise: exercise.name.clone(),
                                            stagger_index: exercise_index,
                                        }
                                    }
                                    div {
                                        class: "column",
                                        p { class: "title is-size-5", "{exercise.name}" }
                                        div {
                                            class: "level is-mobile my-2",
                                            Measure { label: "Sets", value: exercise.sets.clone() }
                                            Measure { label: "Reps", value: exercise.reps.clone() }
                                            Measure { label: "Rest", value: exercise.rest.clone() }
                                        }
                                        if let Some(technique_focus) = &exercise.technique_focus {
                                            p {
                                                class: "is-size-7 mb-2",
                                                strong { class: "has-text-link", "Technique: " }
                                                "{technique_focus}"
                                            }
                                        }
                                        div {
                                            class: "field is-grouped",
                                            div {
                                                class: "control",
                                                a {
                                                    class: "button is-small",
                                                    href: tutorial_url(&exercise.tutorial_query),
                                                    target: "_blank",
                                                    rel: "noopener noreferrer",
                                                    Icon { name: "video", is_small: true }
                                                    span { "Watch tutorial" }
                                                }
                                            }
                                            div {
                                                class: "control",
                                                button {
                                                    class: "button is-small",
                                                    disabled: loading_variations.read().as_deref() == Some(exercise.name.as_str()),
                                                    onclick: {
                                                        let name = exercise.name.clone();
                                                        move |_| toggle_variations(name.clone())
                                                    },
                                                    Icon { name: "code-branch", is_small: true }
                                                    span {
                                                        if expanded_exercise.read().as_deref() == Some(exercise.name.as_str()) {
                                                            "Hide variations"
                                                        } else {
                                                            "Show variations"
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                        if expanded_exercise.read().as_deref() == Some(exercise.name.as_str()) {
                                            div {
                                                class: "mt-3 p-3 has-background-white-bis",
                                                p { class: "has-text-weight-bold is-size-6 mb-2", "Variations" }
                                                if loading_variations.read().as_deref() == Some(exercise.name.as_str()) {
                                                    Loading {}
                                                } else if variations_error.read().as_deref() == Some(exercise.name.as_str()) {
                                                    Error { message: "Could not load variations." }
                                                } else if let Some(found) = variations.read().get(&exercise.name) {
                                                    for variation in found.clone() {
                                                        div {
                                                            class: "mb-2 pl-3 variation",
                                                            strong { "{variation.name}" }
                                                            p { class: "is-size-7", "{variation.description}" }
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                        RoutineStep { title: "Cooldown", content: day.cooldown.clone() }
                    }
                }
            }
        }
    }
}

fn tutorial_url(query: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        query.replace(' ', "+")
    )
}

#[component]
fn RoutineStep(title: String, content: String) -> Element {
    rsx! {
        div {
            class: "p-3 my-2 has-background-white-bis",
            p { class: "has-text-weight-bold has-text-link", "{title}" }
            p { class: "is-size-7 preserve-newlines", "{content}" }
        }
    }
}

#[component]
fn Measure(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "level-item has-text-centered",
            div {
                p { class: "heading", "{label}" }
                p { class: "has-text-weight-bold", "{value}" }
            }
        }
    }
}
