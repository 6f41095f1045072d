use chrono::Local;
use dioxus::prelude::*;

use crate::{
    Route,
    component::element::{NoData, Title, WhiteBox},
    ensure_plan,
};

#[component]
pub fn Home() -> Element {
    let plan = ensure_plan!();
    let navigator = use_navigator();

    let weekday = Local::now().format("%A").to_string();
    let todays_workout = plan.plan.workout_for_today(&weekday).cloned();
    let meals = plan.plan.meals.clone();

    rsx! {
        Title { title: "Today" }
        div {
            class: "grid is-col-min-14 mx-3",
            div {
                class: "cell",
                WhiteBox {
                    p { class: "title is-size-5", "Workout" }
                    if let Some(day) = todays_workout {
                        p { class: "subtitle is-size-6 has-text-link mb-2", "{day.focus}" }
                        for exercise in day.exercises.iter().take(4) {
                            div {
                                class: "is-flex is-justify-content-space-between py-1",
                                span { "{exercise.name}" }
                                span {
                                    class: "has-text-weight-bold",
                                    "{exercise.sets} × {exercise.reps}"
                                }
                            }
                        }
                        if day.exercises.len() > 4 {
                            p {
                                class: "is-size-7 has-text-grey",
                                "...and {day.exercises.len() - 4} more"
                            }
                        }
                        button {
                            class: "button is-link is-fullwidth mt-3",
                            onclick: move |_| { navigator.push(Route::Workout {}); },
                            "View full workout plan"
                        }
                    } else {
                        NoData {}
                    }
                }
            }
            div {
                class: "cell",
                WhiteBox {
                    p { class: "title is-size-5", "Nutrition" }
                    div {
                        class: "level is-mobile mb-2",
                        div {
                            class: "level-item has-text-centered",
                            div {
                                p { class: "title is-size-4", "{meals.total_calories}" }
                                p { class: "heading", "kcal" }
                            }
                        }
                        div {
                            class: "level-item has-text-centered",
                            div {
                                p { class: "title is-size-4 has-text-success", "{meals.total_protein} g" }
                                p { class: "heading", "Protein" }
                            }
                        }
                    }
                    div {
                        class: "is-flex is-justify-content-space-between py-1",
                        span { "Breakfast" }
                        span { class: "has-text-weight-bold", "{meals.breakfast.name}" }
                    }
                    div {
                        class: "is-flex is-justify-content-space-between py-1",
                        span { "Lunch" }
                        span { class: "has-text-weight-bold", "{meals.lunch.name}" }
                    }
                    div {
                        class: "is-flex is-justify-content-space-between py-1",
                        span { "Dinner" }
                        span { class: "has-text-weight-bold", "{meals.dinner.name}" }
                    }
                    button {
                        class: "button is-link is-fullwidth mt-3",
                        onclick: move |_| { navigator.push(Route::Nutrition {}); },
                        "View full meal plan"
                    }
                }
            }
        }
        Title { title: "More" }
        Tile { title: "Progress", target: Route::Progress { add: false } }
        Tile { title: "Pro tips", target: Route::Tips {} }
        Tile { title: "Research", target: Route::Research {} }
        Tile { title: "Profile", target: Route::Profile { edit: false } }
    }
}

#[component]
fn Tile(title: String, target: Route) -> Element {
    let navigator = use_navigator();

    rsx! {
        div {
            class: "grid mx-3 my-3",
            div {
                class: "cell",
                a {
                    class: "box px-4 py-3",
                    onclick: move |_| { navigator.push(target.clone()); },
                    a { class: "title is-size-5 has-text-link", {title} }
                }
            }
        }
    }
}
