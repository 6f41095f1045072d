use dioxus::prelude::*;

use vigor_domain as domain;

use crate::{
    component::element::{Title, WhiteBox},
    ensure_plan,
};

#[component]
pub fn Nutrition() -> Element {
    let plan = ensure_plan!();
    let meals = plan.plan.meals.clone();
    let split = meals.macro_split();

    rsx! {
        Title { title: "Daily macros" }
        div {
            class: "grid is-col-min-7 mx-3",
            MacroStat { value: "{meals.total_calories}", label: "Calories" }
            MacroStat { value: "{meals.total_protein} g", label: "Protein" }
            MacroStat { value: "{meals.total_carbs} g", label: "Carbs" }
            MacroStat { value: "{meals.total_fat} g", label: "Fat" }
        }
        if let Some(split) = split {
            div {
                class: "mx-3 mb-5",
                p {
                    class: "is-size-7 has-text-centered has-text-grey mb-1",
                    "Calorie split"
                }
                div {
                    class: "macro-bar",
                    div {
                        class: "macro-bar-segment has-background-success",
                        style: "width:{split.protein}%",
                        "P"
                    }
                    div {
                        class: "macro-bar-segment has-background-warning",
                        style: "width:{split.carbs}%",
                        "C"
                    }
                    div {
                        class: "macro-bar-segment has-background-danger",
                        style: "width:{split.fat}%",
                        "F"
                    }
                }
            }
        }

        Title { title: "Meals" }
        div {
            class: "grid is-col-min-12 mx-3",
            MealCard { title: "Breakfast", icon: "mug-hot", meal: meals.breakfast.clone() }
            MealCard { title: "Lunch", icon: "sun", meal: meals.lunch.clone() }
            MealCard { title: "Dinner", icon: "moon", meal: meals.dinner.clone() }
            if let Some(snack) = meals.snack.clone() {
                MealCard { title: "Snack", icon: "apple-whole", meal: snack }
            }
            if let Some(post_workout_snack) = meals.post_workout_snack.clone() {
                MealCard { title: "Post-workout", icon: "bolt", meal: post_workout_snack }
            }
        }

        div {
            class: "grid is-col-min-12 mx-3",
            div {
                class: "cell",
                WhiteBox {
                    p {
                        class: "title is-size-6",
                        span { class: "icon has-text-link", i { class: "fas fa-droplet" } }
                        span { " Hydration" }
                    }
                    p { class: "is-size-7", "{meals.hydration}" }
                }
            }
            div {
                class: "cell",
                WhiteBox {
                    p {
                        class: "title is-size-6",
                        span { class: "icon has-text-link", i { class: "fas fa-pills" } }
                        span { " Supplements" }
                    }
                    p { class: "is-size-7", "{meals.supplements}" }
                }
            }
        }
    }
}

#[component]
fn MacroStat(value: String, label: String) -> Element {
    rsx! {
        div {
            class: "cell box has-text-centered mx-1 p-3",
            p { class: "is-size-5 has-text-weight-bold", "{value}" }
            p { class: "is-size-7 has-text-grey", "{label}" }
        }
    }
}

#[component]
fn MealCard(title: String, icon: String, meal: domain::Meal) -> Element {
    rsx! {
        div {
            class: "cell",
            div {
                class: "box",
                div {
                    class: "is-flex is-align-items-center mb-2",
                    span { class: "icon has-text-link mr-2", i { class: "fas fa-{icon}" } }
                    div {
                        p { class: "title is-size-6 mb-0", "{title}" }
                        p { class: "is-size-7 has-text-weight-bold", "{meal.name}" }
                    }
                }
                if let Some(description) = &meal.description {
                    p { class: "is-size-7 has-text-grey mb-2", "{description}" }
                }
                div {
                    class: "level is-mobile",
                    MealMacro { value: "{meal.calories}", label: "kcal" }
                    MealMacro { value: "{meal.protein} g", label: "Protein" }
                    MealMacro { value: "{meal.carbs} g", label: "Carbs" }
                    MealMacro { value: "{meal.fat} g", label: "Fat" }
                }
            }
        }
    }
}

#[component]
fn MealMacro(value: String, label: String) -> Element {
    rsx! {
        div {
            class: "level-item has-text-centered",
            div {
                p { class: "is-size-7 has-text-weight-bold", "{value}" }
                p { class: "is-size-7 has-text-grey", "{label}" }
            }
        }
    }
}
