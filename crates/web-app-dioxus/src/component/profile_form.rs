use dioxus::prelude::*;
use strum::IntoEnumIterator;

use vigor_domain as domain;

use crate::component::form::{FieldValue, FieldValueState, InputField, SelectField, SelectOption};

/// Profile form used for creating and editing plans.
#[component]
pub fn ProfileForm(
    profile: domain::UserProfile,
    submit_label: String,
    onsubmit: EventHandler<domain::UserProfile>,
) -> Element {
    let mut age = use_signal(|| FieldValue::new(profile.age));
    let mut weight = use_signal(|| FieldValue::new(profile.weight));
    let mut height = use_signal(|| FieldValue::new(profile.height));
    let mut workout_days = use_signal(|| FieldValue::new(profile.workout_days));
    let mut gender = use_signal(|| profile.gender);
    let mut goal = use_signal(|| profile.goal);
    let mut activity_level = use_signal(|| profile.activity_level);
    let mut workout_style = use_signal(|| profile.workout_style);
    let mut dietary_restrictions = use_signal(|| profile.dietary_restrictions.clone());
    let mut available_equipment = use_signal(|| profile.available_equipment.clone());
    let mut disliked_exercises = use_signal(|| profile.disliked_exercises.clone());
    let mut target_calories = use_signal(|| FieldValue::from_option(profile.target_calories));
    let mut target_protein = use_signal(|| FieldValue::from_option(profile.target_protein));
    let mut target_carbs = use_signal(|| FieldValue::from_option(profile.target_carbs));
    let mut target_fat = use_signal(|| FieldValue::from_option(profile.target_fat));

    let valid = FieldValue::all_valid(&[
        &*age.read(),
        &*weight.read(),
        &*height.read(),
        &*workout_days.read(),
        &*target_calories.read(),
        &*target_protein.read(),
        &*target_carbs.read(),
        &*target_fat.read(),
    ]);

    rsx! {
        div {
            class: "columns is-multiline",
            div {
                class: "column is-half",
                InputField {
                    label: "Age",
                    r#type: "number",
                    inputmode: "numeric",
                    min: "12",
                    max: "100",
                    value: age.read().input.clone(),
                    error: if let Err(err) = &age.read().validated { err.clone() },
                    has_changed: age.read().changed(),
                    oninput: move |evt: FormEvent| {
                        let orig = age.read().orig.clone();
                        age.set(FieldValue {
                            input: evt.value(),
                            validated: domain::UserProfile::validate_age(&evt.value())
                                .map_err(|err| err.to_string()),
                            orig,
                        });
                    },
                }
            }
            div {
                class: "column is-half",
                SelectField {
                    label: "Gender",
                    options: domain::Gender::iter()
                        .map(|option| rsx! {
                            SelectOption {
                                text: option.to_string(),
                                value: option.to_string(),
                                selected: option == gender(),
                            }
                        })
                        .collect::<Vec<_>>(),
                    onchange: move |evt: FormEvent| {
                        if let Ok(value) = evt.value().parse::<domain::Gender>() {
                            gender.set(value);
                        }
                    },
                }
            }
            div {
                class: "column is-half",
                InputField {
                    label: "Weight (kg)",
                    r#type: "number",
                    inputmode: "decimal",
                    min: "30",
                    max: "300",
                    step: "0.1",
                    value: weight.read().input.clone(),
                    error: if let Err(err) = &weight.read().validated { err.clone() },
                    has_changed: weight.read().changed(),
                    oninput: move |evt: FormEvent| {
                        let orig = weight.read().orig.clone();
                        weight.set(FieldValue {
                            input: evt.value(),
                            validated: domain::UserProfile::validate_weight(&evt.value())
                                .map_err(|err| err.to_string()),
                            orig,
                        });
                    },
                }
            }
            div {
                class: "column is-half",
                InputField {
                    label: "Height (cm)",
                    r#type: "number",
                    inputmode: "numeric",
                    min: "100",
                    max: "250",
                    value: height.read().input.clone(),
                    error: if let Err(err) = &height.read().validated { err.clone() },
                    has_changed: height.read().changed(),
                    oninput: move |evt: FormEvent| {
                        let orig = height.read().orig.clone();
                        height.set(FieldValue {
                            input: evt.value(),
                            validated: domain::UserProfile::validate_height(&evt.value())
                                .map_err(|err| err.to_string()),
                            orig,
                        });
                    },
                }
            }
            div {
                class: "column is-half",
                SelectField {
                    label: "Main goal",
                    options: domain::FitnessGoal::iter()
                        .map(|option| rsx! {
                            SelectOption {
                                text: option.to_string(),
                                value: option.to_string(),
                                selected: option == goal(),
                            }
                        })
                        .collect::<Vec<_>>(),
                    onchange: move |evt: FormEvent| {
                        if let Ok(value) = evt.value().parse::<domain::FitnessGoal>() {
                            goal.set(value);
                        }
                    },
                }
            }
            div {
                class: "column is-half",
                InputField {
                    label: "Workout days per week",
                    r#type: "number",
                    inputmode: "numeric",
                    min: "1",
                    max: "7",
                    value: workout_days.read().input.clone(),
                    error: if let Err(err) = &workout_days.read().validated { err.clone() },
                    has_changed: workout_days.read().changed(),
                    oninput: move |evt: FormEvent| {
                        let orig = workout_days.read().orig.clone();
                        workout_days.set(FieldValue {
                            input: evt.value(),
                            validated: domain::UserProfile::validate_workout_days(&evt.value())
                                .map_err(|err| err.to_string()),
                            orig,
                        });
                    },
                }
            }
            div {
                class: "column is-full",
                SelectField {
                    label: "Activity level",
                    options: domain::ActivityLevel::iter()
                        .map(|option| rsx! {
                            SelectOption {
                                text: option.to_string(),
                                value: option.to_string(),
                                selected: option == activity_level(),
                            }
                        })
                        .collect::<Vec<_>>(),
                    onchange: move |evt: FormEvent| {
                        if let Ok(value) = evt.value().parse::<domain::ActivityLevel>() {
                            activity_level.set(value);
                        }
                    },
                }
            }
            div {
                class: "column is-full",
                SelectField {
                    label: "Preferred workout style",
                    options: domain::WorkoutStyle::iter()
                        .map(|option| rsx! {
                            SelectOption {
                                text: option.to_string(),
                                value: option.to_string(),
                                selected: option == workout_style(),
                            }
                        })
                        .collect::<Vec<_>>(),
                    onchange: move |evt: FormEvent| {
                        if let Ok(value) = evt.value().parse::<domain::WorkoutStyle>() {
                            workout_style.set(value);
                        }
                    },
                }
            }
            div {
                class: "column is-full",
                InputField {
                    label: "Available equipment",
                    placeholder: "e.g. Full Gym Access, Dumbbells only",
                    value: available_equipment(),
                    has_changed: false,
                    oninput: move |evt: FormEvent| available_equipment.set(evt.value()),
                }
            }
            div {
                class: "column is-full",
                InputField {
                    label: "Dietary restrictions",
                    placeholder: "e.g. Vegetarian, Lactose Intolerant",
                    value: dietary_restrictions(),
                    has_changed: false,
                    oninput: move |evt: FormEvent| dietary_restrictions.set(evt.value()),
                }
            }
            div {
                class: "column is-full",
                InputField {
                    label: "Disliked exercises to avoid",
                    placeholder: "e.g. Burpees, Running",
                    value: disliked_exercises(),
                    has_changed: false,
                    oninput: move |evt: FormEvent| disliked_exercises.set(evt.value()),
                }
            }
        }

        fieldset {
            class: "fieldset mb-4",
            legend { class: "has-text-centered", "Custom nutrition targets (optional)" }
            div {
                class: "columns is-multiline",
                div {
                    class: "column is-half",
                    InputField {
                        label: "Daily calories (kcal)",
                        r#type: "number",
                        inputmode: "numeric",
                        placeholder: "e.g. 2500",
                        value: target_calories.read().input.clone(),
                        error: if let Err(err) = &target_calories.read().validated { err.clone() },
                        has_changed: target_calories.read().changed(),
                        oninput: move |evt: FormEvent| {
                            let orig = target_calories.read().orig.clone();
                            target_calories.set(FieldValue {
                                input: evt.value(),
                                validated: domain::UserProfile::validate_target(&evt.value())
                                    .map_err(|err| err.to_string()),
                                orig,
                            });
                        },
                    }
                }
                div {
                    class: "column is-half",
                    InputField {
                        label: "Daily protein (g)",
                        r#type: "number",
                        inputmode: "numeric",
                        placeholder: "e.g. 180",
                        value: target_protein.read().input.clone(),
                        error: if let Err(err) = &target_protein.read().validated { err.clone() },
                        has_changed: target_protein.read().changed(),
                        oninput: move |evt: FormEvent| {
                            let orig = target_protein.read().orig.clone();
                            target_protein.set(FieldValue {
                                input: evt.value(),
                                validated: domain::UserProfile::validate_target(&evt.value())
                                    .map_err(|err| err.to_string()),
                                orig,
                            });
                        },
                    }
                }
                div {
                    class: "column is-half",
                    InputField {
                        label: "Daily carbs (g)",
                        r#type: "number",
                        inputmode: "numeric",
                        placeholder: "e.g. 250",
                        value: target_carbs.read().input.clone(),
                        error: if let Err(err) = &target_carbs.read().validated { err.clone() },
                        has_changed: target_carbs.read().changed(),
                        oninput: move |evt: FormEvent| {
                            let orig = target_carbs.read().orig.clone();
                            target_carbs.set(FieldValue {
                                input: evt.value(),
                                validated: domain::UserProfile::validate_target(&evt.value())
                                    .map_err(|err| err.to_string()),
                                orig,
                            });
                        },
                    }
                }
                div {
                    class: "column is-half",
                    InputField {
                        label: "Daily fat (g)",
                        r#type: "number",
                        inputmode: "numeric",
                        placeholder: "e.g. 80",
                        value: target_fat.read().input.clone(),
                        error: if let Err(err) = &target_fat.read().validated { err.clone() },
                        has_changed: target_fat.read().changed(),
                        oninput: move |evt: FormEvent| {
                            let orig = target_fat.read().orig.clone();
                            target_fat.set(FieldValue {
                                input: evt.value(),
                                validated: domain::UserProfile::validate_target(&evt.value())
                                    .map_err(|err| err.to_string()),
                                orig,
                            });
                        },
                    }
                }
            }
        }

        div {
            class: "field",
            div {
                class: "control",
                button {
                    class: "button is-link is-fullwidth",
                    disabled: !valid,
                    onclick: move |_| {
                        let (
                            Ok(age),
                            Ok(weight),
                            Ok(height),
                            Ok(workout_days),
                            Ok(target_calories),
                            Ok(target_protein),
                            Ok(target_carbs),
                            Ok(target_fat),
                        ) = (
                            age.read().validated.clone(),
                            weight.read().validated.clone(),
                            height.read().validated.clone(),
                            workout_days.read().validated.clone(),
                            target_calories.read().validated.clone(),
                            target_protein.read().validated.clone(),
                            target_carbs.read().validated.clone(),
                            target_fat.read().validated.clone(),
                        )
                        else {
                            return;
                        };
                        onsubmit.call(domain::UserProfile {
                            age,
                            gender: gender(),
                            weight,
                            height,
                            goal: goal(),
                            activity_level: activity_level(),
                            workout_days,
                            dietary_restrictions: dietary_restrictions(),
                            available_equipment: available_equipment(),
                            workout_style: workout_style(),
                            disliked_exercises: disliked_exercises(),
                            target_calories,
                            target_protein,
                            target_carbs,
                            target_fat,
                        });
                    },
                    "{submit_label}"
                }
            }
        }
    }
}
