use dioxus::prelude::*;

use vigor_web_app as web_app;
use vigor_web_app::SettingsService;
use vigor_web_app::log::Service as LogService;

use crate::{
    WEB_APP_SERVICE,
    component::element::{ErrorMessage, Icon, LoadingPage, Subtitle, Table, Title, WhiteBox},
};

#[component]
pub fn Settings() -> Element {
    let mut settings = use_resource(|| async { WEB_APP_SERVICE.read().get_settings().await });

    match settings.read().clone() {
        Some(Ok(current)) => {
            let store = move |settings: web_app::Settings| {
                spawn(async move {
                    let _ = WEB_APP_SERVICE.read().set_settings(settings).await;
                });
            };
            rsx! {
                Title { title: "Theme" }
                div {
                    class: "field has-addons has-addons-centered",
                    p {
                        class: "control",
                        button {
                            class: "button",
                            class: if current.theme == web_app::Theme::Light { "is-link" },
                            onclick: {
                                let mut settings_value = current.clone();
                                move |_| {
                                    settings_value.theme = web_app::Theme::Light;
                                    store(settings_value.clone());
                                    settings.restart();
                                }
                            },
                            Icon { name: "sun", is_small: true }
                            span { "Light" }
                        }
                    }
                    p {
                        class: "control",
                        button {
                            class: "button",
                            class: if current.theme == web_app::Theme::Dark { "is-link" },
                            onclick: {
                                let mut settings_value = current.clone();
                                move |_| {
                                    settings_value.theme = web_app::Theme::Dark;
                                    store(settings_value.clone());
                                    settings.restart();
                                }
                            },
                            Icon { name: "moon", is_small: true }
                            span { "Dark" }
                        }
                    }
                    p {
                        class: "control",
                        button {
                            class: "button",
                            class: if current.theme == web_app::Theme::System { "is-link" },
                            onclick: {
                                let mut settings_value = current.clone();
                                move |_| {
                                    settings_value.theme = web_app::Theme::System;
                                    store(settings_value.clone());
                                    settings.restart();
                                }
                            },
                            Icon { name: "desktop", is_small: true }
                            span { "System" }
                        }
                    }
                }

                Title { title: "Plan generation" }
                div {
                    class: "mx-3",
                    Subtitle {
                        text: "API key for the plan generation service. It is stored \
                               locally in this browser only."
                    }
                    div {
                        class: "field",
                        div {
                            class: "control",
                            input {
                                class: "input",
                                r#type: "password",
                                placeholder: "API key",
                                value: "{current.api_key}",
                                onchange: {
                                    let mut settings_value = current.clone();
                                    move |evt: FormEvent| {
                                        settings_value.api_key = evt.value();
                                        store(settings_value.clone());
                                        settings.restart();
                                    }
                                },
                            }
                        }
                    }
                }

                Diagnostics {}
            }
        }
        Some(Err(err)) => rsx! {
            ErrorMessage { message: "Failed to get settings: {err}" }
        },
        None => rsx! {
            LoadingPage {}
        },
    }
}

#[component]
fn Diagnostics() -> Element {
    let entries = WEB_APP_SERVICE.read().get_log_entries().unwrap_or_default();

    rsx! {
        Title { title: "Diagnostics" }
        WhiteBox {
            if entries.is_empty() {
                p { class: "has-text-grey is-size-7", "No log entries" }
            } else {
                Table {
                    body: entries
                        .iter()
                        .take(20)
                        .map(|entry| {
                            vec![
                                rsx! { span { class: "is-size-7", "{entry.time}" } },
                                rsx! {
                                    span {
                                        class: "is-size-7",
                                        class: if entry.level == log::Level::Error { "has-text-danger" },
                                        "{entry.level}"
                                    }
                                },
                                rsx! { span { class: "is-size-7", "{entry.message}" } },
                            ]
                        })
                        .collect::<Vec<_>>(),
                }
            }
        }
    }
}
