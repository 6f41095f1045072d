use dioxus::prelude::*;

use vigor_domain as domain;
use vigor_domain::CoachService;

use crate::{
    DOMAIN_SERVICE,
    component::element::{Error, Loading, Subtitle, WhiteBox},
    ensure_plan,
};

const EXAMPLE_QUERIES: [&str; 4] = [
    "How much protein do I need to build muscle?",
    "Is creatine safe to take daily?",
    "Best exercises for lower back pain",
    "Benefits of HIIT vs steady-state cardio",
];

#[component]
pub fn Research() -> Element {
    let _ = ensure_plan!();
    let mut query = use_signal(String::new);
    let mut result = use_signal(|| None::<domain::SearchAnswer>);
    let mut searching = use_signal(|| false);
    let mut search_error = use_signal(|| None::<String>);

    let search = move |_| {
        let question = query.read().trim().to_string();
        if question.is_empty() || searching() {
            return;
        }
        searching.set(true);
        search_error.set(None);
        result.set(None);
        spawn(async move {
            match DOMAIN_SERVICE.read().search(&question).await {
                Ok(answer) => result.set(Some(answer)),
                Err(err) => search_error.set(Some(format!("Search failed: {err}"))),
            }
            searching.set(false);
        });
    };

    rsx! {
        div {
            class: "mx-3",
            Subtitle {
                text: "Ask any fitness or nutrition question and get an answer grounded in \
                       web search results."
            }
            div {
                class: "field has-addons",
                div {
                    class: "control is-expanded",
                    input {
                        class: "input",
                        r#type: "text",
                        placeholder: "e.g. How much sleep do I need for recovery?",
                        value: "{query}",
                        oninput: move |evt| query.set(evt.value()),
                    }
                }
                div {
                    class: "control",
                    button {
                        class: "button is-link",
                        class: if searching() { "is-loading" },
                        disabled: searching(),
                        onclick: search,
                        "Search"
                    }
                }
            }

            if searching() {
                Loading {}
            }
            if let Some(error) = search_error() {
                Error { message: error }
            }

            if result.read().is_none() && !searching() {
                p { class: "is-size-7 has-text-grey mb-2", "Try an example:" }
                div {
                    class: "tags",
                    for example in EXAMPLE_QUERIES {
                        a {
                            class: "tag is-rounded is-hoverable",
                            onclick: move |_| query.set(example.to_string()),
                            "{example}"
                        }
                    }
                }
            }

            if let Some(result) = &*result.read() {
                WhiteBox {
                    p { class: "title is-size-6", "Answer" }
                    p { class: "preserve-newlines", "{result.answer}" }
                }
                if !result.sources.is_empty() {
                    WhiteBox {
                        p { class: "title is-size-6", "Sources" }
                        ul {
                            for source in &result.sources {
                                li {
                                    a {
                                        href: "{source.uri}",
                                        target: "_blank",
                                        rel: "noopener noreferrer",
                                        "{source.title}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
