#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]

use std::sync::{Arc, Mutex};

use dioxus::prelude::*;
use log::error;

use vigor_domain as domain;
use vigor_storage as storage;
use vigor_web_app as web_app;

use component::{
    element::{Color, Dialog},
    navbar::Navbar,
};
use page::{
    home::Home, not_found::NotFound, nutrition::Nutrition, plans::Plans, profile::Profile,
    progress::Progress, research::Research, root::Root, settings::Settings, tips::Tips,
    welcome::Welcome, workout::Workout,
};

mod component;
mod page;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Navbar)]
    #[route("/")]
    Root {},
    #[route("/welcome")]
    Welcome {},
    #[route("/home")]
    Home {},
    #[route("/workout")]
    Workout {},
    #[route("/nutrition")]
    Nutrition {},
    #[route("/progress?:add")]
    Progress { add: bool },
    #[route("/tips")]
    Tips {},
    #[route("/research")]
    Research {},
    #[route("/plans")]
    Plans {},
    #[route("/profile?:edit")]
    Profile { edit: bool },
    #[route("/settings")]
    Settings {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

static DOMAIN_SERVICE: GlobalSignal<domain::Service<storage::local_gemini::LocalGemini>> =
    Signal::global(|| domain::Service::new(storage::local_gemini::LocalGemini::new()));
static WEB_APP_SERVICE: GlobalSignal<web_app::Service<storage::local_storage::LocalStorage>> =
    Signal::global(|| web_app::Service::new(storage::local_storage::LocalStorage));
static ACTIVE_PLAN: GlobalSignal<Option<domain::SavedPlan>> = Signal::global(|| None);
static NOTIFICATIONS: GlobalSignal<Vec<String>> = Signal::global(Vec::new);
static DATA_CHANGED: GlobalSignal<usize> = Signal::global(|| 0);

fn main() {
    init_logging();
    dioxus::launch(App);
}

fn init_logging() {
    let _ = web_app::log::init(Arc::new(Mutex::new(storage::local_storage::LocalStorage)));
}

#[component]
fn App() -> Element {
    std::panic::set_hook(Box::new(|info| {
        error!("{info}");
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("main"))
            .map(|el| {
                el.set_inner_html(&format!(
                    "
                    <section class=\"section\">
                        <div class=\"container\">
                            <div class=\"message is-danger\">
                                <div class=\"message-header\">
                                    <p>Something went wrong</p>
                                </div>
                                <div class=\"message-body\">
                                    <div class=\"block\">
                                        An unexpected error occurred and the application cannot continue.
                                    </div>
                                    <div class=\"block\">
                                        <pre>{info}</pre>
                                    </div>
                                    <div class=\"block field is-grouped is-grouped-centered\">
                                        <button class=\"button\" onclick=\"location.reload()\">
                                            <span>Reload page</span>
                                        </button>
                                    </div>
                                </div>
                            </div>
                        </div>
                    </section>
                "
                ));
                Some(())
            });
    }));

    rsx! {
        document::Link { rel: "stylesheet", href: "https://cdn.jsdelivr.net/npm/bulma@1.0.2/css/bulma.min.css" }
        document::Link { rel: "stylesheet", href: "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.2/css/all.min.css" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        div {
            id: "main",
            class: "container is-max-desktop py-4",
            Router::<Route> {},
            Notification {}
        }
    }
}

#[component]
fn Notification() -> Element {
    let notification = NOTIFICATIONS.read().last().cloned();

    rsx! {
        if let Some(message) = notification {
            Dialog {
                color: Color::Danger,
                title: rsx! { "Error" },
                close_event: move |_| { let _ = NOTIFICATIONS.write().pop(); },
                div {
                    class: "block",
                    "{message}"
                }
                div {
                    class: "field is-grouped is-grouped-centered",
                    div {
                        class: "control",
                        button {
                            class: "button is-danger",
                            onclick: move |_| { let _ = NOTIFICATIONS.write().pop(); },
                            "Close"
                        }
                    }
                }
            }
        }
    }
}

/// Returns the active plan or redirects to the welcome page.
#[macro_export]
macro_rules! ensure_plan {
    () => {{
        let Some(plan) = $crate::ACTIVE_PLAN.read().clone() else {
            dioxus::prelude::navigator().push($crate::Route::Welcome {});
            return rsx! {};
        };
        plan
    }};
}

fn signal_changed_data() {
    *DATA_CHANGED.write() += 1;
}
