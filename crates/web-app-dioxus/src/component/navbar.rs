use dioxus::prelude::*;

use crate::{ACTIVE_PLAN, Route, component::element::Icon};

#[component]
pub fn Navbar() -> Element {
    let mut menu_visible = use_signal(|| false);
    let navigator = use_navigator();

    let page_title = match use_route::<Route>() {
        Route::Root {} | Route::Welcome {} => "Vigor".to_string(),
        Route::Home {} => ACTIVE_PLAN
            .read()
            .as_ref()
            .map_or("Dashboard".to_string(), |plan| plan.name.to_string()),
        Route::Workout {} => "Workout".to_string(),
        Route::Nutrition {} => "Nutrition".to_string(),
        Route::Progress { .. } => "Progress".to_string(),
        Route::Tips {} => "Pro tips".to_string(),
        Route::Research {} => "Research".to_string(),
        Route::Plans {} => "My plans".to_string(),
        Route::Profile { .. } => "Profile".to_string(),
        Route::Settings {} => "Settings".to_string(),
        Route::NotFound { .. } => String::new(),
    };
    let go_up_target = match use_route::<Route>() {
        Route::Root {} | Route::Welcome {} | Route::Home {} => None,
        Route::Workout {}
        | Route::Nutrition {}
        | Route::Progress { .. }
        | Route::Tips {}
        | Route::Research {}
        | Route::Profile { .. } => Some(Route::Home {}),
        Route::Plans {} | Route::Settings {} | Route::NotFound { .. } => Some(Route::Root {}),
    };

    rsx! {
        nav {
            class: "navbar is-fixed-top is-primary has-shadow has-text-weight-bold",
            div {
                class: "container",
                div {
                    class: "navbar-brand is-flex-grow-1",
                    a {
                        class: "navbar-item is-size-5",
                        class: if go_up_target.is_none() { "has-text-primary" },
                        onclick: {
                            let go_up_target = go_up_target.clone();
                            move |_| {
                                if let Some(go_up_target) = &go_up_target {
                                    navigator.push(go_up_target.clone());
                                }
                            }
                        },
                        Icon { name: "chevron-left" }
                    }
                    div { class: "navbar-item is-size-5", "{page_title}" }
                    div { class: "mx-auto" }
                    a {
                        aria_expanded: menu_visible(),
                        aria_label: "menu",
                        class: "navbar-burger ml-0",
                        class: if menu_visible() { "is-active" },
                        role: "button",
                        onclick: move |_| { *menu_visible.write() = !menu_visible() },
                        span { aria_hidden: "true" }
                        span { aria_hidden: "true" }
                        span { aria_hidden: "true" }
                        span { aria_hidden: "true" }
                    }
                }
                div {
                    class: "navbar-menu is-flex-grow-0",
                    class: if menu_visible() { "is-active" },
                    div {
                        class: "navbar-end",
                        a {
                            class: "navbar-item",
                            onclick: move |_| {
                                *menu_visible.write() = false;
                                navigator.push(Route::Plans {});
                            },
                            Icon { name: "folder-open", px: 5 }
                            "My plans"
                        }
                        a {
                            class: "navbar-item",
                            onclick: move |_| {
                                *menu_visible.write() = false;
                                navigator.push(Route::Welcome {});
                            },
                            Icon { name: "plus-circle", px: 5 }
                            "New plan"
                        }
                        a {
                            class: "navbar-item",
                            onclick: move |_| {
                                *menu_visible.write() = false;
                                navigator.push(Route::Settings {});
                            },
                            Icon { name: "gear", px: 5 }
                            "Settings"
                        }
                    }
                }
            }
        }

        Outlet::<Route> {}
    }
}
