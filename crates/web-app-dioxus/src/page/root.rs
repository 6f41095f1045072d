use dioxus::prelude::*;

use crate::{ACTIVE_PLAN, Route};

#[component]
pub fn Root() -> Element {
    let navigator = use_navigator();

    if ACTIVE_PLAN.read().is_some() {
        navigator.push(Route::Home {});
    } else {
        navigator.push(Route::Welcome {});
    }
    rsx! {}
}
