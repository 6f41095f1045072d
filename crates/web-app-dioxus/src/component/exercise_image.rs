use std::{
    cell::RefCell,
    rc::Rc,
    sync::atomic::{AtomicUsize, Ordering},
};

use dioxus::prelude::*;
use log::debug;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, js_sys,
};

use vigor_domain as domain;
use vigor_domain::CoachService;
use vigor_web_app::exercise_image::{
    BrowserTimer, ExerciseImageLoader, FetchState, ImageSource,
};

use crate::DOMAIN_SERVICE;

/// Activation margin around the viewport within which images start loading.
const ROOT_MARGIN: &str = "100px";
const THRESHOLD: f64 = 0.01;

static NEXT_ELEMENT_ID: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone, Copy)]
struct Coach;

impl ImageSource for Coach {
    async fn exercise_image(
        &self,
        exercise: &str,
    ) -> Result<domain::ExerciseImage, domain::GenerateError> {
        DOMAIN_SERVICE.read().get_exercise_image(exercise).await
    }
}

/// AI-generated demonstration image for one exercise.
///
/// The image is only requested once the element comes close to the viewport.
/// `stagger_index` is the element's position in the rendered list and spreads
/// the initial requests of a list scrolled into view at once.
#[component]
pub fn ExerciseImage(exercise: String, stagger_index: usize) -> Element {
    let element_id = use_hook(|| {
        format!(
            "exercise-image-{}",
            NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed)
        )
    });
    let mut state = use_signal(FetchState::default);
    let mut visible = use_signal(|| false);
    let mut started = use_signal(|| false);
    let loader = use_hook(|| {
        let loader = Rc::new(ExerciseImageLoader::new(Coach, BrowserTimer));
        loader.on_change(move |new_state: &FetchState| state.set(new_state.clone()));
        loader
    });
    let observation = use_hook(|| Rc::new(RefCell::new(None::<Observation>)));

    use_effect({
        let element_id = element_id.clone();
        let observation = Rc::clone(&observation);
        move || {
            if observation.borrow().is_some() {
                return;
            }
            *observation.borrow_mut() = observe(&element_id, move || visible.set(true));
        }
    });

    use_effect({
        let loader = Rc::clone(&loader);
        let exercise = exercise.clone();
        move || {
            if visible() && !started() {
                started.set(true);
                let loader = Rc::clone(&loader);
                let exercise = exercise.clone();
                spawn(async move {
                    loader.fetch(&exercise, stagger_index).await;
                });
            }
        }
    });

    use_drop({
        let loader = Rc::clone(&loader);
        let observation = Rc::clone(&observation);
        move || {
            loader.release();
            observation.borrow_mut().take();
        }
    });

    let content = match state() {
        FetchState::Loaded(image) => rsx! {
            img {
                class: "exercise-image-img",
                src: "{image.url()}",
                alt: "Demonstration of {exercise}",
            }
        },
        FetchState::Failed(message) => rsx! {
            div {
                class: "exercise-image-error has-text-centered p-2",
                span {
                    class: "icon has-text-danger",
                    i { class: "fas fa-circle-exclamation" }
                }
                p { class: "is-size-7", "{message}" }
                button {
                    class: "button is-small is-link mt-1",
                    disabled: state().is_loading(),
                    onclick: {
                        let loader = Rc::clone(&loader);
                        let exercise = exercise.clone();
                        move |_| {
                            let loader = Rc::clone(&loader);
                            let exercise = exercise.clone();
                            spawn(async move {
                                loader.retry(&exercise).await;
                            });
                        }
                    },
                    "Retry"
                }
            }
        },
        FetchState::NotStarted | FetchState::Loading => rsx! {
            div {
                class: "exercise-image-placeholder",
                div { class: "exercise-image-shimmer" }
                span {
                    class: "icon has-text-grey",
                    i { class: "fas fa-image" }
                }
            }
        },
    };

    rsx! {
        div {
            id: "{element_id}",
            class: "exercise-image",
            {content}
        }
    }
}

struct Observation {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for Observation {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// One-shot viewport observation of the element with the given id. The
/// observer disconnects itself after the first qualifying entry. If the
/// observation API is unavailable the element is treated as never visible.
fn observe(element_id: &str, mut on_visible: impl FnMut() + 'static) -> Option<Observation> {
    let element = web_sys::window()?.document()?.get_element_by_id(element_id)?;

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let intersecting = entries.iter().any(|entry| {
                entry
                    .dyn_into::<IntersectionObserverEntry>()
                    .map(|entry| entry.is_intersecting())
                    .unwrap_or(false)
            });
            if intersecting {
                on_visible();
                observer.disconnect();
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin(ROOT_MARGIN);
    options.set_threshold(&JsValue::from_f64(THRESHOLD));

    let observer = match IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(observer) => observer,
        Err(err) => {
            debug!("viewport observation unavailable, image will not be loaded: {err:?}");
            return None;
        }
    };
    observer.observe(&element);

    Some(Observation {
        observer,
        _callback: callback,
    })
}
