use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use dioxus::web::WebEventExt;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use crate::dom::TimeoutHandle;

pub const ROOT_MARGIN: &str = "50px 0px";
pub const THRESHOLD: f64 = 0.1;
pub const FALLBACK_MS: i32 = 3000;

pub fn image_class(base: Option<&str>, loaded: bool) -> String {
    let base = base.unwrap_or("lazy-image");
    if loaded {
        format!("{base} loaded")
    } else {
        base.to_string()
    }
}

#[cfg(target_arch = "wasm32")]
struct ObserverHandle {
    observer: web_sys::IntersectionObserver,
    target: web_sys::Element,
    _closure: Rc<wasm_bindgen::closure::Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>>,
}

#[component]
pub fn LazyImage(src: String, alt: String, class: Option<String>) -> Element {
    let mut loaded = use_signal(|| cfg!(not(target_arch = "wasm32")));
    #[cfg(target_arch = "wasm32")]
    let mut image_handle = use_signal(|| None::<web_sys::HtmlImageElement>);
    #[cfg(target_arch = "wasm32")]
    let mut observer_handle = use_signal(|| None::<ObserverHandle>);
    #[cfg(target_arch = "wasm32")]
    let mut fallback = use_signal(|| None::<TimeoutHandle>);

    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        let Some(image) = image_handle.read().as_ref().cloned() else {
            return;
        };
        if *loaded.peek() || observer_handle.peek().is_some() {
            return;
        }
        if image.complete() && !image.src().is_empty() {
            loaded.set(true);
            return;
        }

        let closure = Rc::new(Closure::wrap(Box::new(move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
            for entry in entries.iter() {
                let entry: web_sys::IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    observer.unobserve(&entry.target());
                    loaded.set(true);
                }
            }
        }) as Box<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>));
        let options = web_sys::IntersectionObserverInit::new();
        options.set_root_margin(ROOT_MARGIN);
        options.set_threshold(&wasm_bindgen::JsValue::from_f64(THRESHOLD));
        let Ok(observer) = web_sys::IntersectionObserver::new_with_options(
            closure.as_ref().as_ref().unchecked_ref(),
            &options,
        ) else {
            loaded.set(true);
            return;
        };
        let target: web_sys::Element = image.unchecked_into();
        observer.observe(&target);
        observer_handle.set(Some(ObserverHandle {
            observer,
            target,
            _closure: closure,
        }));
        fallback.set(TimeoutHandle::schedule(FALLBACK_MS, move || {
            if !*loaded.peek() {
                loaded.set(true);
            }
        }));
    });

    #[cfg(target_arch = "wasm32")]
    use_drop(move || {
        if let Some(handle) = observer_handle.peek().as_ref() {
            handle.observer.unobserve(&handle.target);
        }
        if let Some(pending) = fallback.peek().as_ref() {
            pending.clear();
        }
    });

    let shown = loaded();
    let class = image_class(class.as_deref(), shown);
    let current_src = shown.then(|| src.clone());
    rsx! {
        img {
            class: "{class}",
            alt: "{alt}",
            loading: "lazy",
            src: current_src,
            "data-src": "{src}",
            onmounted: move |_event| {
                #[cfg(target_arch = "wasm32")]
                {
                    use wasm_bindgen::JsCast;
                    let element = _event.data.as_ref().as_web_event();
                    if let Ok(node) = element.dyn_into::<web_sys::HtmlImageElement>() {
                        image_handle.set(Some(node));
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loaded_class_is_appended() {
        assert_eq!(image_class(None, false), "lazy-image");
        assert_eq!(image_class(Some("project-shot"), true), "project-shot loaded");
    }
}
