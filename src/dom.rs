use crate::error::SiteError;

#[cfg(target_arch = "wasm32")]
use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[cfg(target_arch = "wasm32")]
use crate::error::js_error;

pub const HEADER_FALLBACK_PX: f64 = 80.0;

#[cfg(target_arch = "wasm32")]
pub struct TimeoutHandle {
    id: i32,
    _closure: Rc<Closure<dyn FnMut()>>,
}

#[cfg(target_arch = "wasm32")]
impl TimeoutHandle {
    pub fn schedule(ms: i32, callback: impl FnMut() + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let closure = Rc::new(Closure::wrap(Box::new(callback) as Box<dyn FnMut()>));
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().as_ref().unchecked_ref(),
                ms,
            )
            .ok()?;
        Some(Self { id, _closure: closure })
    }

    pub fn clear(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.id);
        }
    }
}

#[cfg(target_arch = "wasm32")]
struct EventListener {
    target: web_sys::EventTarget,
    event: &'static str,
    closure: Rc<Closure<dyn FnMut(web_sys::Event)>>,
}

#[cfg(target_arch = "wasm32")]
impl EventListener {
    fn attach(
        target: web_sys::EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Option<Self> {
        let closure = Rc::new(Closure::wrap(
            Box::new(handler) as Box<dyn FnMut(web_sys::Event)>
        ));
        target
            .add_event_listener_with_callback(event, closure.as_ref().as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            target,
            event,
            closure,
        })
    }

    fn detach(&self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.closure.as_ref().as_ref().unchecked_ref(),
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn use_listener(
    target: impl FnOnce() -> Option<web_sys::EventTarget>,
    event: &'static str,
    handler: impl FnMut(web_sys::Event) + 'static,
) {
    let listener = use_hook(move || {
        let attached = target().and_then(|target| EventListener::attach(target, event, handler));
        Rc::new(attached)
    });
    use_drop(move || {
        if let Some(listener) = listener.as_ref() {
            listener.detach();
        }
    });
}

/// The handler runs outside the Dioxus runtime, so it should only write signals.
#[cfg(target_arch = "wasm32")]
pub fn use_window_listener(event: &'static str, handler: impl FnMut(web_sys::Event) + 'static) {
    use_listener(
        || web_sys::window().map(|window| window.unchecked_into()),
        event,
        handler,
    );
}

#[cfg(not(target_arch = "wasm32"))]
pub fn use_window_listener(_event: &'static str, _handler: impl FnMut(web_sys::Event) + 'static) {}

#[cfg(target_arch = "wasm32")]
pub fn use_document_listener(event: &'static str, handler: impl FnMut(web_sys::Event) + 'static) {
    use_listener(
        || {
            web_sys::window()
                .and_then(|window| window.document())
                .map(|document| document.unchecked_into())
        },
        event,
        handler,
    );
}

#[cfg(not(target_arch = "wasm32"))]
pub fn use_document_listener(_event: &'static str, _handler: impl FnMut(web_sys::Event) + 'static) {}

#[cfg(target_arch = "wasm32")]
fn document() -> Result<web_sys::Document, SiteError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or(SiteError::MissingElement("document"))
}

#[cfg(target_arch = "wasm32")]
pub fn element_by_id(id: &str) -> Option<web_sys::HtmlElement> {
    document()
        .ok()?
        .get_element_by_id(id)?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()
}

#[cfg(target_arch = "wasm32")]
pub async fn copy_text(text: &str) -> Result<(), SiteError> {
    let window = web_sys::window().ok_or(SiteError::MissingElement("window"))?;
    let promise = window.navigator().clipboard().write_text(text);
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|err| SiteError::Clipboard(js_error(err)))
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn copy_text(_text: &str) -> Result<(), SiteError> {
    Err(SiteError::Clipboard("clipboard requires a browser".to_string()))
}

#[cfg(target_arch = "wasm32")]
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn alert(message: &str) {
    tracing::warn!("alert: {message}");
}

#[cfg(target_arch = "wasm32")]
pub fn current_href() -> Option<String> {
    web_sys::window()?.location().href().ok()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_href() -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
pub fn current_hash() -> String {
    web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_hash() -> String {
    String::new()
}

#[cfg(target_arch = "wasm32")]
pub fn replace_url(url: &str) -> Result<(), SiteError> {
    let window = web_sys::window().ok_or(SiteError::MissingElement("window"))?;
    let history = window.history().map_err(|err| SiteError::Url(js_error(err)))?;
    history
        .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url))
        .map_err(|err| SiteError::Url(js_error(err)))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn replace_url(_url: &str) -> Result<(), SiteError> {
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub fn push_hash(hash: &str) -> Result<(), SiteError> {
    let window = web_sys::window().ok_or(SiteError::MissingElement("window"))?;
    let history = window.history().map_err(|err| SiteError::Url(js_error(err)))?;
    history
        .push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(hash))
        .map_err(|err| SiteError::Url(js_error(err)))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn push_hash(_hash: &str) -> Result<(), SiteError> {
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|window| window.inner_width().ok())
        .and_then(|width| width.as_f64())
        .unwrap_or(1024.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn viewport_width() -> f64 {
    1024.0
}

#[cfg(target_arch = "wasm32")]
pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .is_some_and(|query| query.matches())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn prefers_reduced_motion() -> bool {
    false
}

#[cfg(target_arch = "wasm32")]
pub fn user_agent() -> String {
    web_sys::window()
        .and_then(|window| window.navigator().user_agent().ok())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn user_agent() -> String {
    String::new()
}

#[cfg(target_arch = "wasm32")]
pub fn open_popup(url: &str, features: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.open_with_url_and_target_and_features(url, "_blank", features);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn open_popup(url: &str, _features: &str) {
    tracing::debug!("share: would open {url}");
}

#[cfg(target_arch = "wasm32")]
pub fn lock_body_scroll(locked: bool) {
    let Some(body) = document().ok().and_then(|document| document.body()) else {
        return;
    };
    let _ = body
        .style()
        .set_property("overflow", if locked { "hidden" } else { "" });
}

#[cfg(not(target_arch = "wasm32"))]
pub fn lock_body_scroll(_locked: bool) {}

#[cfg(target_arch = "wasm32")]
pub fn focus_by_id(id: &str) {
    if let Some(element) = element_by_id(id) {
        let _ = element.focus();
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn focus_by_id(_id: &str) {}

#[cfg(target_arch = "wasm32")]
pub fn header_height() -> f64 {
    document()
        .ok()
        .and_then(|document| document.query_selector("header").ok().flatten())
        .and_then(|header| header.dyn_into::<web_sys::HtmlElement>().ok())
        .map(|header| f64::from(header.offset_height()))
        .filter(|height| *height > 0.0)
        .unwrap_or(HEADER_FALLBACK_PX)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn header_height() -> f64 {
    HEADER_FALLBACK_PX
}

#[cfg(target_arch = "wasm32")]
pub fn scroll_below_header(id: &str) -> Result<(), SiteError> {
    let window = web_sys::window().ok_or(SiteError::MissingElement("window"))?;
    let target = element_by_id(id).ok_or(SiteError::MissingElement("scroll target"))?;
    let top = crate::nav::scroll_offset(
        target.get_bounding_client_rect().top(),
        window.page_y_offset().unwrap_or(0.0),
        header_height(),
    );
    let options = web_sys::ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn scroll_below_header(_id: &str) -> Result<(), SiteError> {
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub fn scroll_into_view(id: &str) {
    if let Some(element) = element_by_id(id) {
        let options = web_sys::ScrollIntoViewOptions::new();
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        options.set_block(web_sys::ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn scroll_into_view(_id: &str) {}
