use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::config::Config;

pub fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

pub fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}

/// `false` when the user dismisses the dialog or no window exists.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn prompt(message: &str) -> Option<String> {
    web_sys::window().and_then(|w| w.prompt_with_message(message).ok().flatten())
}

pub fn reload() {
    if let Some(win) = web_sys::window() {
        if let Err(e) = win.location().reload() {
            web_sys::console::error_1(&format!("[Page] reload failed: {:?}", e).into());
        }
    }
}

/// Page scrolling is held off while a dialog is up.
pub fn lock_body_scroll(locked: bool) {
    if let Some(body) = document().and_then(|d| d.body()) {
        let _ = body.style().set_property("overflow", if locked { "hidden" } else { "" });
    }
}

/// Elements matching `selector`, in document order.
pub fn query_all(root: &web_sys::Element, selector: &str) -> Vec<web_sys::Element> {
    match root.query_selector_all(selector) {
        Ok(list) => elements_of(&list),
        Err(e) => {
            web_sys::console::error_1(&format!("[Page] bad selector {}: {:?}", selector, e).into());
            Vec::new()
        }
    }
}

pub fn query_document(selector: &str) -> Vec<web_sys::Element> {
    let Some(doc) = document() else {
        return Vec::new();
    };
    match doc.query_selector_all(selector) {
        Ok(list) => elements_of(&list),
        Err(e) => {
            web_sys::console::error_1(&format!("[Page] bad selector {}: {:?}", selector, e).into());
            Vec::new()
        }
    }
}

fn elements_of(list: &web_sys::NodeList) -> Vec<web_sys::Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

pub fn event_element(ev: &web_sys::Event) -> Option<web_sys::Element> {
    ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok())
}

/// Attribute value, with an empty string treated as absent.
pub fn non_empty_attr(el: &web_sys::Element, name: &str) -> Option<String> {
    el.get_attribute(name).filter(|v| !v.is_empty())
}

/// First non-empty of the page global and the hidden form field, else "".
pub fn resolve_csrf(global: Option<String>, field: Option<String>) -> String {
    global
        .filter(|t| !t.is_empty())
        .or_else(|| field.filter(|t| !t.is_empty()))
        .unwrap_or_default()
}

pub fn csrf_token(config: &Config) -> String {
    let global = web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str(&config.csrf_global)).ok())
        .and_then(|v| v.as_string());
    let field = document()
        .and_then(|d| d.query_selector(&format!("input[name=\"{}\"]", config.csrf_field)).ok().flatten())
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.value());
    resolve_csrf(global, field)
}
