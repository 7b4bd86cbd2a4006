use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::api;
use crate::app::drag_drop::bind_folder_dropzones;
use crate::app::state::AppState;
use crate::app::utils::{document, event_element, non_empty_attr, query_all};

pub const LIST_PANEL_ID: &str = "folder-list-panel";
pub const DETAIL_PANEL_ID: &str = "folder-detail-panel";
pub const LIST_ITEM: &str = ".folder-list-item";
const SELECTED_CLASS: &str = "selected";
const LOAD_ERROR_HTML: &str = "<div style=\"color:#888;\">Could not load folder details.</div>";

/// Detail loads in flight. Only the newest one may render.
#[derive(Clone, Copy)]
pub struct DetailRequests {
    latest: StoredValue<u32>,
}

impl DetailRequests {
    pub fn new() -> Self {
        Self { latest: StoredValue::new(0) }
    }

    /// Starts a request; every older generation goes stale.
    pub fn begin(&self) -> u32 {
        self.latest.update_value(|g| *g = g.wrapping_add(1));
        self.latest.get_value()
    }

    pub fn is_current(&self, generation: u32) -> bool {
        self.latest.get_value() == generation
    }
}

/// Wires the two-pane dashboard: a click in the folder list loads that
/// folder's detail fragment. Pages without both panels are left alone.
pub fn init_folder_panels(state: AppState) {
    let Some(doc) = document() else { return };
    let (Some(list_panel), Some(detail_panel)) =
        (doc.get_element_by_id(LIST_PANEL_ID), doc.get_element_by_id(DETAIL_PANEL_ID))
    else {
        return;
    };

    let panel = list_panel.clone();
    let on_click = Closure::<dyn FnMut(_)>::new(move |ev: web_sys::MouseEvent| {
        let Some(item) = event_element(&ev).and_then(|el| el.closest(LIST_ITEM).ok().flatten()) else {
            return;
        };
        for other in query_all(&panel, LIST_ITEM) {
            let _ = other.class_list().remove_1(SELECTED_CLASS);
        }
        let _ = item.class_list().add_1(SELECTED_CLASS);

        let Some(folder_id) = non_empty_attr(&item, "data-folder-id") else {
            web_sys::console::warn_1(&"[Panel] folder list item without data-folder-id".into());
            return;
        };
        load_detail(state, detail_panel.clone(), folder_id);
    });
    let _ = list_panel.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    on_click.forget();
}

fn load_detail(state: AppState, detail_panel: web_sys::Element, folder_id: String) {
    let generation = state.detail_requests.begin();
    let url = state.endpoints().detail_of(&folder_id);

    spawn_local(async move {
        let fragment = match api::get_text(&url).await {
            Ok(reply) if reply.ok => Some(reply.body),
            Ok(reply) => {
                web_sys::console::error_1(&format!("[Panel] {} returned {}", url, reply.status).into());
                None
            }
            Err(e) => {
                web_sys::console::error_1(&format!("[Panel] {} failed: {}", url, e).into());
                None
            }
        };

        if !state.detail_requests.is_current(generation) {
            web_sys::console::log_1(&format!("[Panel] dropping stale detail for folder {}", folder_id).into());
            return;
        }

        match fragment {
            Some(html) => {
                detail_panel.set_inner_html(&html);
                // innerHTML replacement drops listeners on the old dropzones
                bind_folder_dropzones(state, Some(&detail_panel));
                web_sys::console::log_1(&format!("[Panel] folder {} loaded", folder_id).into());
            }
            None => detail_panel.set_inner_html(LOAD_ERROR_HTML),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn older_request_goes_stale() {
        let owner = Owner::new();
        owner.set();
        let requests = DetailRequests::new();

        let first = requests.begin();
        assert!(requests.is_current(first));
        let second = requests.begin();

        assert!(!requests.is_current(first));
        assert!(requests.is_current(second));
    }

    #[test]
    fn generations_wrap_instead_of_overflowing() {
        let owner = Owner::new();
        owner.set();
        let requests = DetailRequests { latest: StoredValue::new(u32::MAX) };

        let next = requests.begin();
        assert_eq!(next, 0);
        assert!(requests.is_current(next));
    }
}
