use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// MIME type the drag session travels under. Browsers only expose the
/// payload on `drop`, so `dragover` handlers can only check the type list.
pub const SESSION_MIME: &str = "application/x-filedesk-file";

/// Class toggled on a dropzone while files hover over it.
pub const DRAGOVER_CLASS: &str = "dragover";

/// The file currently being dragged inside the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession {
    pub file_id: String,
}

impl DragSession {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self { file_id: file_id.into() }
    }

    pub fn encode(&self) -> String {
        self.file_id.clone()
    }

    pub fn decode(raw: &str) -> Option<Self> {
        let id = raw.trim();
        if id.is_empty() {
            None
        } else {
            Some(Self::new(id))
        }
    }

    pub fn write_to(&self, transfer: &web_sys::DataTransfer) -> Result<(), JsValue> {
        transfer.set_data(SESSION_MIME, &self.encode())?;
        transfer.set_effect_allowed("move");
        Ok(())
    }

    /// Reads the session back on drop. External file drops carry no session.
    pub fn read_from(transfer: &web_sys::DataTransfer) -> Option<Self> {
        transfer
            .get_data(SESSION_MIME)
            .ok()
            .and_then(|raw| Self::decode(&raw))
    }
}

/// Files dropped from outside the page, in drop order.
pub fn dropped_files(transfer: &web_sys::DataTransfer) -> Vec<web_sys::File> {
    let Some(list) = transfer.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

pub fn set_dragover(zone: &web_sys::Element, active: bool) {
    let classes = zone.class_list();
    let _ = if active {
        classes.add_1(DRAGOVER_CLASS)
    } else {
        classes.remove_1(DRAGOVER_CLASS)
    };
}

/// Attaches dragover/dragleave/drop listeners to one dropzone element.
/// `on_drop` receives the zone and the dropped files; the hover class is
/// cleared before it runs.
pub fn bind_dropzone<F>(zone: &web_sys::Element, on_drop: F)
where
    F: Fn(&web_sys::Element, Vec<web_sys::File>) + 'static,
{
    let over_zone = zone.clone();
    let on_dragover = Closure::<dyn FnMut(_)>::new(move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_dragover(&over_zone, true);
    });
    let _ = zone.add_event_listener_with_callback("dragover", on_dragover.as_ref().unchecked_ref());
    on_dragover.forget();

    let leave_zone = zone.clone();
    let on_dragleave = Closure::<dyn FnMut(_)>::new(move |_ev: web_sys::DragEvent| {
        set_dragover(&leave_zone, false);
    });
    let _ = zone.add_event_listener_with_callback("dragleave", on_dragleave.as_ref().unchecked_ref());
    on_dragleave.forget();

    let drop_zone = zone.clone();
    let on_drop_cb = Closure::<dyn FnMut(_)>::new(move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_dragover(&drop_zone, false);
        let files = ev.data_transfer().map(|dt| dropped_files(&dt)).unwrap_or_default();
        on_drop(&drop_zone, files);
    });
    let _ = zone.add_event_listener_with_callback("drop", on_drop_cb.as_ref().unchecked_ref());
    on_drop_cb.forget();
}

/// Stops the browser from navigating to files dropped outside any target.
pub fn suppress_window_drops(window: &web_sys::Window) {
    for name in ["dragover", "drop"] {
        let cb = Closure::<dyn FnMut(_)>::new(move |ev: web_sys::Event| {
            ev.prevent_default();
        });
        let _ = window.add_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
        cb.forget();
    }
}
