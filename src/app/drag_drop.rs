use leptos::task::spawn_local;
use leptos_dragdrop::{bind_dropzone, dropped_files, suppress_window_drops, DragSession};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::api::{self, FailurePolicy};
use crate::app::state::AppState;
use crate::app::types::FileFolderArgs;
use crate::app::utils::{document, event_element, non_empty_attr, query_all, query_document};

/// Draggable file rows carry their id here.
pub const DRAG_SOURCE_ATTR: &str = "data-file-id";
/// Folder targets for moving an already uploaded file.
pub const DROP_TARGET_ATTR: &str = "data-drop-folder-id";
/// Page-wide upload zone feeding the generic upload form.
pub const PAGE_DROPZONE: &str = ".upload-dropzone";
/// Per-folder upload zones, bound directly since fragments replace them.
pub const FOLDER_DROPZONE: &str = ".dropzone-folder-upload";

const UPLOADING_PLACEHOLDER: &str = "<span style=\"color:#1976d2;\">Uploading...</span>";

fn closest(el: &web_sys::Element, selector: &str) -> Option<web_sys::Element> {
    el.closest(selector).ok().flatten()
}

/// Folder id of the drop target under the pointer, if any.
fn drop_target(ev: &web_sys::DragEvent) -> Option<String> {
    let el = closest(&event_element(ev)?, &format!("[{}]", DROP_TARGET_ATTR))?;
    non_empty_attr(&el, DROP_TARGET_ATTR)
}

pub fn move_request(session: &DragSession, folder_id: &str) -> FileFolderArgs {
    FileFolderArgs { file_id: session.file_id.clone(), folder_id: folder_id.to_string() }
}

/// Window defaults plus the delegated file → folder move flow on `<body>`.
pub fn setup_drag_drop(state: AppState) {
    let Some(win) = web_sys::window() else { return };
    suppress_window_drops(&win);

    let Some(doc) = document() else { return };
    let Some(body) = doc.body() else { return };

    let on_dragstart = Closure::<dyn FnMut(_)>::new(move |ev: web_sys::DragEvent| {
        let Some(source) = event_element(&ev).and_then(|el| closest(&el, &format!("[{}]", DRAG_SOURCE_ATTR))) else {
            return;
        };
        let Some(file_id) = non_empty_attr(&source, DRAG_SOURCE_ATTR) else { return };
        let session = DragSession::new(file_id);
        match ev.data_transfer().map(|dt| session.write_to(&dt)) {
            Some(Ok(())) => web_sys::console::log_1(&format!("[DragDrop] start file {}", session.file_id).into()),
            _ => web_sys::console::warn_1(&"[DragDrop] could not record drag session".into()),
        }
    });
    let _ = body.add_event_listener_with_callback("dragstart", on_dragstart.as_ref().unchecked_ref());
    on_dragstart.forget();

    let on_dragover = Closure::<dyn FnMut(_)>::new(move |ev: web_sys::DragEvent| {
        if drop_target(&ev).is_some() {
            ev.prevent_default();
        }
    });
    let _ = body.add_event_listener_with_callback("dragover", on_dragover.as_ref().unchecked_ref());
    on_dragover.forget();

    let on_drop = Closure::<dyn FnMut(_)>::new(move |ev: web_sys::DragEvent| {
        let Some(folder_id) = drop_target(&ev) else { return };
        ev.prevent_default();
        let Some(session) = ev.data_transfer().and_then(|dt| DragSession::read_from(&dt)) else {
            web_sys::console::log_1(&"[DragDrop] drop without a file session, ignored".into());
            return;
        };
        web_sys::console::log_1(&format!("[DragDrop] move file {} -> folder {}", session.file_id, folder_id).into());
        let args = move_request(&session, &folder_id);
        let config = state.config();
        spawn_local(async move {
            let outcome = api::post_json(&config, &config.endpoints.move_file, &args).await;
            api::commit("Move", FailurePolicy::Silent, outcome);
        });
    });
    let _ = body.add_event_listener_with_callback("drop", on_drop.as_ref().unchecked_ref());
    on_drop.forget();

    for zone in query_document(PAGE_DROPZONE) {
        bind_page_dropzone(&zone);
    }
    bind_folder_dropzones(state, None);
}

fn bind_page_dropzone(zone: &web_sys::Element) {
    let on_drop = Closure::<dyn FnMut(_)>::new(move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        let files = ev.data_transfer().map(|dt| dropped_files(&dt)).unwrap_or_default();
        if let Err(e) = submit_upload_form(&files) {
            web_sys::console::error_1(&format!("[DragDrop] upload form: {:?}", e).into());
        }
    });
    let _ = zone.add_event_listener_with_callback("dragover", allow_drop().unchecked_ref());
    let _ = zone.add_event_listener_with_callback("drop", on_drop.as_ref().unchecked_ref());
    on_drop.forget();
}

fn allow_drop() -> JsValue {
    Closure::<dyn FnMut(_)>::new(|ev: web_sys::DragEvent| ev.prevent_default()).into_js_value()
}

/// Hands dropped files to the page's upload form and submits it.
fn submit_upload_form(files: &[web_sys::File]) -> Result<(), JsValue> {
    let doc = document().ok_or_else(|| JsValue::from_str("no document"))?;
    let form = doc
        .query_selector("form[enctype]")?
        .and_then(|el| el.dyn_into::<web_sys::HtmlFormElement>().ok())
        .ok_or_else(|| JsValue::from_str("no upload form"))?;
    let input = form
        .query_selector("input[type='file']")?
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
        .ok_or_else(|| JsValue::from_str("no file input"))?;

    let transfer = web_sys::DataTransfer::new()?;
    for file in files {
        transfer.items().add_with_file(file)?;
    }
    input.set_files(transfer.files().as_ref());
    web_sys::console::log_1(&format!("[DragDrop] submitting upload form with {} files", files.len()).into());
    form.submit()
}

/// Binds every folder dropzone under `root`, or the whole document.
pub fn bind_folder_dropzones(state: AppState, root: Option<&web_sys::Element>) {
    let zones = match root {
        Some(root) => query_all(root, FOLDER_DROPZONE),
        None => query_document(FOLDER_DROPZONE),
    };
    for zone in zones {
        bind_dropzone(&zone, move |zone, files| upload_to_folder(state, zone, files));
    }
}

fn upload_to_folder(state: AppState, zone: &web_sys::Element, files: Vec<web_sys::File>) {
    if files.is_empty() {
        return;
    }
    let Some(folder_id) = non_empty_attr(zone, "data-folder-id") else {
        web_sys::console::warn_1(&"[DragDrop] folder dropzone without data-folder-id".into());
        return;
    };
    let form = match web_sys::FormData::new() {
        Ok(form) => form,
        Err(e) => {
            web_sys::console::error_1(&format!("[DragDrop] FormData: {:?}", e).into());
            return;
        }
    };
    for file in &files {
        if let Err(e) = form.append_with_blob("files", file) {
            web_sys::console::error_1(&format!("[DragDrop] append {}: {:?}", file.name(), e).into());
        }
    }
    zone.set_inner_html(UPLOADING_PLACEHOLDER);
    web_sys::console::log_1(&format!("[DragDrop] uploading {} files to folder {}", files.len(), folder_id).into());

    let config = state.config();
    spawn_local(async move {
        let url = config.endpoints.upload_to(&folder_id);
        let outcome = api::post_form(&config, &url, &form).await;
        api::commit("Upload", FailurePolicy::Silent, outcome);
    });
}
