use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Name of the optional page global carrying overrides for [`Config`].
pub const CONFIG_GLOBAL: &str = "fileDeskConfig";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub move_file: String,
    pub upload_to_folder: String,
    pub folder_list: String,
    pub rename_folder: String,
    pub delete_folder: String,
    pub delete_file: String,
    pub delete_multiple_files: String,
    pub copy_file: String,
    pub copy_multiple_files: String,
    pub move_multiple_files: String,
    pub folder_detail: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            move_file: "/move-file/".to_string(),
            upload_to_folder: "/upload-to-folder/{id}/".to_string(),
            folder_list: "/folder-list-json/".to_string(),
            rename_folder: "/rename-folder/".to_string(),
            delete_folder: "/delete-folder/".to_string(),
            delete_file: "/delete-file/".to_string(),
            delete_multiple_files: "/delete-multiple-files/".to_string(),
            copy_file: "/copy-file/".to_string(),
            copy_multiple_files: "/copy-multiple-files/".to_string(),
            move_multiple_files: "/move-multiple-files/".to_string(),
            folder_detail: "/folder-detail/{id}/".to_string(),
        }
    }
}

impl Endpoints {
    pub fn upload_to(&self, folder_id: &str) -> String {
        self.upload_to_folder.replace("{id}", folder_id)
    }

    pub fn detail_of(&self, folder_id: &str) -> String {
        self.folder_detail.replace("{id}", folder_id)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoints: Endpoints,
    pub csrf_header: String,
    pub csrf_field: String,
    pub csrf_global: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            csrf_header: "X-CSRFToken".to_string(),
            csrf_field: "csrfmiddlewaretoken".to_string(),
            csrf_global: "csrfToken".to_string(),
        }
    }
}

impl Config {
    /// Reads `window.fileDeskConfig` if the page defines it.
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let raw = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).unwrap_or(JsValue::UNDEFINED);
        if raw.is_undefined() || raw.is_null() {
            return Self::default();
        }
        match serde_wasm_bindgen::from_value::<Config>(raw) {
            Ok(config) => {
                web_sys::console::log_1(&format!("[Config] loaded overrides from window.{}", CONFIG_GLOBAL).into());
                config
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("[Config] ignoring window.{}: {}", CONFIG_GLOBAL, e).into());
                Self::default()
            }
        }
    }
}
