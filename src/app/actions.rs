use leptos::task::spawn_local;

use crate::app::api::{self, FailurePolicy};
use crate::app::dialog::{self, Payload, TransferKind};
use crate::app::selection::{selected_file_ids, Scope};
use crate::app::state::AppState;
use crate::app::types::{FileArgs, FileIdsArgs, FolderArgs, RenameFolderArgs};
use crate::app::utils::{alert, confirm, prompt};

pub const NOTHING_SELECTED: &str = "No files selected.";

/// A rename only goes out when the prompt returned a non-empty name.
pub fn rename_request(folder_id: &str, answer: Option<String>) -> Option<RenameFolderArgs> {
    answer
        .filter(|name| !name.is_empty())
        .map(|name| RenameFolderArgs { folder_id: folder_id.to_string(), name })
}

/// Gate for every bulk action: an empty selection never reaches the network.
pub fn require_selection(ids: Vec<String>) -> Result<Vec<String>, &'static str> {
    if ids.is_empty() {
        Err(NOTHING_SELECTED)
    } else {
        Ok(ids)
    }
}

pub fn rename_folder(state: AppState, folder_id: &str) {
    let Some(args) = rename_request(folder_id, prompt("Enter new folder name:")) else {
        return;
    };
    let config = state.config();
    spawn_local(async move {
        let outcome = api::post_json(&config, &config.endpoints.rename_folder, &args).await;
        api::commit("Rename", FailurePolicy::AlertOnFailure, outcome);
    });
}

pub fn delete_folder(state: AppState, folder_id: &str) {
    if !confirm("Delete this folder and its contents?") {
        return;
    }
    let args = FolderArgs { folder_id: folder_id.to_string() };
    let config = state.config();
    spawn_local(async move {
        let outcome = api::post_json(&config, &config.endpoints.delete_folder, &args).await;
        api::commit("Delete", FailurePolicy::AlertOnFailure, outcome);
    });
}

pub fn delete_file(state: AppState, file_id: &str) {
    if !confirm("Delete this file?") {
        return;
    }
    let args = FileArgs { file_id: file_id.to_string() };
    let config = state.config();
    spawn_local(async move {
        let outcome = api::post_json(&config, &config.endpoints.delete_file, &args).await;
        api::commit("Delete", FailurePolicy::AlertOnFailure, outcome);
    });
}

pub fn transfer_file(state: AppState, kind: TransferKind, file_id: &str) {
    dialog::open_for(state, kind, Payload::One(file_id.to_string()));
}

fn selection_or_alert(scope: &Scope) -> Option<Vec<String>> {
    match require_selection(selected_file_ids(scope)) {
        Ok(ids) => Some(ids),
        Err(message) => {
            alert(message);
            None
        }
    }
}

pub fn delete_selected(state: AppState, scope: &Scope) {
    let Some(file_ids) = selection_or_alert(scope) else { return };
    if !confirm("Delete selected files?") {
        return;
    }
    web_sys::console::log_1(&format!("[Actions] delete {} files in {:?}", file_ids.len(), scope).into());
    let args = FileIdsArgs { file_ids };
    let config = state.config();
    spawn_local(async move {
        let outcome = api::post_json(&config, &config.endpoints.delete_multiple_files, &args).await;
        api::commit("Delete", FailurePolicy::AlertOnFailure, outcome);
    });
}

pub fn transfer_selected(state: AppState, kind: TransferKind, scope: &Scope) {
    let Some(file_ids) = selection_or_alert(scope) else { return };
    dialog::open_for(state, kind, Payload::Many(file_ids));
}
