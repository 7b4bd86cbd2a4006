//! Destination picker for copy and move, single file or a selection.
//!
//! The dialog lives in the [`AppState`] slot; rendering follows the slot.
//! It is removed by Cancel, or by the page reload that follows a confirm.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::api::{self, FailurePolicy, Settlement};
use crate::app::config::Endpoints;
use crate::app::state::AppState;
use crate::app::types::{FileFolderArgs, FilesFolderArgs, FolderOption, TransferArgs};
use crate::app::utils::{alert, lock_body_scroll};

pub const DIALOG_ID: &str = "destination-modal";

const OVERLAY_STYLE: &str = "position:fixed;top:0;left:0;width:100vw;height:100vh;background:rgba(0,0,0,0.18);z-index:9999;display:flex;align-items:center;justify-content:center;";
const PANEL_STYLE: &str = "background:#fff;padding:1.5em 2em;border-radius:8px;box-shadow:0 2px 12px rgba(0,0,0,0.15);min-width:260px;";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferKind {
    Copy,
    Move,
}

impl TransferKind {
    pub fn label(self) -> &'static str {
        match self {
            TransferKind::Copy => "Copy",
            TransferKind::Move => "Move",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    One(String),
    Many(Vec<String>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DestinationDialog {
    pub kind: TransferKind,
    pub files: Payload,
    pub folders: Vec<FolderOption>,
}

impl DestinationDialog {
    pub fn title(&self) -> &'static str {
        match (self.kind, &self.files) {
            (TransferKind::Copy, Payload::One(_)) => "Copy file to folder:",
            (TransferKind::Move, Payload::One(_)) => "Move file to folder:",
            (TransferKind::Copy, Payload::Many(_)) => "Copy selected files to folder:",
            (TransferKind::Move, Payload::Many(_)) => "Move selected files to folder:",
        }
    }

    /// The browser preselects the first option.
    pub fn default_destination(&self) -> String {
        self.folders.first().map(|f| f.id.clone()).unwrap_or_default()
    }

    pub fn endpoint<'a>(&self, endpoints: &'a Endpoints) -> &'a str {
        match (self.kind, &self.files) {
            (TransferKind::Copy, Payload::One(_)) => &endpoints.copy_file,
            (TransferKind::Move, Payload::One(_)) => &endpoints.move_file,
            (TransferKind::Copy, Payload::Many(_)) => &endpoints.copy_multiple_files,
            (TransferKind::Move, Payload::Many(_)) => &endpoints.move_multiple_files,
        }
    }

    pub fn request(&self, folder_id: String) -> TransferArgs {
        match &self.files {
            Payload::One(file_id) => TransferArgs::One(FileFolderArgs { file_id: file_id.clone(), folder_id }),
            Payload::Many(file_ids) => TransferArgs::Many(FilesFolderArgs { file_ids: file_ids.clone(), folder_id }),
        }
    }
}

pub type DialogSlot = RwSignal<Option<DestinationDialog>>;

/// Puts `dialog` in the slot and hands back whatever it replaced. Dialogs
/// never stack.
pub fn open(slot: DialogSlot, dialog: DestinationDialog) -> Option<DestinationDialog> {
    let previous = slot.get_untracked();
    slot.set(Some(dialog));
    previous
}

pub fn close(slot: DialogSlot) {
    slot.set(None);
}

/// After a confirm. A reload takes the dialog down with the page; otherwise
/// it stays in the slot and `true` means the buttons should come back.
pub fn settle_confirm(slot: DialogSlot, settlement: &Settlement) -> bool {
    !settlement.reload && slot.with_untracked(|d| d.is_some())
}

fn show(slot: DialogSlot, dialog: DestinationDialog) {
    web_sys::console::log_1(&format!("[Dialog] open: {} ({} folders)", dialog.title(), dialog.folders.len()).into());
    if let Some(previous) = open(slot, dialog) {
        web_sys::console::warn_1(&format!("[Dialog] replaced open dialog: {}", previous.title()).into());
    }
}

/// Loads the folder list, then opens the picker.
pub fn open_for(state: AppState, kind: TransferKind, files: Payload) {
    let config = state.config();
    spawn_local(async move {
        match api::fetch_folders(&config).await {
            Ok(folders) if folders.is_empty() => alert("No destination folders available."),
            Ok(folders) => show(state.dialog, DestinationDialog { kind, files, folders }),
            Err(e) => {
                web_sys::console::error_1(&format!("[Dialog] folder list: {}", e).into());
                alert(&format!("Could not load folders: {}", e));
            }
        }
    });
}

#[component]
pub fn DestinationPicker(state: AppState) -> impl IntoView {
    let dialog = state.dialog;
    let (choice, set_choice) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    Effect::new(move |_| {
        let active = dialog.get();
        lock_body_scroll(active.is_some());
        if let Some(d) = active {
            set_choice.set(d.default_destination());
            set_submitting.set(false);
        }
    });

    let cancel = move |_| {
        web_sys::console::log_1(&"[Dialog] cancelled".into());
        close(dialog);
    };

    let confirm = move |_| {
        let Some(active) = dialog.get_untracked() else { return };
        let folder_id = Some(choice.get_untracked())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| active.default_destination());
        set_submitting.set(true);
        let config = state.config();
        spawn_local(async move {
            let url = active.endpoint(&config.endpoints).to_string();
            let body = active.request(folder_id);
            let outcome = api::post_json(&config, &url, &body).await;
            let settlement = api::commit(active.kind.label(), FailurePolicy::Silent, outcome);
            if settle_confirm(dialog, &settlement) {
                web_sys::console::warn_1(&"[Dialog] request failed, dialog stays open".into());
                set_submitting.set(false);
            }
        });
    };

    move || {
        dialog.get().map(|d| {
            let options = d
                .folders
                .iter()
                .map(|f| view! { <option value=f.id.clone()>{f.name.clone()}</option> })
                .collect_view();
            view! {
                <div id=DIALOG_ID style=OVERLAY_STYLE>
                    <div style=PANEL_STYLE>
                        <div style="margin-bottom:1em;">{d.title()}</div>
                        <select
                            id="destination-folder-select"
                            style="width:100%;margin-bottom:1em;"
                            on:change=move |e| set_choice.set(event_target_value(&e))
                        >
                            {options}
                        </select>
                        <button
                            id="destination-confirm-btn"
                            style="margin-right:0.7em;"
                            disabled=submitting
                            on:click=confirm
                        >
                            {d.kind.label()}
                        </button>
                        <button id="destination-cancel-btn" disabled=submitting on:click=cancel>
                            "Cancel"
                        </button>
                    </div>
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::types::parse_folder_list;

    fn folders() -> Vec<FolderOption> {
        parse_folder_list(r#"[{"id":1,"name":"Docs"},{"id":2,"name":"Images"}]"#).unwrap()
    }

    #[test]
    fn one_option_per_folder_in_server_order() {
        let d = DestinationDialog { kind: TransferKind::Copy, files: Payload::One("9".into()), folders: folders() };
        let options: Vec<(String, String)> = d.folders.iter().map(|f| (f.id.clone(), f.name.clone())).collect();
        assert_eq!(options, vec![("1".into(), "Docs".into()), ("2".into(), "Images".into())]);
        assert_eq!(d.default_destination(), "1");
    }

    #[test]
    fn variants_pick_their_endpoint_and_title() {
        let endpoints = Endpoints::default();
        let cases = [
            (TransferKind::Copy, Payload::One("1".into()), "/copy-file/", "Copy file to folder:"),
            (TransferKind::Move, Payload::One("1".into()), "/move-file/", "Move file to folder:"),
            (TransferKind::Copy, Payload::Many(vec!["1".into()]), "/copy-multiple-files/", "Copy selected files to folder:"),
            (TransferKind::Move, Payload::Many(vec!["1".into()]), "/move-multiple-files/", "Move selected files to folder:"),
        ];
        for (kind, files, url, title) in cases {
            let d = DestinationDialog { kind, files, folders: folders() };
            assert_eq!(d.endpoint(&endpoints), url);
            assert_eq!(d.title(), title);
        }
    }

    #[test]
    fn bulk_move_body_carries_ids_and_destination() {
        let d = DestinationDialog {
            kind: TransferKind::Move,
            files: Payload::Many(vec!["3".into(), "5".into()]),
            folders: folders(),
        };
        let body = serde_json::to_string(&d.request("2".into())).unwrap();
        assert_eq!(body, r#"{"file_ids":["3","5"],"folder_id":"2"}"#);
    }

    fn dialog(kind: TransferKind, file_id: &str) -> DestinationDialog {
        DestinationDialog { kind, files: Payload::One(file_id.into()), folders: folders() }
    }

    #[test]
    fn second_open_replaces_the_first() {
        let owner = Owner::new();
        owner.set();
        let slot: DialogSlot = RwSignal::new(None);

        assert_eq!(open(slot, dialog(TransferKind::Copy, "1")), None);
        let replaced = open(slot, dialog(TransferKind::Move, "2"));

        assert_eq!(replaced, Some(dialog(TransferKind::Copy, "1")));
        assert_eq!(slot.get_untracked(), Some(dialog(TransferKind::Move, "2")));
    }

    #[test]
    fn close_empties_the_slot() {
        let owner = Owner::new();
        owner.set();
        let slot: DialogSlot = RwSignal::new(None);

        open(slot, dialog(TransferKind::Copy, "1"));
        close(slot);

        assert_eq!(slot.get_untracked(), None);
    }

    #[test]
    fn failed_confirm_keeps_the_dialog() {
        let owner = Owner::new();
        owner.set();
        let slot: DialogSlot = RwSignal::new(None);
        open(slot, dialog(TransferKind::Move, "7"));

        let failed = Settlement { alert: None, reload: false };
        assert!(settle_confirm(slot, &failed));
        assert_eq!(slot.get_untracked(), Some(dialog(TransferKind::Move, "7")));

        let done = Settlement { alert: None, reload: true };
        assert!(!settle_confirm(slot, &done));
    }

    #[test]
    fn single_copy_body_carries_one_id() {
        let d = DestinationDialog { kind: TransferKind::Copy, files: Payload::One("42".into()), folders: folders() };
        let body = serde_json::to_string(&d.request("1".into())).unwrap();
        assert_eq!(body, r#"{"file_id":"42","folder_id":"1"}"#);
    }
}
