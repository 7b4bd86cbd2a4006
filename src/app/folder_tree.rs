use regex::{NoExpand, Regex};
use std::sync::OnceLock;
use wasm_bindgen::JsCast;

use crate::app::utils::document;

pub const CLOSED_ARROW: &str = "\u{25B6}\u{FE0F}";
pub const BARE_CLOSED_ARROW: &str = "\u{25B6}";
pub const OPEN_ARROW: &str = "\u{25BC}";
/// Which closed glyph the label started with, so closing writes it back.
const CLOSED_ARROW_ATTR: &str = "data-closed-arrow";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FolderState {
    Collapsed,
    Expanded,
}

impl FolderState {
    pub fn from_display(display: &str) -> Self {
        if display.trim() == "block" {
            FolderState::Expanded
        } else {
            FolderState::Collapsed
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            FolderState::Collapsed => FolderState::Expanded,
            FolderState::Expanded => FolderState::Collapsed,
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            FolderState::Collapsed => "none",
            FolderState::Expanded => "block",
        }
    }

    pub fn arrow(self, closed: &str) -> &str {
        match self {
            FolderState::Collapsed => closed,
            FolderState::Expanded => OPEN_ARROW,
        }
    }
}

fn leading_arrow() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^(?:\u{25B6}\u{FE0F}?|\u{25BC})").expect("static pattern"))
}

/// The closed glyph `label` starts with, with or without the emoji selector.
pub fn closed_arrow_of(label: &str) -> Option<&'static str> {
    if label.starts_with(CLOSED_ARROW) {
        Some(CLOSED_ARROW)
    } else if label.starts_with(BARE_CLOSED_ARROW) {
        Some(BARE_CLOSED_ARROW)
    } else {
        None
    }
}

/// Replaces an arrow at the very start of `label`; other labels pass through.
/// `closed` is the glyph written when collapsing.
pub fn swap_arrow(label: &str, state: FolderState, closed: &str) -> String {
    leading_arrow().replace(label, NoExpand(state.arrow(closed))).into_owned()
}

pub fn toggle_folder(folder_id: &str) {
    let Some(doc) = document() else { return };
    let Some(list) = doc
        .get_element_by_id(&format!("folder-{}", folder_id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        web_sys::console::warn_1(&format!("[Tree] no file list for folder {}", folder_id).into());
        return;
    };

    let style = list.style();
    let current = FolderState::from_display(&style.get_property_value("display").unwrap_or_default());
    let next = current.toggled();
    let _ = style.set_property("display", next.display());

    if let Some(label) = list.previous_element_sibling() {
        if label.tag_name().eq_ignore_ascii_case("strong") {
            let html = label.inner_html();
            if let Some(glyph) = closed_arrow_of(&html) {
                let _ = label.set_attribute(CLOSED_ARROW_ATTR, glyph);
            }
            let closed = label
                .get_attribute(CLOSED_ARROW_ATTR)
                .and_then(|g| closed_arrow_of(&g))
                .unwrap_or(CLOSED_ARROW);
            label.set_inner_html(&swap_arrow(&html, next, closed));
        }
    }
    web_sys::console::log_1(&format!("[Tree] folder {} -> {:?}", folder_id, next).into());
}
