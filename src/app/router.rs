use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::actions;
use crate::app::dialog::TransferKind;
use crate::app::folder_tree::toggle_folder;
use crate::app::selection::{self, Scope};
use crate::app::state::AppState;
use crate::app::utils::{document, event_element};

/// What the router needs to know about a clicked element.
pub trait Target {
    fn tag_name(&self) -> String;
    fn attr(&self, name: &str) -> Option<String>;
    fn has_class(&self, class: &str) -> bool;
}

impl Target for web_sys::Element {
    fn tag_name(&self) -> String {
        web_sys::Element::tag_name(self)
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    ToggleFolder(String),
    RenameFolder(String),
    DeleteFolder(String),
    DeleteFile(String),
    CopyFile(String),
    MoveFile(String),
    SelectAll(Scope),
    DeleteSelected(Scope),
    MoveSelected(Scope),
    CopySelected(Scope),
}

enum Matcher {
    /// `tag[attr]`; the attribute carries the identifier.
    TagWithAttr(&'static str, &'static str),
    /// `.class`; an optional `data-folder-id` scopes the selection.
    Class(&'static str),
}

struct Rule {
    matcher: Matcher,
    build: fn(Option<String>) -> Option<Action>,
}

const FOLDER_SCOPE_ATTR: &str = "data-folder-id";

const RULES: &[Rule] = &[
    Rule {
        matcher: Matcher::TagWithAttr("strong", "data-folder-id"),
        build: |id| id.map(Action::ToggleFolder),
    },
    Rule {
        matcher: Matcher::TagWithAttr("button", "data-rename-folder"),
        build: |id| id.map(Action::RenameFolder),
    },
    Rule {
        matcher: Matcher::TagWithAttr("button", "data-delete-folder"),
        build: |id| id.map(Action::DeleteFolder),
    },
    Rule {
        matcher: Matcher::TagWithAttr("button", "data-delete-file"),
        build: |id| id.map(Action::DeleteFile),
    },
    Rule {
        matcher: Matcher::TagWithAttr("button", "data-copy-file"),
        build: |id| id.map(Action::CopyFile),
    },
    Rule {
        matcher: Matcher::TagWithAttr("button", "data-move-file"),
        build: |id| id.map(Action::MoveFile),
    },
    Rule {
        matcher: Matcher::Class("select-all-files"),
        build: |id| Some(Action::SelectAll(Scope::from_attr(id))),
    },
    Rule {
        matcher: Matcher::Class("delete-selected-btn"),
        build: |id| Some(Action::DeleteSelected(Scope::from_attr(id))),
    },
    Rule {
        matcher: Matcher::Class("move-selected-btn"),
        build: |id| Some(Action::MoveSelected(Scope::from_attr(id))),
    },
    Rule {
        matcher: Matcher::Class("copy-selected-btn"),
        build: |id| Some(Action::CopySelected(Scope::from_attr(id))),
    },
];

/// The first matching rule decides; a match with an empty id is dropped.
pub fn route<T: Target>(target: &T) -> Option<Action> {
    let non_empty = |name: &str| target.attr(name).filter(|v| !v.is_empty());
    RULES.iter().find_map(|rule| match rule.matcher {
        Matcher::TagWithAttr(tag, attr) => {
            if target.tag_name().eq_ignore_ascii_case(tag) && target.attr(attr).is_some() {
                Some((rule.build)(non_empty(attr)))
            } else {
                None
            }
        }
        Matcher::Class(class) => target.has_class(class).then(|| (rule.build)(non_empty(FOLDER_SCOPE_ATTR))),
    })?
}

fn dispatch(state: AppState, action: Action, element: &web_sys::Element) {
    web_sys::console::log_1(&format!("[Router] {:?}", action).into());
    match action {
        Action::ToggleFolder(id) => toggle_folder(&id),
        Action::RenameFolder(id) => actions::rename_folder(state, &id),
        Action::DeleteFolder(id) => actions::delete_folder(state, &id),
        Action::DeleteFile(id) => actions::delete_file(state, &id),
        Action::CopyFile(id) => actions::transfer_file(state, TransferKind::Copy, &id),
        Action::MoveFile(id) => actions::transfer_file(state, TransferKind::Move, &id),
        Action::SelectAll(scope) => {
            let checked = element
                .dyn_ref::<web_sys::HtmlInputElement>()
                .map(|input| input.checked())
                .unwrap_or(false);
            selection::set_all(&scope, checked);
        }
        Action::DeleteSelected(scope) => actions::delete_selected(state, &scope),
        Action::MoveSelected(scope) => actions::transfer_selected(state, TransferKind::Move, &scope),
        Action::CopySelected(scope) => actions::transfer_selected(state, TransferKind::Copy, &scope),
    }
}

/// Installs the single delegated click listener on `<body>`.
pub fn install(state: AppState) {
    let Some(body) = document().and_then(|d| d.body()) else {
        web_sys::console::error_1(&"[Router] no document body".into());
        return;
    };

    let on_click = Closure::<dyn FnMut(_)>::new(move |ev: web_sys::MouseEvent| {
        let Some(element) = event_element(&ev) else { return };
        if let Some(action) = route(&element) {
            dispatch(state, action, &element);
        }
    });
    let _ = body.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    on_click.forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeElement {
        tag: String,
        attrs: HashMap<String, String>,
        classes: Vec<String>,
    }

    impl FakeElement {
        fn new(tag: &str) -> Self {
            Self { tag: tag.to_uppercase(), ..Default::default() }
        }

        fn with_attr(mut self, name: &str, value: &str) -> Self {
            self.attrs.insert(name.to_string(), value.to_string());
            self
        }

        fn with_class(mut self, class: &str) -> Self {
            self.classes.push(class.to_string());
            self
        }
    }

    impl Target for FakeElement {
        fn tag_name(&self) -> String {
            self.tag.clone()
        }

        fn attr(&self, name: &str) -> Option<String> {
            self.attrs.get(name).cloned()
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.iter().any(|c| c == class)
        }
    }

    #[test]
    fn folder_label_toggles() {
        let el = FakeElement::new("strong").with_attr("data-folder-id", "7");
        assert_eq!(route(&el), Some(Action::ToggleFolder("7".into())));
    }

    #[test]
    fn folder_id_on_other_tags_does_not_toggle() {
        let el = FakeElement::new("span").with_attr("data-folder-id", "7");
        assert_eq!(route(&el), None);
    }

    #[test]
    fn buttons_route_by_data_attribute() {
        let cases = [
            ("data-rename-folder", Action::RenameFolder("4".into())),
            ("data-delete-folder", Action::DeleteFolder("4".into())),
            ("data-delete-file", Action::DeleteFile("4".into())),
            ("data-copy-file", Action::CopyFile("4".into())),
            ("data-move-file", Action::MoveFile("4".into())),
        ];
        for (attr, expected) in cases {
            let el = FakeElement::new("button").with_attr(attr, "4");
            assert_eq!(route(&el), Some(expected));
        }
    }

    #[test]
    fn empty_identifier_is_ignored() {
        let el = FakeElement::new("button").with_attr("data-delete-file", "");
        assert_eq!(route(&el), None);
    }

    #[test]
    fn first_matching_rule_wins() {
        let el = FakeElement::new("button").with_attr("data-delete-folder", "1").with_attr("data-delete-file", "2");
        assert_eq!(route(&el), Some(Action::DeleteFolder("1".into())));
    }

    #[test]
    fn bulk_buttons_scope_by_folder() {
        let el = FakeElement::new("button").with_class("delete-selected-btn").with_attr("data-folder-id", "7");
        assert_eq!(route(&el), Some(Action::DeleteSelected(Scope::Folder("7".into()))));
    }

    #[test]
    fn bulk_buttons_without_folder_cover_the_page() {
        let el = FakeElement::new("button").with_class("copy-selected-btn");
        assert_eq!(route(&el), Some(Action::CopySelected(Scope::Page)));
    }

    #[test]
    fn select_all_checkbox_routes() {
        let el = FakeElement::new("input").with_class("select-all-files").with_attr("data-folder-id", "3");
        assert_eq!(route(&el), Some(Action::SelectAll(Scope::Folder("3".into()))));
    }

    #[test]
    fn inline_handlers_are_not_parsed() {
        let el = FakeElement::new("button").with_attr("onclick", "deleteFile('9')");
        assert_eq!(route(&el), None);
    }

    #[test]
    fn unrelated_clicks_are_ignored() {
        assert_eq!(route(&FakeElement::new("div").with_class("file-row")), None);
    }
}
