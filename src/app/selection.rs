use wasm_bindgen::JsCast;

use crate::app::utils::query_document;

pub const FILE_CHECKBOX: &str = ".file-checkbox";

/// Which checkboxes a bulk control acts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scope {
    Folder(String),
    Page,
}

impl Scope {
    pub fn from_attr(folder_id: Option<String>) -> Self {
        folder_id.map(Scope::Folder).unwrap_or(Scope::Page)
    }

    pub fn contains(&self, folder_id: Option<&str>) -> bool {
        match self {
            Scope::Folder(id) => folder_id == Some(id.as_str()),
            Scope::Page => true,
        }
    }
}

/// A file-row checkbox as read from the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckboxState {
    pub folder_id: Option<String>,
    pub file_id: Option<String>,
    pub checked: bool,
}

const FOLDER_ATTR: &str = "data-folder-id";

/// Checked file ids within `scope`, keeping input order.
pub fn checked_ids<'a, I>(boxes: I, scope: &Scope) -> Vec<String>
where
    I: IntoIterator<Item = &'a CheckboxState>,
{
    boxes
        .into_iter()
        .filter(|b| b.checked && scope.contains(b.folder_id.as_deref()))
        .filter_map(|b| b.file_id.clone())
        .collect()
}

/// Folder ids are opaque, so scoping happens here rather than in a selector.
fn scoped_inputs(scope: &Scope) -> Vec<web_sys::HtmlInputElement> {
    query_document(FILE_CHECKBOX)
        .into_iter()
        .filter(|el| scope.contains(el.get_attribute(FOLDER_ATTR).as_deref()))
        .filter_map(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
        .collect()
}

pub fn selected_file_ids(scope: &Scope) -> Vec<String> {
    let boxes: Vec<CheckboxState> = scoped_inputs(scope)
        .iter()
        .map(|input| CheckboxState {
            folder_id: input.get_attribute(FOLDER_ATTR),
            file_id: input.get_attribute("data-file-id"),
            checked: input.checked(),
        })
        .collect();
    checked_ids(&boxes, scope)
}

pub fn set_all(scope: &Scope, checked: bool) {
    let inputs = scoped_inputs(scope);
    web_sys::console::log_1(&format!("[Selection] {:?}: {} boxes -> {}", scope, inputs.len(), checked).into());
    for input in inputs {
        input.set_checked(checked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cb(folder: &str, file: &str, checked: bool) -> CheckboxState {
        CheckboxState { folder_id: Some(folder.into()), file_id: Some(file.into()), checked }
    }

    #[test]
    fn only_checked_boxes_in_scope_in_order() {
        let boxes = vec![cb("7", "3", true), cb("8", "4", true), cb("7", "9", false), cb("7", "5", true)];
        assert_eq!(checked_ids(&boxes, &Scope::Folder("7".into())), vec!["3", "5"]);
    }

    #[test]
    fn page_scope_sees_every_folder() {
        let boxes = vec![cb("7", "3", true), cb("8", "4", true)];
        assert_eq!(checked_ids(&boxes, &Scope::Page), vec!["3", "4"]);
    }

    #[test]
    fn boxes_without_file_id_are_skipped() {
        let boxes = vec![CheckboxState { folder_id: Some("7".into()), file_id: None, checked: true }];
        assert!(checked_ids(&boxes, &Scope::Folder("7".into())).is_empty());
    }

    #[test]
    fn folder_ids_with_quotes_and_backslashes_still_scope() {
        let odd = r#"a"b\c]"#;
        let scope = Scope::from_attr(Some(odd.into()));
        assert_eq!(scope, Scope::Folder(odd.into()));

        let boxes = vec![cb(odd, "1", true), cb("a", "2", true), cb(odd, "3", true)];
        assert_eq!(checked_ids(&boxes, &scope), vec!["1", "3"]);
        assert!(!scope.contains(None));
        assert_eq!(Scope::from_attr(None), Scope::Page);
    }
}
