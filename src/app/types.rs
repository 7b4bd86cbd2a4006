use serde::{Deserialize, Deserializer, Serialize};

/// One entry of `/folder-list-json/`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FolderOption {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub name: String,
}

// Server ids are integers today, but this layer treats them as opaque text.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

pub fn parse_folder_list(body: &str) -> Result<Vec<FolderOption>, serde_json::Error> {
    serde_json::from_str(body)
}

/// `{"status": "error", "message": ...}` replies sent with a 200.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StatusReply {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusReply {
    pub fn error_message(body: &str) -> Option<String> {
        let reply: StatusReply = serde_json::from_str(body).ok()?;
        if reply.status != "error" {
            return None;
        }
        Some(reply.message.unwrap_or_else(|| "The server rejected the request.".to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FileFolderArgs {
    pub file_id: String,
    pub folder_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FilesFolderArgs {
    pub file_ids: Vec<String>,
    pub folder_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenameFolderArgs {
    pub folder_id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FolderArgs {
    pub folder_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FileArgs {
    pub file_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FileIdsArgs {
    pub file_ids: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TransferArgs {
    One(FileFolderArgs),
    Many(FilesFolderArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_list_accepts_numeric_ids() {
        let folders = parse_folder_list(r#"[{"id":1,"name":"Docs"},{"id":2,"name":"Images"}]"#).unwrap();
        let pairs: Vec<(&str, &str)> = folders.iter().map(|f| (f.id.as_str(), f.name.as_str())).collect();
        assert_eq!(pairs, vec![("1", "Docs"), ("2", "Images")]);
    }

    #[test]
    fn folder_list_accepts_string_ids() {
        let folders = parse_folder_list(r#"[{"id":"a9","name":"Raw"}]"#).unwrap();
        assert_eq!(folders[0].id, "a9");
    }

    #[test]
    fn move_body_matches_backend_shape() {
        let body = FileFolderArgs { file_id: "42".into(), folder_id: "7".into() };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"file_id":"42","folder_id":"7"}"#);
    }

    #[test]
    fn bulk_delete_body_lists_ids() {
        let body = FileIdsArgs { file_ids: vec!["3".into(), "5".into()] };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"file_ids":["3","5"]}"#);
    }

    #[test]
    fn transfer_args_serialize_without_a_tag() {
        let many = TransferArgs::Many(FilesFolderArgs { file_ids: vec!["1".into()], folder_id: "2".into() });
        assert_eq!(serde_json::to_string(&many).unwrap(), r#"{"file_ids":["1"],"folder_id":"2"}"#);
    }

    #[test]
    fn error_envelope_yields_its_message() {
        let body = r#"{"status":"error","message":"Cannot move .png file to folder (allowed: .csv)"}"#;
        assert_eq!(
            StatusReply::error_message(body).as_deref(),
            Some("Cannot move .png file to folder (allowed: .csv)")
        );
    }

    #[test]
    fn success_and_plain_bodies_are_not_errors() {
        assert_eq!(StatusReply::error_message(r#"{"status":"success"}"#), None);
        assert_eq!(StatusReply::error_message(r#"{"status":"ok"}"#), None);
        assert_eq!(StatusReply::error_message("OK"), None);
    }
}
