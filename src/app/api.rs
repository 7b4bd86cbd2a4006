use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::app::config::Config;
use crate::app::error::ApiError;
use crate::app::types::{parse_folder_list, FolderOption, StatusReply};
use crate::app::utils::{alert, csrf_token, reload};

/// What came back from a request that reached the server.
#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub ok: bool,
    pub body: String,
}

/// How a non-2xx status is surfaced to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePolicy {
    AlertOnFailure,
    Silent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub alert: Option<String>,
    pub reload: bool,
}

/// Decides what the page does once a mutating request has finished.
pub fn settle(label: &str, policy: FailurePolicy, outcome: &Result<Reply, ApiError>) -> Settlement {
    match outcome {
        Err(e) => Settlement { alert: Some(format!("{} error: {}", label, e)), reload: false },
        Ok(reply) if !reply.ok => Settlement {
            alert: match policy {
                FailurePolicy::AlertOnFailure => Some(format!("{} failed", label)),
                FailurePolicy::Silent => None,
            },
            reload: true,
        },
        Ok(reply) => Settlement { alert: StatusReply::error_message(&reply.body), reload: true },
    }
}

/// Applies [`settle`]: alert first, since `alert` blocks until dismissed.
pub fn commit(label: &str, policy: FailurePolicy, outcome: Result<Reply, ApiError>) -> Settlement {
    match &outcome {
        Ok(reply) => web_sys::console::log_1(&format!("[Api] {} -> {}", label, reply.status).into()),
        Err(e) => web_sys::console::error_1(&format!("[Api] {} failed: {}", label, e).into()),
    }
    let settlement = settle(label, policy, &outcome);
    if let Some(message) = &settlement.alert {
        alert(message);
    }
    if settlement.reload {
        reload();
    }
    settlement
}

async fn send(request: &Request) -> Result<Reply, ApiError> {
    let window = web_sys::window().ok_or(ApiError::NoWindow)?;
    let resp_value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(ApiError::transport)?;
    let resp: Response = resp_value.dyn_into().map_err(ApiError::dom)?;

    // The body only feeds the error envelope check, so an unreadable one is empty.
    let body = match resp.text() {
        Ok(promise) => JsFuture::from(promise).await.ok().and_then(|v| v.as_string()).unwrap_or_default(),
        Err(_) => String::new(),
    };
    Ok(Reply { status: resp.status(), ok: resp.ok(), body })
}

fn post_request(url: &str, body: &JsValue, config: &Config, json: bool) -> Result<Request, ApiError> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(body);

    let req = Request::new_with_str_and_init(url, &opts).map_err(ApiError::dom)?;
    // Multipart bodies must not carry a content type: the browser adds the boundary.
    if json {
        req.headers().set("Content-Type", "application/json").map_err(ApiError::dom)?;
    }
    req.headers().set(&config.csrf_header, &csrf_token(config)).map_err(ApiError::dom)?;
    Ok(req)
}

pub async fn post_json<T: Serialize>(config: &Config, url: &str, body: &T) -> Result<Reply, ApiError> {
    let text = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
    web_sys::console::log_1(&format!("[Api] POST {} {}", url, text).into());
    let req = post_request(url, &JsValue::from_str(&text), config, true)?;
    send(&req).await
}

pub async fn post_form(config: &Config, url: &str, form: &web_sys::FormData) -> Result<Reply, ApiError> {
    web_sys::console::log_1(&format!("[Api] POST {} (multipart)", url).into());
    let req = post_request(url, form.as_ref(), config, false)?;
    send(&req).await
}

pub async fn get_text(url: &str) -> Result<Reply, ApiError> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    let req = Request::new_with_str_and_init(url, &opts).map_err(ApiError::dom)?;
    send(&req).await
}

pub async fn fetch_folders(config: &Config) -> Result<Vec<FolderOption>, ApiError> {
    let reply = get_text(&config.endpoints.folder_list).await?;
    if !reply.ok {
        return Err(ApiError::Decode(format!("folder list returned {}", reply.status)));
    }
    parse_folder_list(&reply.body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, body: &str) -> Result<Reply, ApiError> {
        Ok(Reply { status, ok: (200..300).contains(&status), body: body.to_string() })
    }

    #[test]
    fn transport_failure_alerts_and_keeps_the_page() {
        let outcome = Err(ApiError::Transport("Failed to fetch".into()));
        let s = settle("Rename", FailurePolicy::AlertOnFailure, &outcome);
        assert_eq!(s.alert.as_deref(), Some("Rename error: Failed to fetch"));
        assert!(!s.reload);
    }

    #[test]
    fn bad_status_alerts_then_reloads() {
        let s = settle("Delete", FailurePolicy::AlertOnFailure, &reply(500, ""));
        assert_eq!(s.alert.as_deref(), Some("Delete failed"));
        assert!(s.reload);
    }

    #[test]
    fn silent_policy_reloads_without_alert() {
        let s = settle("Move", FailurePolicy::Silent, &reply(404, ""));
        assert_eq!(s, Settlement { alert: None, reload: true });
    }

    #[test]
    fn success_reloads_quietly() {
        let s = settle("Copy", FailurePolicy::Silent, &reply(200, r#"{"status":"success"}"#));
        assert_eq!(s, Settlement { alert: None, reload: true });
    }

    #[test]
    fn error_envelope_on_success_status_is_surfaced() {
        let body = r#"{"status":"error","message":"File or folder not found"}"#;
        let s = settle("Move", FailurePolicy::Silent, &reply(200, body));
        assert_eq!(s.alert.as_deref(), Some("File or folder not found"));
        assert!(s.reload);
    }
}
