use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no browser window")]
    NoWindow,

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("{0}")]
    Transport(String),

    #[error("could not read response: {0}")]
    Decode(String),

    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn dom(e: JsValue) -> Self {
        ApiError::Dom(format!("{:?}", e))
    }

    pub fn transport(e: JsValue) -> Self {
        // fetch rejects with a TypeError; its message reads better than the debug dump
        let text = js_sys::Error::from(e.clone())
            .message()
            .as_string()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("{:?}", e));
        ApiError::Transport(text)
    }
}
