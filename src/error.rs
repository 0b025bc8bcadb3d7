use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SiteError {
    #[error("{0} is not available")]
    MissingElement(&'static str),
    #[error("unknown theme \"{0}\"")]
    UnknownTheme(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("clipboard error: {0}")]
    Clipboard(String),
    #[error("canvas error: {0}")]
    Canvas(String),
    #[error("invalid url: {0}")]
    Url(String),
    #[error("submission failed: {0}")]
    Submit(String),
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        SiteError::Submit(err.to_string())
    }
}

impl From<url::ParseError> for SiteError {
    fn from(err: url::ParseError) -> Self {
        SiteError::Url(err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn js_error(value: wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&value, &wasm_bindgen::JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| "unknown browser error".to_string())
}
