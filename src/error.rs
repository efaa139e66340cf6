use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown topic '{0}'")]
    UnknownTopic(String),

    #[error("topic '{0}' has no items")]
    EmptyTopic(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("dom: {0}")]
    Dom(String),
}

impl GameError {
    /// Wrap a JS exception thrown by a DOM call.
    pub fn dom(context: &str, err: JsValue) -> Self {
        GameError::Dom(format!("{context}: {err:?}"))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
