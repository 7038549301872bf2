//! Setup and host failures. Gameplay itself never fails; everything here comes
//! from building the page wiring or from a bad configuration.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("canvas has no 2d context")]
    NoContext,
    /// A browser call rejected; the message is whatever JS handed back.
    #[error("host call failed: {0}")]
    Js(String),
    #[error("game already started")]
    AlreadyStarted,
    #[error("no game is running")]
    NotRunning,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[cfg(feature = "serde_json")]
    #[error("config is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
