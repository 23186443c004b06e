use thiserror::Error;

/// Failures at the boundary between the grid animator and its host.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("canvas element with id '{0}' not found")]
    CanvasNotFound(String),

    #[error("failed to get 2D context from the canvas")]
    ContextUnavailable,

    #[error("invalid grid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    #[error("invalid grid option: {0}")]
    InvalidOption(&'static str),

    #[error("host call failed: {0}")]
    Js(String),
}

pub type GridResult<T> = Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(err: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GridError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        GridError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
