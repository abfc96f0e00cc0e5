use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Client;

/// Typed access to the Bot API methods the bot calls. Each method lives next
/// to its request type (`getFile` in `file.rs`, and so on).
pub struct API {
    pub client: Client,
}

impl API {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Marker for request bodies. Derive it with `#[derive(BotRequest)]`.
pub trait Request: Serialize + Send + Sync {}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Telegram API error: {0}")]
    Telegram(String),

    #[error("Telegram API returned ok without a result")]
    NoResult,
}

/// The envelope every Bot API call answers with: `{"ok": true, "result": ...}`
/// or `{"ok": false, "description": "..."}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            ok: true,
            description: None,
            result: Some(result),
        }
    }

    pub fn failure(description: impl Into<String>) -> Self {
        Self {
            ok: false,
            description: Some(description.into()),
            result: None,
        }
    }

    pub fn into_result(self) -> Result<T, ApiError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err(ApiError::NoResult),
            (false, _) => Err(ApiError::Telegram(
                self.description
                    .unwrap_or_else(|| "no description".to_string()),
            )),
        }
    }
}
