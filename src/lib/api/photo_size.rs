use serde::{Deserialize, Serialize};

/// One size of a photo. Telegram sends every photo as a list of these, smallest first.
#[derive(Default, Debug, Clone, Deserialize, Serialize)]
pub struct PhotoSize {
    /// Identifier for this file, which can be used to download or reuse the file
    pub file_id: String,

    /// Unique identifier for this file, which is supposed to be the same over time and for different bots
    #[serde(default)]
    pub file_unique_id: String,

    /// Photo width
    pub width: i64,

    /// Photo height
    pub height: i64,

    /// File size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
}

impl PhotoSize {
    pub fn new(file_id: impl Into<String>, width: i64, height: i64) -> Self {
        let file_id = file_id.into();
        Self {
            file_unique_id: file_id.clone(),
            file_id,
            width,
            height,
            file_size: None,
        }
    }
}
