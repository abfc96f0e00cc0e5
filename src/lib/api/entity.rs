use serde::{Deserialize, Serialize};

/// One special entity in a text message or caption: hashtags, usernames,
/// URLs, bot commands, etc.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct MessageEntity {
    /// Type of the entity, e.g. “mention”, “hashtag”, “bot_command”, “url”
    #[serde(rename = "type")]
    pub entity_type: String,

    /// Offset in UTF-16 code units to the start of the entity
    pub offset: i64,

    /// Length of the entity in UTF-16 code units
    pub length: i64,
}

impl MessageEntity {
    pub fn bot_command(offset: i64, length: i64) -> Self {
        Self {
            entity_type: String::from("bot_command"),
            offset,
            length,
        }
    }

    pub fn is_bot_command(&self) -> bool {
        self.entity_type == "bot_command"
    }
}
