use photobot_derive::BotRequest;
use serde::{Deserialize, Serialize};

use crate::API;

use super::{chat::Chat, entity::MessageEntity, photo_size::PhotoSize, user::User};

#[derive(Default, Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    /// Unique message identifier inside this chat
    pub message_id: i64,

    /// Sender, empty for messages sent to channels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,

    /// Date the message was sent in Unix time
    pub date: i64,

    /// Conversation the message belongs to
    pub chat: Chat,

    /// Message text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Special entities like usernames, URLs, bot commands, etc. that appear in the text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<MessageEntity>>,

    /// Message is a photo, available sizes of the photo (smallest first)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<PhotoSize>>,

    /// Caption for the photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Message {
    pub fn new(from: impl Into<String>, text: impl Into<String>) -> Self {
        let from = from.into();

        Self {
            from: Some(User {
                username: Some(from.clone()),
                first_name: from.clone(),
                ..Default::default()
            }),
            text: Some(text.into()),
            chat: Chat {
                chat_type: String::from("private"),
                username: Some(from.clone()),
                first_name: Some(from),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Returns the photo sizes attached to this message, if it has any.
    pub fn photo(&self) -> Option<&[PhotoSize]> {
        self.photo.as_deref().filter(|sizes| !sizes.is_empty())
    }

    /// Returns `true` if the text starts with a bot command entity. Captions
    /// are never commands, so a captioned photo is always a photo.
    pub fn is_command(&self) -> bool {
        self.entities
            .iter()
            .flatten()
            .any(|e| e.is_bot_command() && e.offset == 0)
    }
}

#[derive(Default, Debug, Serialize, Deserialize, Clone, BotRequest)]
pub struct SendMessageRequest {
    /// Unique identifier for the target chat or username of the target
    pub chat_id: i64,

    /// Text of the message to be sent
    pub text: String,
}

impl SendMessageRequest {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
        }
    }
}

impl API {
    pub async fn send_message(&self, req: &SendMessageRequest) -> anyhow::Result<Message> {
        self.client.post("sendMessage", req).await
    }
}
