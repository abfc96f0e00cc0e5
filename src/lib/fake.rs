/// This is a fake Telegram API server. It implements the parts of the Telegram API
/// the bot uses, but instead of talking to Telegram, it delivers replies to a
/// [`FakeChat`] object and serves files registered with [`FakeAPI::add_file`].
///
/// Plug it into a [`crate::Client`] with [`crate::Client::with_post_handler`].
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::{mpsc, Mutex};

use crate::{
    api::{
        self, ApiResponse, GetFileRequest, GetUpdatesRequest, Message, SendMessageRequest, Update,
    },
    Post,
};

/// A chat session between a fake user and the bot.
pub struct FakeChat {
    pub chat_id: i64,
    pub from: String,
    update_tx: Arc<mpsc::Sender<Message>>,
    chat_rx: Arc<Mutex<mpsc::Receiver<Message>>>,
}

impl FakeChat {
    fn message(&self) -> Message {
        let mut message = Message::new(self.from.clone(), "");
        message.text = None;
        message.message_id = rand::random::<u32>() as i64;
        message.date = Utc::now().timestamp();
        message.chat.id = self.chat_id;
        message
    }

    /// Send an arbitrary message to the bot. The chat ID is overwritten.
    pub async fn send_message(&self, mut message: Message) -> Result<()> {
        message.chat.id = self.chat_id;
        Ok(self.update_tx.send(message).await?)
    }

    /// Send a text message. Like Telegram, a leading `/word` is tagged as a
    /// bot command entity.
    pub async fn send_text(&self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        let mut message = self.message();
        if text.starts_with('/') {
            let command = text.split_whitespace().next().unwrap_or_default();
            message.entities = Some(vec![api::MessageEntity::bot_command(
                0,
                command.encode_utf16().count() as i64,
            )]);
        }
        message.text = Some(text);
        self.send_message(message).await
    }

    /// Send a photo with the given sizes, smallest first.
    pub async fn send_photo(&self, file_ids: &[&str]) -> Result<()> {
        self.send_message(self.photo_message(file_ids)).await
    }

    pub async fn send_photo_with_caption(
        &self,
        file_ids: &[&str],
        caption: impl Into<String>,
    ) -> Result<()> {
        let mut message = self.photo_message(file_ids);
        message.caption = Some(caption.into());
        self.send_message(message).await
    }

    fn photo_message(&self, file_ids: &[&str]) -> Message {
        let mut message = self.message();
        message.photo = Some(
            file_ids
                .iter()
                .zip(1..)
                .map(|(file_id, scale)| api::PhotoSize::new(*file_id, 90 * scale, 60 * scale))
                .collect(),
        );
        message
    }

    /// Wait for the next message the bot sends to this chat.
    pub async fn recv_message(&self) -> Option<Message> {
        let mut rx = self.chat_rx.lock().await;
        rx.recv().await
    }
}

#[derive(Debug, Clone)]
struct FakeFile {
    file_path: Option<String>,
    content: Option<Bytes>,
}

#[derive(Clone)]
pub struct FakeAPI {
    pub bot_name: String,
    update_id: Arc<Mutex<i64>>,
    update_tx: Arc<mpsc::Sender<Message>>,
    update_rx: Arc<Mutex<mpsc::Receiver<Message>>>,
    chat_queue: Arc<Mutex<HashMap<i64, mpsc::Sender<Message>>>>,
    files: Arc<Mutex<HashMap<String, FakeFile>>>,
    requested_files: Arc<Mutex<Vec<String>>>,
}

impl Default for FakeAPI {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeAPI {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(100);

        Self {
            bot_name: "photobot".to_string(),
            update_id: Arc::new(Mutex::new(0)),
            update_tx: Arc::new(tx),
            update_rx: Arc::new(Mutex::new(rx)),
            chat_queue: Arc::new(Mutex::new(HashMap::new())),
            files: Arc::new(Mutex::new(HashMap::new())),
            requested_files: Arc::new(Mutex::new(vec![])),
        }
    }

    pub async fn create_chat(&self, from: impl Into<String>) -> FakeChat {
        let chat_id = rand::random::<u32>() as i64;
        let (tx, rx) = mpsc::channel(100);

        self.chat_queue.lock().await.insert(chat_id, tx);

        FakeChat {
            chat_id,
            from: from.into(),
            update_tx: Arc::clone(&self.update_tx),
            chat_rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Serve `content` for `file_id`. `getFile` reports `file_path` as the
    /// remote path, which may be `None` to simulate a file without one.
    pub async fn add_file(
        &self,
        file_id: impl Into<String>,
        file_path: Option<&str>,
        content: impl Into<Bytes>,
    ) {
        self.files.lock().await.insert(
            file_id.into(),
            FakeFile {
                file_path: file_path.map(String::from),
                content: Some(content.into()),
            },
        );
    }

    /// Like [`FakeAPI::add_file`], but downloading the file fails.
    pub async fn add_unavailable_file(&self, file_id: impl Into<String>, file_path: &str) {
        self.files.lock().await.insert(
            file_id.into(),
            FakeFile {
                file_path: Some(file_path.to_string()),
                content: None,
            },
        );
    }

    /// File IDs passed to `getFile` so far, in order.
    pub async fn requested_files(&self) -> Vec<String> {
        self.requested_files.lock().await.clone()
    }

    async fn get_updates(&self, req: GetUpdatesRequest) -> ApiResponse<Vec<Update>> {
        let mut rx = self.update_rx.lock().await;
        let timeout = Duration::from_secs(req.timeout.unwrap_or(1).max(0) as u64);

        tokio::select! {
            Some(message) = rx.recv() => {
                let update_id = {
                    let mut update_id = self.update_id.lock().await;
                    *update_id += 1;
                    *update_id
                };

                ApiResponse::success(vec![Update {
                    update_id,
                    message: Some(message),
                    ..Default::default()
                }])
            }
            _ = tokio::time::sleep(timeout) => {
                ApiResponse::success(vec![])
            }
        }
    }

    async fn send_message(&self, req: SendMessageRequest) -> ApiResponse<Message> {
        let mut message = Message::new(self.bot_name.clone(), req.text);
        message.message_id = rand::random::<u32>() as i64;
        message.date = Utc::now().timestamp();
        message.chat.id = req.chat_id;

        if let Some(chat) = self.chat_queue.lock().await.get(&req.chat_id) {
            if chat.send(message.clone()).await.is_err() {
                warn!("Chat with id = {} is gone", req.chat_id);
            }
        } else {
            warn!("Can't find Chat with id = {}", req.chat_id);
        }

        ApiResponse::success(message)
    }

    async fn get_file(&self, req: GetFileRequest) -> ApiResponse<api::File> {
        self.requested_files.lock().await.push(req.file_id.clone());

        match self.files.lock().await.get(&req.file_id) {
            Some(file) => ApiResponse::success(api::File {
                file_id: req.file_id,
                file_size: file.content.as_ref().map(|c| c.len() as i64),
                file_path: file.file_path.clone(),
            }),
            None => ApiResponse::failure("Bad Request: invalid file_id"),
        }
    }
}

#[async_trait]
impl Post for FakeAPI {
    async fn post(&self, method: String, req: String) -> Result<String> {
        use serde_json::to_string as json;

        debug!("method = {}, req = {}", method, req);
        let response = match method.as_str() {
            "getUpdates" => json(&self.get_updates(serde_json::from_str(&req)?).await),
            "sendMessage" => json(&self.send_message(serde_json::from_str(&req)?).await),
            "getFile" => json(&self.get_file(serde_json::from_str(&req)?).await),
            _ => {
                warn!("Unknown method: {}", method);
                json(&ApiResponse::<()>::failure(format!("Unknown method: {}", method)))
            }
        };

        Ok(response?)
    }

    async fn download(&self, file_path: String) -> Result<Bytes> {
        self.files
            .lock()
            .await
            .values()
            .find(|file| file.file_path.as_deref() == Some(file_path.as_str()))
            .and_then(|file| file.content.clone())
            .ok_or_else(|| anyhow!("404 Not Found: {}", file_path))
    }
}
