use crate::api::{self, PhotoSize, API};
use std::sync::Arc;

/// `Event` represents an update sent to a handler, along with the API used to
/// talk back to Telegram.
#[derive(Clone)]
pub struct Event {
    pub api: Arc<API>,
    pub update: api::Update,
}

impl Event {
    pub fn new(api: Arc<API>, update: api::Update) -> Self {
        Self { api, update }
    }

    /// Returns the largest variant of the attached photo. Telegram orders
    /// sizes ascending, so this is the last one.
    pub fn largest_photo(&self) -> Option<&PhotoSize> {
        self.update.photo().and_then(|sizes| sizes.last())
    }

    /// Resolve `file_id` with `getFile`. The returned `File` carries the remote path.
    pub async fn get_file(&self, file_id: impl Into<String>) -> anyhow::Result<api::File> {
        self.api
            .get_file(&api::GetFileRequest::new(file_id))
            .await
    }

    /// Fetch the content of a resolved file.
    pub async fn download_file(&self, file_path: &str) -> anyhow::Result<bytes::Bytes> {
        self.api.download_file(file_path).await
    }
}
