//! Saving incoming photos to disk.
//!
//! [`PhotoSaver`] is registered on [`crate::Matcher::Photo`]. For every photo
//! message it picks the largest size, resolves it with `getFile`, downloads it
//! into the configured output directory under the last segment of the remote
//! file path, and acknowledges with [`REPLY_TEXT`].
//!
//! Failures are logged and the event is dropped without a reply.
use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;

use crate::{config::Config, handler::BotHandlerFn, Action, Event};

/// Sent back to the chat once a photo has been written.
pub const REPLY_TEXT: &str = "Image received.";

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Message has no photo")]
    NoPhoto,

    #[error("A file path is not given with a file. File ID was ({file_id}).")]
    MissingFilePath { file_id: String },

    #[error("A file path is not valid. File ID was ({file_id}). File path was ({file_path})")]
    InvalidFilePath { file_id: String, file_path: String },

    #[error("Could not fetch file. File ID was ({file_id}): {source:#}")]
    Fetch {
        file_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("An IO error has occurred with filepath({}): {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Returns the last non-empty `/`-separated segment of `path`, or `None` if
/// there isn't one.
///
/// ```
/// use photobot::photo::last_path_segment;
///
/// assert_eq!(last_path_segment("photos/file_0.jpg"), Some("file_0.jpg"));
/// assert_eq!(last_path_segment("a/b/c/"), Some("c"));
/// assert_eq!(last_path_segment(""), None);
/// ```
pub fn last_path_segment(path: &str) -> Option<&str> {
    path.split('/').filter(|part| !part.is_empty()).last()
}

/// The photo handler. Holds the bot config, shared read-only between events.
#[derive(Debug, Clone)]
pub struct PhotoSaver {
    config: Arc<Config>,
}

impl PhotoSaver {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Save the largest photo in `e` and return where it was written.
    pub async fn save(&self, e: &Event) -> Result<PathBuf, SaveError> {
        debug!("Photo sizes: {:#?}", e.update.photo());
        let file_id = e.largest_photo().ok_or(SaveError::NoPhoto)?.file_id.clone();

        let file = e
            .get_file(file_id.as_str())
            .await
            .map_err(|source| SaveError::Fetch {
                file_id: file_id.clone(),
                source,
            })?;
        debug!("Resolved file: {:?}", file);

        let file_path = match file.file_path.as_deref() {
            Some(file_path) if !file_path.is_empty() => file_path,
            _ => return Err(SaveError::MissingFilePath { file_id }),
        };

        let filename = last_path_segment(file_path)
            .filter(|name| *name != "." && *name != "..")
            .ok_or_else(|| SaveError::InvalidFilePath {
                file_id: file_id.clone(),
                file_path: file_path.to_string(),
            })?;

        let content = e
            .download_file(file_path)
            .await
            .map_err(|source| SaveError::Fetch {
                file_id: file_id.clone(),
                source,
            })?;

        let output_path = self.config.base_dirpath()?.join(filename);
        info!("Saving to ({})...", output_path.display());

        tokio::fs::write(&output_path, &content)
            .await
            .map_err(|source| SaveError::Write {
                path: output_path.clone(),
                source,
            })?;

        Ok(output_path)
    }
}

#[async_trait]
impl BotHandlerFn for PhotoSaver {
    async fn run(&self, e: Event) -> Result<Action, anyhow::Error> {
        info!("Photo received in chat {}", e.update.chat_id()?);

        match self.save(&e).await {
            Ok(path) => {
                debug!("Saved {}", path.display());
                Ok(Action::ReplyText(REPLY_TEXT.into()))
            }
            Err(err) => {
                error!("{}", err);
                Ok(Action::Done)
            }
        }
    }
}
