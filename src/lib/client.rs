use std::fmt;

use anyhow::Result;
use derive_more::*;
use serde::{de::DeserializeOwned, Deserialize};

use crate::api::ApiResponse;

/// This is a wrapper around the Telegram API token string. Get your token from
/// [@BotFather](https://t.me/BotFather).
///
/// The token is never printed by `Debug`, so configs holding it can be logged.
#[derive(Clone, PartialEq, Eq, From, Into, FromStr, Display, Deserialize)]
#[serde(transparent)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for ApiToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

/// `Post` lets you replace the transport used by [`Client`]. Every Bot API call
/// goes through `post`, and every file download goes through `download`. This
/// is how [`crate::fake::FakeAPI`] is wired in for tests.
#[async_trait::async_trait]
pub trait Post {
    /// Send `req` (a JSON body) to the Bot API `method`, returning the raw JSON response.
    async fn post(&self, method: String, req: String) -> Result<String>;

    /// Fetch the content of a file previously resolved with `getFile`.
    async fn download(&self, file_path: String) -> Result<bytes::Bytes>;
}

/// This is a thin shim around the Telegram HTTP client. Requires a valid API token.
pub struct Client {
    /// This base URL is used for all requests and is constructed from the
    /// provided API token.
    base_url: String,

    /// This is URL is used for requests for download files
    file_url: String,

    /// The underlying HTTP client.
    client: reqwest::Client,

    /// A post handler that implements the Post trait. Useful for testing.
    post_handler: Option<Box<dyn Post + Send + Sync>>,
}

impl Client {
    /// Returns a new Telegram API client.
    pub fn new(token: impl Into<ApiToken>) -> Self {
        let token = token.into();
        Self {
            base_url: format!("https://api.telegram.org/bot{token}"),
            file_url: format!("https://api.telegram.org/file/bot{token}"),
            client: reqwest::Client::new(),
            post_handler: None,
        }
    }

    pub fn with_post_handler(mut self, post_handler: impl Post + Send + Sync + 'static) -> Self {
        self.post_handler = Some(Box::new(post_handler));
        self
    }

    /// Send `method` with `req` as the request body to the Telegram API.
    pub async fn post<Req, Resp>(&self, method: &str, req: &Req) -> Result<Resp>
    where
        Req: crate::api::Request,
        Resp: DeserializeOwned,
    {
        let body = if let Some(ref post_handler) = self.post_handler {
            post_handler
                .post(method.to_string(), serde_json::to_string(req)?)
                .await?
        } else {
            debug!("POST /{}:\n{}", method, serde_json::to_string_pretty(req)?);
            self.client
                .post(format!("{}/{}", self.base_url, method))
                .json(&req)
                .send()
                .await?
                .text()
                .await?
        };

        let response: ApiResponse<Resp> = serde_json::from_str(&body)?;
        debug!("Response /{}: ok = {}", method, response.ok);
        Ok(response.into_result()?)
    }

    /// Download the file at `file_path` (as returned by `getFile`).
    pub async fn download_file(&self, file_path: &str) -> Result<bytes::Bytes> {
        if let Some(ref post_handler) = self.post_handler {
            return post_handler.download(file_path.to_string()).await;
        }

        debug!("Downloading file /{}", file_path);
        let body = self
            .client
            .get(format!("{}/{}", self.file_url, file_path))
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        debug!("File downloaded successfully /{} ({} bytes)", file_path, body.len());
        Ok(body)
    }
}
