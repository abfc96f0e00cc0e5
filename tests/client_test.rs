use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use photobot::{
    api::{GetFileRequest, GetUpdatesRequest},
    *,
};

/// Answers every call with a canned body.
struct CannedPost(&'static str);

#[async_trait]
impl Post for CannedPost {
    async fn post(&self, _: String, _: String) -> Result<String> {
        Ok(self.0.to_string())
    }

    async fn download(&self, file_path: String) -> Result<Bytes> {
        Ok(Bytes::from(file_path))
    }
}

fn api(body: &'static str) -> API {
    API::new(Client::new("token").with_post_handler(CannedPost(body)))
}

#[tokio::test]
async fn get_file_parses_result() {
    let api = api(r#"{"ok":true,"result":{"file_id":"abc","file_size":12,"file_path":"photos/file_0.jpg"}}"#);

    let file = api.get_file(&GetFileRequest::new("abc")).await.unwrap();
    assert_eq!(file.file_id, "abc");
    assert_eq!(file.file_size, Some(12));
    assert_eq!(file.file_path.as_deref(), Some("photos/file_0.jpg"));
}

#[tokio::test]
async fn telegram_errors_are_errors() {
    let api = api(r#"{"ok":false,"description":"Bad Request: invalid file_id"}"#);

    let err = api.get_file(&GetFileRequest::new("abc")).await.unwrap_err();
    assert_eq!(err.to_string(), "Telegram API error: Bad Request: invalid file_id");

    let api = self::api(r#"{"ok":true}"#);
    let err = api.get_file(&GetFileRequest::new("abc")).await.unwrap_err();
    assert_eq!(err.to_string(), "Telegram API returned ok without a result");
}

#[tokio::test]
async fn downloads_go_through_post_handler() {
    let api = api("");
    let content = api.download_file("photos/file_0.jpg").await.unwrap();
    assert_eq!(content, Bytes::from("photos/file_0.jpg"));
}

#[test]
fn token_is_redacted() {
    let token = ApiToken::from("123456:secret");
    assert_eq!(format!("{:?}", token), "ApiToken(***)");
    assert_eq!(token.to_string(), "123456:secret");
}

#[test]
fn get_updates_asks_for_new_messages_only() {
    let req = GetUpdatesRequest::new().with_timeout(1).with_offset(7);
    assert_eq!(
        serde_json::to_value(&req).unwrap(),
        serde_json::json!({"offset": 7, "timeout": 1, "allowed_updates": ["message"]})
    );
}
