use crate::{Action, Event};

/// This handler logs every message received, then passes it on.
pub async fn log_handler(e: Event) -> Result<Action, anyhow::Error> {
    let message = e.update.get_message()?;
    let from = message
        .from
        .as_ref()
        .map(|user| user.first_name.as_str())
        .unwrap_or("unknown");
    let photos = message.photo().map(|sizes| sizes.len()).unwrap_or(0);

    info!(
        "({}) Message from {}: text = {:?}, caption = {:?}, photo sizes = {}",
        message.chat.id, from, message.text, message.caption, photos
    );

    Ok(Action::Next)
}
