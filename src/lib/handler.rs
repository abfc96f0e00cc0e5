use std::sync::Arc;

use async_trait::async_trait;
use futures::Future;

use crate::Event;

/// `Action` represents an action to take after handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Continue to the next handler.
    Next,

    /// Stop handling this update.
    Done,

    /// Reply to the message with the given text and continue
    /// to the next handler.
    ReplyText(String),
}

/// Anything the router can dispatch an [`Event`] to. Implemented for plain
/// async functions and closures, and for handler structs that carry their own
/// dependencies (see [`crate::photo::PhotoSaver`]).
#[async_trait]
pub trait BotHandlerFn: Send + Sync {
    async fn run(&self, event: Event) -> Result<Action, anyhow::Error>;
}

#[async_trait]
impl<Func, Fut> BotHandlerFn for Func
where
    Func: Send + Sync + Fn(Event) -> Fut,
    Fut: Send + 'static + Future<Output = Result<Action, anyhow::Error>>,
{
    async fn run(&self, event: Event) -> Result<Action, anyhow::Error> {
        self(event).await
    }
}

/// A registered handler. Cheap to clone so the router can hand it to spawned tasks.
#[derive(Clone)]
pub struct Handler {
    pub f: Arc<dyn BotHandlerFn>,
}

impl<T: BotHandlerFn + 'static> From<T> for Handler {
    fn from(f: T) -> Self {
        Self { f: Arc::new(f) }
    }
}
