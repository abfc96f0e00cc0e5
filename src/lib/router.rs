/// `Router` is the main entry point to the bot. It long-polls Telegram for
/// updates, and dispatches each update to the handlers whose [`Route`] matches
/// it, in the order they were added.
///
/// Every update is handled on its own tokio task, so a slow download in one
/// chat doesn't hold up polling or other chats.
use std::{cmp::max, sync::Arc, time::Duration};

use futures::{future::BoxFuture, Future};
use tokio::sync::{mpsc, Notify};

use crate::{
    api::{GetUpdatesRequest, Message, SendMessageRequest, Update},
    handler::{Action, Handler},
    Client, Event, API,
};

/// How long to back off after a failed `getUpdates` call.
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// `Matcher` narrows down which messages a [`Route`] accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Messages carrying a photo, excluding bot commands.
    Photo,

    /// Messages that start with a bot command.
    Command,
}

impl Matcher {
    pub fn matches(&self, message: &Message) -> bool {
        match self {
            Matcher::Photo => message.photo().is_some() && !message.is_command(),
            Matcher::Command => message.is_command(),
        }
    }
}

/// `Route` selects updates by kind, then by [`Matcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Every message update.
    Default,
    NewMessage(Matcher),
}

impl Route {
    pub fn matches(&self, update: &Update) -> bool {
        match self {
            Route::Default => update.get_message().is_ok(),
            Route::NewMessage(matcher) => update
                .message
                .as_ref()
                .is_some_and(|m| matcher.matches(m)),
        }
    }
}

/// Called with the chat ID whenever a handler returns an error.
pub type ErrorHandler =
    Arc<dyn Fn(Arc<API>, i64, anyhow::Error) -> BoxFuture<'static, ()> + Send + Sync>;

async fn default_error_handler(_: Arc<API>, chat_id: i64, err: anyhow::Error) {
    error!("Handler failed in chat {}: {:#}", chat_id, err);
}

pub struct Router {
    api: Arc<API>,
    routes: Arc<Vec<(Route, Handler)>>,
    error_handler: ErrorHandler,

    /// HTTP poll timeout
    timeout_s: i64,

    /// Shutdown notifier
    shutdown: Arc<Notify>,
    shutdown_tx: Arc<mpsc::Sender<()>>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl Router {
    /// Create a new router with the given client.
    pub fn new(client: Client) -> Self {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        Self {
            api: Arc::new(API::new(client)),
            routes: Arc::new(vec![]),
            error_handler: Arc::new(|api, chat_id, err| {
                Box::pin(default_error_handler(api, chat_id, err))
            }),
            timeout_s: 60,
            shutdown: Arc::new(Notify::new()),
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        }
    }

    pub fn with_poll_timeout_s(mut self, timeout_s: i64) -> Self {
        self.timeout_s = timeout_s;
        self
    }

    /// Replace the default error handler, which only logs.
    pub fn with_error_handler<Func, Fut>(mut self, func: Func) -> Self
    where
        Func: Send + Sync + 'static + Fn(Arc<API>, i64, anyhow::Error) -> Fut,
        Fut: Send + 'static + Future<Output = ()>,
    {
        self.error_handler = Arc::new(move |api, chat_id, err| Box::pin(func(api, chat_id, err)));
        self
    }

    /// Add a handler for updates matching `route`. Handlers run in the order
    /// they were added until one returns [`Action::Done`] or fails.
    pub fn add_route(&mut self, route: Route, h: impl Into<Handler>) -> &mut Self {
        Arc::make_mut(&mut self.routes).push((route, h.into()));
        self
    }

    pub fn shutdown(&self) -> (Arc<Notify>, Arc<mpsc::Sender<()>>) {
        (Arc::clone(&self.shutdown), Arc::clone(&self.shutdown_tx))
    }

    /// Start the router. This runs until a shutdown signal is received.
    pub async fn start(&mut self) {
        let mut last_update_id = 0;

        loop {
            debug!(
                "Polling /getUpdates with last_update_id = {} timeout = {}s",
                last_update_id, self.timeout_s
            );
            let req = GetUpdatesRequest::new()
                .with_timeout(self.timeout_s)
                .with_offset(last_update_id + 1);

            let updates = tokio::select! {
                _ = self.shutdown_rx.recv() => {
                    info!("Received shutdown signal");
                    break;
                }
                updates = self.api.get_updates(&req) => updates,
            };

            let updates = match updates {
                Ok(updates) => updates,
                Err(err) => {
                    error!("Failed to poll for updates: {:#}", err);
                    tokio::time::sleep(POLL_ERROR_BACKOFF).await;
                    continue;
                }
            };

            for update in updates {
                last_update_id = max(last_update_id, update.update_id);

                let api = Arc::clone(&self.api);
                let routes = Arc::clone(&self.routes);
                let error_handler = Arc::clone(&self.error_handler);
                tokio::spawn(async move {
                    Self::handle_update(api, routes, error_handler, update).await;
                });
            }
        }

        self.shutdown.notify_waiters();
    }

    async fn handle_update(
        api: Arc<API>,
        routes: Arc<Vec<(Route, Handler)>>,
        error_handler: ErrorHandler,
        update: Update,
    ) {
        let Ok(chat_id) = update.chat_id() else {
            debug!("Ignoring update {}: not a message", update.update_id);
            return;
        };
        debug!("Update {} in chat {}: {:#?}", update.update_id, chat_id, update);

        for (route, handler) in routes.iter() {
            if !route.matches(&update) {
                continue;
            }

            let action = handler
                .f
                .run(Event::new(Arc::clone(&api), update.clone()))
                .await;

            match action {
                Ok(Action::Next) => {}
                Ok(Action::Done) => break,
                Ok(Action::ReplyText(text)) => {
                    if let Err(err) = api
                        .send_message(&SendMessageRequest::new(chat_id, text))
                        .await
                    {
                        error!("Failed to reply in chat {}: {:#}", chat_id, err);
                    }
                }
                Err(err) => {
                    (error_handler)(Arc::clone(&api), chat_id, err).await;
                    break;
                }
            }
        }
    }
}
