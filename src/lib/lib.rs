//! `photobot` is a Telegram bot that saves every photo it is sent to a local
//! directory.
//!
//! # Framework
//!
//! The crate carries a small Telegram Bot API layer:
//!
//! - [`Client`] sends requests to the Telegram API and downloads files. Its
//!   transport can be swapped through the [`Post`] trait, which is how
//!   [`fake::FakeAPI`] stands in for Telegram in tests.
//!
//! - [`Router`] long-polls for updates and dispatches each one to the handlers
//!   whose [`Route`] matches, on its own task.
//!
//! - Handlers take an [`Event`] and return an [`Action`]. Any async function
//!   `fn(Event) -> anyhow::Result<Action>` is a handler, and so is anything
//!   implementing [`BotHandlerFn`].
//!
//! # The bot
//!
//! [`photo::PhotoSaver`] is the photo handler, configured from a YAML file
//! (see [`config`]).
//!
//! ```no_run
//! use std::sync::Arc;
//! use photobot::{config::Config, photo::PhotoSaver, *};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     photobot::init_logger();
//!     let config = Arc::new(Config::load(config::DEFAULT_CONFIG_PATH)?);
//!     let mut router = Router::new(Client::new(config.bot_token.clone()));
//!
//!     router.add_route(Route::NewMessage(Matcher::Photo), PhotoSaver::new(config));
//!     router.start().await;
//!     Ok(())
//! }
//! ```

#[macro_use]
extern crate log;

pub mod api;
pub mod client;
pub mod config;
pub mod event;
pub mod fake;
pub mod handler;
pub mod handlers;
pub mod photo;
pub mod router;

pub use api::API;
pub use client::*;
pub use event::*;
pub use handler::*;
pub use router::*;

/// This method initializes [`env_logger`] from the environment, defaulting to `info` level logging.
///
/// Every crate in the process logs through the [`log`] facade, so this is the
/// single sink for the bot, `reqwest` and `tokio` alike.
pub fn init_logger() {
    // We use try_init here so it can by run by tests.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    debug!("Logger initialized.");
}
