/// This bot saves every photo it is sent into the first directory of
/// `output_dirpath_list` in its config file, and replies "Image received.".

#[macro_use]
extern crate log;

use std::{path::PathBuf, sync::Arc};

use argh::FromArgs;
use photobot::{
    config::{self, Config},
    photo::PhotoSaver,
    *,
};

#[derive(FromArgs)]
/// Save incoming Telegram photos to a local directory.
struct Args {
    /// path to the YAML config file
    #[argh(option, short = 'c', default = "PathBuf::from(config::DEFAULT_CONFIG_PATH)")]
    config: PathBuf,

    /// long-poll timeout for getUpdates, in seconds
    #[argh(option, default = "60")]
    poll_timeout: i64,
}

#[tokio::main]
async fn main() {
    photobot::init_logger();
    let args: Args = argh::from_env();

    let config = match Config::load(&args.config) {
        Ok(config) => Arc::new(config),
        Err(err) => {
            error!("{}", err);
            return;
        }
    };
    match config.base_dirpath() {
        Ok(dir) => info!("Starting photobot, saving photos to {}", dir.display()),
        Err(err) => {
            error!("{}", err);
            return;
        }
    }

    let client = Client::new(config.bot_token.clone());
    let mut router = Router::new(client).with_poll_timeout_s(args.poll_timeout);
    router
        .add_route(Route::NewMessage(Matcher::Photo), handlers::log_handler)
        .add_route(Route::NewMessage(Matcher::Photo), PhotoSaver::new(config));

    let (_, shutdown_tx) = router.shutdown();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(()).await;
        }
    });

    router.start().await;
    info!("Stopped.");
}
