mod db {
    pub mod sheet;
    pub mod util;
}
mod notify {
    pub mod message;
    pub mod webhook;
}
mod prelude;
mod scrape {
    pub mod youtube;
}
mod service {
    pub mod poll_service;
    pub mod var_service;
}
mod util {
    pub mod env_service;
    pub mod log_service;
}
mod video {
    pub mod duration;
    pub mod tier;
    pub mod token;
}

use db::sheet::{SheetLayout, SqliteSheet};
use db::util::{create_sheet_db, get_db_pool};
use notify::webhook::WebhookClient;
use prelude::*;
use reqwest::Client;
use scrape::youtube::YoutubeClient;
use service::poll_service::{log_summary, schedule_polls, Poller};
use service::var_service::{
    get_poll_interval, get_sheet_db_path, get_sheet_seed_path, get_webhook_urls,
    get_youtube_api_key,
};
use std::path::Path;
use tokio::time::Duration;
use util::env_service::check_env_vars;
use util::log_service::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let exe_parent = check_env_vars().await?;
    let _sentry = setup_logging().await?;

    let db_path = get_sheet_db_path(&exe_parent).await;
    let pool = get_db_pool(Path::new(&db_path)).await?;
    create_sheet_db(&pool).await?;
    let sheet = SqliteSheet::new(pool);
    if let Some(seed_path) = get_sheet_seed_path().await {
        sheet.seed_from_tsv(Path::new(&seed_path)).await?;
    }

    let client = Client::new();
    let poller = Poller {
        sheet,
        source: YoutubeClient::new(client.clone(), get_youtube_api_key().await?),
        notifier: WebhookClient::new(client),
        webhooks: get_webhook_urls().await?,
        layout: SheetLayout::default(),
    };

    match get_poll_interval().await? {
        Some(seconds) => schedule_polls(&poller, Duration::from_secs(seconds)).await?,
        None => log_summary(&poller.run_poll().await?),
    }

    Ok(())
}
