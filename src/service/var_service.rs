use crate::notify::webhook::WebhookUrls;
use crate::prelude::*;
use anyhow::anyhow;
use std::env::var;

async fn get_required_var(name: &str) -> Result<String> {
    match var(name) {
        Ok(value) => match value.is_empty() {
            true => {
                let err = format!("{} is empty", name);
                tracing::error!("{}", err);
                Err(anyhow!(err))
            }
            false => Ok(value),
        },
        Err(e) => {
            let err = format!("{} not found in environment: {:?}", name, e);
            tracing::error!("{}", err);
            Err(anyhow!(err))
        }
    }
}

async fn get_optional_var(name: &str) -> Option<String> {
    match var(name) {
        Ok(value) => match value.is_empty() {
            true => {
                tracing::info!("{} is empty", name);
                None
            }
            false => Some(value),
        },
        Err(e) => {
            tracing::info!("{} not found in environment: {}", name, e);
            None
        }
    }
}

pub async fn get_youtube_api_key() -> Result<String> {
    get_required_var("YOUTUBE_API_KEY").await
}

pub async fn get_webhook_urls() -> Result<WebhookUrls> {
    Ok(WebhookUrls {
        shorts: get_required_var("WEBHOOK_URL_SHORTS").await?,
        movies: get_required_var("WEBHOOK_URL_MOVIES").await?,
        lives: get_required_var("WEBHOOK_URL_LIVES").await?,
    })
}

pub async fn get_sheet_db_path(exe_parent: &str) -> String {
    match get_optional_var("SHEET_DB_PATH").await {
        Some(path) => path,
        None => format!("{}/sheet_db.sqlite", exe_parent),
    }
}

pub async fn get_sheet_seed_path() -> Option<String> {
    get_optional_var("SHEET_SEED_PATH").await
}

/// Seconds between polls. `None` means run once and exit.
pub async fn get_poll_interval() -> Result<Option<u64>> {
    let Some(interval) = get_optional_var("POLL_INTERVAL").await else {
        return Ok(None);
    };

    match interval.parse::<u64>() {
        Ok(0) => Ok(None),
        Ok(seconds) => Ok(Some(seconds)),
        Err(e) => {
            let err = format!("Failed to parse POLL_INTERVAL to u64: {}", e);
            tracing::error!("{}", err);
            Err(anyhow!(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::{remove_var, set_var};

    // Each test owns its variable names; the process environment is shared
    // across the test threads.

    #[tokio::test]
    async fn webhook_urls_require_every_tier() {
        set_var("WEBHOOK_URL_SHORTS", "https://hooks/shorts");
        set_var("WEBHOOK_URL_MOVIES", "https://hooks/movies");
        set_var("WEBHOOK_URL_LIVES", "");
        assert!(get_webhook_urls().await.is_err());

        set_var("WEBHOOK_URL_LIVES", "https://hooks/lives");
        let urls = get_webhook_urls().await.unwrap();
        assert_eq!(urls.shorts, "https://hooks/shorts");
        assert_eq!(urls.movies, "https://hooks/movies");
        assert_eq!(urls.lives, "https://hooks/lives");
    }

    #[tokio::test]
    async fn poll_interval_parsing() {
        remove_var("POLL_INTERVAL");
        assert_eq!(get_poll_interval().await.unwrap(), None);

        set_var("POLL_INTERVAL", "0");
        assert_eq!(get_poll_interval().await.unwrap(), None);

        set_var("POLL_INTERVAL", "900");
        assert_eq!(get_poll_interval().await.unwrap(), Some(900));

        set_var("POLL_INTERVAL", "soon");
        assert!(get_poll_interval().await.is_err());
        remove_var("POLL_INTERVAL");
    }

    #[tokio::test]
    async fn sheet_db_path_defaults_next_to_executable() {
        remove_var("SHEET_DB_PATH");
        assert_eq!(get_sheet_db_path("/opt/herald").await, "/opt/herald/sheet_db.sqlite");

        set_var("SHEET_DB_PATH", "/data/sheet.sqlite");
        assert_eq!(get_sheet_db_path("/opt/herald").await, "/data/sheet.sqlite");
        remove_var("SHEET_DB_PATH");
    }
}
