use super::message::WebhookMessage;
use crate::prelude::*;
use crate::video::tier::Tier;
use anyhow::anyhow;
use reqwest::Client;

#[derive(Debug, Clone)]
pub struct WebhookUrls {
    pub shorts: String,
    pub movies: String,
    pub lives: String,
}

impl WebhookUrls {
    pub fn for_tier(&self, tier: Tier) -> &str {
        match tier {
            Tier::Shorts => &self.shorts,
            Tier::Movies => &self.movies,
            Tier::Lives => &self.lives,
        }
    }
}

pub trait Notifier {
    async fn send(&self, webhook_url: &str, message: &WebhookMessage) -> Result<()>;
}

pub struct WebhookClient {
    client: Client,
}

impl WebhookClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Notifier for WebhookClient {
    async fn send(&self, webhook_url: &str, message: &WebhookMessage) -> Result<()> {
        let response = self.client.post(webhook_url).json(message).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!(
                "Non-success response from webhook: {}",
                response.status()
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SendReport {
    pub sent: usize,
    pub failed: usize,
}

/// Sends every message on its own; a failed send is logged and the rest still go out.
pub async fn send_all<N: Notifier>(
    notifier: &N,
    webhook_url: &str,
    messages: &[WebhookMessage],
) -> SendReport {
    let mut report = SendReport::default();
    for message in messages {
        match notifier.send(webhook_url, message).await {
            Ok(()) => report.sent += 1,
            Err(e) => {
                tracing::error!("Failed to notify {}: {}", message.username, e);
                report.failed += 1;
            }
        }
    }

    report
}
