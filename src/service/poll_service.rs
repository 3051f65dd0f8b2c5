use crate::db::sheet::{channel_rows, ChannelRow, SheetLayout, SheetStore};
use crate::notify::message::build_messages;
use crate::notify::webhook::{send_all, Notifier, WebhookUrls};
use crate::prelude::*;
use crate::scrape::youtube::{VideoInfo, VideoSource};
use crate::video::tier::Tier;
use crate::video::token::TimeToken;
use tokio::time::{interval, Duration};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PollSummary {
    pub channels: usize,
    pub skipped: usize,
    pub updated: usize,
    pub sent: usize,
    pub failed: usize,
}

pub struct Poller<S, V, N> {
    pub sheet: S,
    pub source: V,
    pub notifier: N,
    pub webhooks: WebhookUrls,
    pub layout: SheetLayout,
}

pub fn is_newer(latest: TimeToken, notified: TimeToken) -> bool {
    latest > notified
}

impl<S: SheetStore, V: VideoSource, N: Notifier> Poller<S, V, N> {
    /// One pass over the sheet. Every lookup finishes before the first write,
    /// so a failed lookup leaves the sheet untouched.
    pub async fn run_poll(&self) -> Result<PollSummary> {
        let rows = channel_rows(self.sheet.read_rows().await?, &self.layout);
        let mut summary = PollSummary {
            channels: rows.len(),
            ..Default::default()
        };

        let mut found: Vec<(&ChannelRow, VideoInfo)> = Vec::new();
        for row in &rows {
            let channel_id = row.cell(self.layout.channel_id).trim();
            match self.source.latest_video(channel_id).await {
                Ok(Some(info)) => found.push((row, info)),
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    tracing::error!("Video lookup failed for channel {}: {}", channel_id, e);
                    return Err(e);
                }
            }
        }

        for (row, info) in found {
            let notified = TimeToken::parse_stored(row.cell(self.layout.notified_token));
            if !is_newer(info.time_token, notified) {
                continue;
            }

            let tier = Tier::classify(&info.duration);
            let messages = build_messages(&row.cells, &self.layout, &info.url);
            tracing::info!(
                "New {} upload {} on row {}, notifying {} recipients",
                tier,
                info.url,
                row.index,
                messages.len()
            );
            let report = send_all(&self.notifier, self.webhooks.for_tier(tier), &messages).await;
            summary.sent += report.sent;
            summary.failed += report.failed;

            self.record(row.index, &info).await?;
            summary.updated += 1;
        }

        Ok(summary)
    }

    async fn record(&self, row_index: usize, info: &VideoInfo) -> Result<()> {
        let time_token = info.time_token.to_string();
        self.sheet.write_cell(row_index, self.layout.url, &info.url).await?;
        self.sheet.write_cell(row_index, self.layout.latest_token, &time_token).await?;
        self.sheet.write_cell(row_index, self.layout.duration, &info.duration.formatted()).await?;
        self.sheet.write_cell(row_index, self.layout.notified_token, &time_token).await?;

        Ok(())
    }
}

pub async fn schedule_polls<S: SheetStore, V: VideoSource, N: Notifier>(
    poller: &Poller<S, V, N>,
    every: Duration,
) -> Result<()> {
    let mut interval = interval(every);

    loop {
        interval.tick().await;
        match poller.run_poll().await {
            Ok(summary) => log_summary(&summary),
            Err(e) => tracing::error!("Poll failed, sheet left unchanged: {}", e),
        }
    }
}

pub fn log_summary(summary: &PollSummary) {
    tracing::info!(
        "Polled {} channels: {} skipped, {} updated, {} notifications sent, {} failed",
        summary.channels,
        summary.skipped,
        summary.updated,
        summary.sent,
        summary.failed
    );
}
