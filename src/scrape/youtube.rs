use crate::prelude::*;
use crate::video::duration::{parse_duration, VideoDuration};
use crate::video::token::TimeToken;
use anyhow::anyhow;
use reqwest::Client;
use serde_json::Value;
use url::Url;

pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoInfo {
    pub url: String,
    pub time_token: TimeToken,
    pub duration: VideoDuration,
}

pub trait VideoSource {
    /// `Ok(None)` when the channel has nothing to report. `Err` only for
    /// failures that should stop the whole pass.
    async fn latest_video(&self, channel_id: &str) -> Result<Option<VideoInfo>>;
}

pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YoutubeClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self::with_base_url(client, api_key, YOUTUBE_API_BASE)
    }

    pub fn with_base_url(client: Client, api_key: String, base_url: &str) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json(&self, resource: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = Url::parse_with_params(
            &format!("{}/{}", self.base_url, resource),
            params.iter().copied().chain([("key", self.api_key.as_str())]),
        )?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            let err = format!(
                "Non-success response from Youtube {}: {}",
                resource,
                response.status()
            );
            tracing::error!("{}", err);
            return Err(anyhow!(err));
        }

        Ok(response.json().await?)
    }
}

impl VideoSource for YoutubeClient {
    async fn latest_video(&self, channel_id: &str) -> Result<Option<VideoInfo>> {
        let channels = self
            .get_json("channels", &[("part", "contentDetails"), ("id", channel_id)])
            .await?;
        let uploads = &channels["items"][0]["contentDetails"]["relatedPlaylists"]["uploads"];
        let Some(uploads) = uploads.as_str() else {
            tracing::warn!("Channel not found: {}", channel_id);
            return Ok(None);
        };

        let playlist = self
            .get_json(
                "playlistItems",
                &[("part", "snippet"), ("playlistId", uploads), ("maxResults", "1")],
            )
            .await?;
        let snippet = &playlist["items"][0]["snippet"];
        let Some(video_id) = snippet["resourceId"]["videoId"].as_str() else {
            tracing::warn!("No videos in uploads playlist of channel: {}", channel_id);
            return Ok(None);
        };

        let Some(published_at) = snippet["publishedAt"].as_str() else {
            tracing::warn!("Video {} has no publish time", video_id);
            return Ok(None);
        };

        let time_token = match TimeToken::from_published_at(published_at) {
            Ok(time_token) => time_token,
            Err(e) => {
                tracing::warn!(
                    "Unreadable publish time {:?} on video {}: {}",
                    published_at,
                    video_id,
                    e
                );
                return Ok(None);
            }
        };

        let videos = self
            .get_json("videos", &[("part", "contentDetails"), ("id", video_id)])
            .await?;
        let Some(duration) = videos["items"][0]["contentDetails"]["duration"].as_str() else {
            tracing::warn!("No content details for video: {}", video_id);
            return Ok(None);
        };

        Ok(Some(VideoInfo {
            url: format!("https://www.youtube.com/watch?v={}", video_id),
            time_token,
            duration: parse_duration(duration)?,
        }))
    }
}
