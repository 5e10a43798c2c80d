use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};
use tubesum_common::{Result, TranscriptError};

use crate::parser::{caption_tracks, extract_innertube_api_key, parse_timedtext, select_track, timedtext_url};
use crate::types::Transcript;

const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

/// Source of video transcripts
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript of `video_id` in the first available language
    async fn fetch(&self, video_id: &str, languages: &[String]) -> Result<Transcript>;
}

/// Fetches captions straight from YouTube
#[derive(Debug, Clone)]
pub struct YouTubeTranscriptFetcher {
    base_url: String,
    client: Client,
}

impl YouTubeTranscriptFetcher {
    /// Create new fetcher against `base_url` (normally `https://www.youtube.com`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!("YouTube transcript fetcher initialized: {}", base_url);
        Ok(Self { base_url, client })
    }

    async fn get_text(&self, url: &str) -> std::result::Result<String, TranscriptError> {
        let response = self
            .client
            .get(url)
            .header("Accept-Language", "en-US")
            .send()
            .await
            .map_err(network_error)?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptError::RequestBlocked);
        }

        response
            .error_for_status()
            .map_err(network_error)?
            .text()
            .await
            .map_err(network_error)
    }

    async fn fetch_player(&self, video_id: &str, api_key: &str) -> std::result::Result<Value, TranscriptError> {
        let url = format!("{}/youtubei/v1/player?key={}", self.base_url, api_key);
        let body = json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION,
                }
            },
            "videoId": video_id,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptError::RequestBlocked);
        }

        response
            .error_for_status()
            .map_err(network_error)?
            .json()
            .await
            .map_err(|e| TranscriptError::Parse(format!("invalid player response: {}", e)))
    }
}

fn network_error(e: reqwest::Error) -> TranscriptError {
    TranscriptError::Network(e.to_string())
}

#[async_trait]
impl TranscriptSource for YouTubeTranscriptFetcher {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, video_id: &str, languages: &[String]) -> Result<Transcript> {
        let watch_url = format!("{}/watch?v={}", self.base_url, video_id);
        let html = self.get_text(&watch_url).await?;
        let api_key = extract_innertube_api_key(&html)?;

        let player = self.fetch_player(video_id, &api_key).await?;
        let tracks = caption_tracks(&player)?;
        debug!("Found {} caption tracks", tracks.len());

        let track = select_track(&tracks, languages)?;
        debug!(
            "Using caption track '{}' ({}, generated: {})",
            track.name, track.language_code, track.is_generated
        );

        let xml = self.get_text(&timedtext_url(&track.base_url)).await?;
        let transcript = Transcript::new(video_id, track.language_code.clone(), parse_timedtext(&xml)?);

        info!(
            "Fetched transcript - Segments: {}, Language: {}, Duration: {:.1}s",
            transcript.segments.len(),
            transcript.language_code,
            transcript.duration()
        );

        Ok(transcript)
    }
}
