use std::sync::Arc;
use std::time::Duration;
use tubesum_common::{AppConfig, Result};
use tubesum_llm::{GeminiClient, LlmClient};
use tubesum_transcript::{TranscriptSource, YouTubeTranscriptFetcher};

use crate::workflow::VideoWorkflow;

/// Shared application state
///
/// Read-only after startup; every request builds its own summarizer.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Request workflow
    pub workflow: VideoWorkflow,
}

impl AppState {
    /// Create new application state with the Gemini and YouTube clients
    pub fn new(config: AppConfig) -> Result<Self> {
        let llm = GeminiClient::new(
            config.gemini_endpoint.clone(),
            Duration::from_secs(config.llm_timeout_secs),
        )?;
        let transcripts = YouTubeTranscriptFetcher::new(
            config.youtube_base_url.clone(),
            Duration::from_secs(config.transcript_timeout_secs),
        )?;

        Ok(Self::with_clients(config, Arc::new(llm), Arc::new(transcripts)))
    }

    /// Create application state around existing clients
    pub fn with_clients(
        config: AppConfig,
        llm: Arc<dyn LlmClient>,
        transcripts: Arc<dyn TranscriptSource>,
    ) -> Self {
        let workflow = VideoWorkflow::new(config.clone(), llm, transcripts);
        Self { config, workflow }
    }
}
