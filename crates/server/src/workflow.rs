use std::sync::Arc;
use tracing::info;
use tubesum_common::{AppConfig, TubesumError};
use tubesum_llm::{LlmClient, SummarizeOptions, Summarizer, Summary};
use tubesum_transcript::{extract_video_id, Transcript, TranscriptSource};

/// Failure of a summarize run, tagged with the stage that failed
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Credential or model could not be resolved; nothing was fetched
    #[error("{0}")]
    Config(TubesumError),

    /// Video id or transcript retrieval failed; no LLM call was made
    #[error("Transcript error: {0}")]
    Transcript(TubesumError),

    /// An LLM call failed
    #[error("Summarization error: {0}")]
    Summarization(TubesumError),
}

impl WorkflowError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Config(_) => 400,
            Self::Transcript(_) => 400,
            Self::Summarization(_) => 500,
        }
    }
}

/// Fetched transcript of a requested video
#[derive(Debug)]
pub struct TranscribeResult {
    pub video_id: String,
    pub transcript: Transcript,
}

/// Final summary of a requested video
#[derive(Debug)]
pub struct SummarizeResult {
    pub video_id: String,
    pub summary: Summary,
}

/// Workflow executor: URL → transcript → summary
pub struct VideoWorkflow {
    config: AppConfig,
    llm: Arc<dyn LlmClient>,
    transcripts: Arc<dyn TranscriptSource>,
}

impl VideoWorkflow {
    /// Create new workflow executor
    pub fn new(
        config: AppConfig,
        llm: Arc<dyn LlmClient>,
        transcripts: Arc<dyn TranscriptSource>,
    ) -> Self {
        Self {
            config,
            llm,
            transcripts,
        }
    }

    /// Resolve the video id and fetch its transcript
    pub async fn transcribe(&self, youtube_url: &str) -> Result<TranscribeResult, TubesumError> {
        let video_id = extract_video_id(youtube_url)?;
        info!("Fetching transcript for video: {}", video_id);

        let transcript = self
            .transcripts
            .fetch(&video_id, &self.config.transcript_languages)
            .await?;

        Ok(TranscribeResult {
            video_id,
            transcript,
        })
    }

    /// Fetch the transcript and summarize it
    ///
    /// Request overrides take precedence over the configured credential and
    /// model. Both are checked before any network I/O.
    pub async fn summarize(
        &self,
        youtube_url: &str,
        api_key: Option<&str>,
        model: Option<&str>,
    ) -> Result<SummarizeResult, WorkflowError> {
        let credentials = self
            .config
            .resolve_llm(api_key, model)
            .map_err(WorkflowError::Config)?;

        let TranscribeResult {
            video_id,
            transcript,
        } = self
            .transcribe(youtube_url)
            .await
            .map_err(WorkflowError::Transcript)?;

        let text = transcript.text();
        info!(
            "Summarizing video {} - Transcript length: {} chars, Model: {}",
            video_id,
            text.chars().count(),
            credentials.model
        );

        let options = SummarizeOptions::new(credentials, self.config.max_chars)
            .with_concurrency(self.config.chunk_concurrency);
        let summary = Summarizer::new(self.llm.clone(), options)
            .summarize(&text)
            .await
            .map_err(WorkflowError::Summarization)?;

        info!(
            "Summary ready for video {} - {} chunks, {} chars",
            video_id,
            summary.chunk_count,
            summary.text.chars().count()
        );

        Ok(SummarizeResult { video_id, summary })
    }
}
