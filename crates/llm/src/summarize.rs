use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, info};
use tubesum_common::{LlmCredentials, Result, TubesumError};

use crate::chunking::chunk_text;
use crate::llm_trait::LlmClient;
use crate::prompts::{chunk_prompt, combine_prompt};
use crate::types::{GenerateRequest, Summary};

/// Output budget of each per-chunk call
pub const CHUNK_MAX_OUTPUT_TOKENS: u32 = 800;

/// Output budget of the combining call
pub const FINAL_MAX_OUTPUT_TOKENS: u32 = 600;

/// Low temperature keeps summaries stable between runs
pub const SUMMARY_TEMPERATURE: f32 = 0.2;

/// Per-request summarization settings
#[derive(Debug, Clone)]
pub struct SummarizeOptions {
    /// Credential and model for every call
    pub credentials: LlmCredentials,

    /// Maximum characters per chunk
    pub max_chars: usize,

    /// Maximum in-flight chunk calls (1 = sequential)
    pub concurrency: usize,
}

impl SummarizeOptions {
    /// Sequential summarization
    pub fn new(credentials: LlmCredentials, max_chars: usize) -> Self {
        Self {
            credentials,
            max_chars,
            concurrency: 1,
        }
    }

    /// Allow up to `concurrency` chunk calls at once
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Summarizer for long transcripts using map-reduce
pub struct Summarizer {
    client: Arc<dyn LlmClient>,
    options: SummarizeOptions,
}

impl Summarizer {
    /// Create new summarizer
    pub fn new(client: Arc<dyn LlmClient>, options: SummarizeOptions) -> Self {
        Self { client, options }
    }

    /// Summarize a transcript
    ///
    /// One call per chunk, then one combining call. Chunk summaries keep
    /// chunk order even when calls overlap. The first failing chunk aborts
    /// the run and no combining call is made.
    pub async fn summarize(&self, transcript: &str) -> Result<Summary> {
        info!(
            "Starting summarization - Text length: {} chars, Model: {}",
            transcript.chars().count(),
            self.options.credentials.model
        );

        let chunks = chunk_text(transcript, self.options.max_chars);
        let total = chunks.len();
        info!(
            "Split text into {} chunks (max {} chars, concurrency {})",
            total, self.options.max_chars, self.options.concurrency
        );

        // Map phase
        let chunk_summaries: Vec<String> = stream::iter(chunks.iter().enumerate())
            .map(|(i, chunk)| self.summarize_chunk(i + 1, total, &chunk.text))
            .buffered(self.options.concurrency.max(1))
            .try_collect()
            .await?;

        // Reduce phase
        let final_prompt = combine_prompt(&chunk_summaries);
        info!("Combining {} chunk summaries - Prompt length: {} chars", total, final_prompt.chars().count());

        let text = self.generate(final_prompt, FINAL_MAX_OUTPUT_TOKENS).await?;

        Ok(Summary::new(text, total, self.options.credentials.model.clone()))
    }

    /// Summarize a single chunk
    async fn summarize_chunk(&self, index: usize, total: usize, text: &str) -> Result<String> {
        debug!("Summarizing chunk {}/{} - Length: {} chars", index, total, text.chars().count());

        self.generate(chunk_prompt(index, text), CHUNK_MAX_OUTPUT_TOKENS)
            .await
            .map_err(|e| TubesumError::chunk_summary(index, total, e))
    }

    async fn generate(&self, prompt: String, max_output_tokens: u32) -> Result<String> {
        let request = GenerateRequest {
            api_key: self.options.credentials.api_key.clone(),
            model: self.options.credentials.model.clone(),
            prompt,
            max_output_tokens,
            temperature: SUMMARY_TEMPERATURE,
        };

        self.client.generate(request).await
    }
}
