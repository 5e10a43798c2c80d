use serde::{Deserialize, Serialize};

/// Body of `/transcribe` and `/summarize`
#[derive(Debug, Clone, Deserialize)]
pub struct UrlRequest {
    /// Watch URL, short URL or bare video id
    pub youtube_url: String,

    /// Gemini API key override
    #[serde(default)]
    pub api_key: Option<String>,

    /// Gemini model override
    #[serde(default)]
    pub model: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Transcribe response
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscribeResponse {
    pub video_id: String,
    pub transcript: String,
}

/// Summarize response
#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub video_id: String,
    pub summary: String,
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
