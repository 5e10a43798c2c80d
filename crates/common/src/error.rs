/// Transcript retrieval failures
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    /// The uploader turned captions off
    #[error("Transcripts are disabled for this video")]
    Disabled,

    /// Captions exist, but none in the requested languages
    #[error("No transcript found for this video in languages {requested:?} (available: {available:?})")]
    NotFound {
        requested: Vec<String>,
        available: Vec<String>,
    },

    /// Video is private, removed, age-gated, ...
    #[error("Video is unavailable: {0}")]
    VideoUnavailable(String),

    /// YouTube answered with a captcha page
    #[error("YouTube is blocking requests from this IP")]
    RequestBlocked,

    /// Transport or HTTP status failure
    #[error("Network error while fetching transcript: {0}")]
    Network(String),

    /// Page or caption payload could not be understood
    #[error("Failed to parse transcript data: {0}")]
    Parse(String),
}

/// tubesum error types
#[derive(Debug, thiserror::Error)]
pub enum TubesumError {
    /// Configuration error (missing credential/model, bad settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transcript retrieval error
    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    /// LLM call failed (transport, HTTP status or response shape)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// A per-chunk summary call failed
    #[error("Chunk {chunk}/{total} failed: {source}")]
    ChunkSummary {
        chunk: usize,
        total: usize,
        #[source]
        source: Box<TubesumError>,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TubesumError {
    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create external service error
    pub fn external_service<S: Into<String>>(msg: S) -> Self {
        Self::ExternalService(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Wrap an error raised while summarizing chunk `chunk` of `total`
    pub fn chunk_summary(chunk: usize, total: usize, source: TubesumError) -> Self {
        Self::ChunkSummary {
            chunk,
            total,
            source: Box::new(source),
        }
    }
}

impl TubesumError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Config(_) => 400,
            Self::Transcript(_) => 400,
            Self::InvalidInput(_) => 400,
            Self::ExternalService(_) => 500,
            Self::ChunkSummary { .. } => 500,
            Self::Io(_) => 500,
            Self::Json(_) => 500,
            Self::Other(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(TubesumError::config("no key").status_code(), 400);
        assert_eq!(TubesumError::from(TranscriptError::Disabled).status_code(), 400);
        assert_eq!(TubesumError::external_service("boom").status_code(), 500);
        assert_eq!(
            TubesumError::chunk_summary(2, 3, TubesumError::external_service("boom")).status_code(),
            500
        );
    }

    #[test]
    fn test_transcript_messages() {
        let disabled = TubesumError::from(TranscriptError::Disabled);
        assert_eq!(disabled.to_string(), "Transcripts are disabled for this video");

        let not_found = TranscriptError::NotFound {
            requested: vec!["en".to_string()],
            available: vec!["de".to_string()],
        };
        assert!(not_found.to_string().contains("No transcript found"));
        assert!(not_found.to_string().contains("\"de\""));
    }

    #[test]
    fn test_chunk_summary_names_chunk() {
        let err = TubesumError::chunk_summary(2, 5, TubesumError::external_service("HTTP 503"));
        let msg = err.to_string();
        assert!(msg.starts_with("Chunk 2/5 failed"));
        assert!(msg.contains("HTTP 503"));
    }
}
