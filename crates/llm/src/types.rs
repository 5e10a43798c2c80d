use serde::{Deserialize, Serialize};

/// One text-generation call
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// API credential
    pub api_key: String,

    /// Model name (e.g., "gemini-2.5-flash", "models/text-bison-001")
    pub model: String,

    /// Prompt text
    pub prompt: String,

    /// Maximum tokens to generate
    pub max_output_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

/// Gemini `generateContent` request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Single-turn request carrying one text prompt
    pub fn from_prompt(prompt: &str, max_output_tokens: u32, temperature: f32) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens,
                temperature,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Generation options
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

/// Successful response envelope
///
/// Variants are tried in declaration order, so a `candidates` list wins over
/// an `outputs` list. Any other object is a response without text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    Candidates { candidates: Vec<Candidate> },
    Outputs { outputs: Vec<Candidate> },
    Empty {},
}

impl ResponseEnvelope {
    /// Candidate list, whichever field carried it
    pub fn candidates(&self) -> &[Candidate] {
        match self {
            Self::Candidates { candidates } => candidates,
            Self::Outputs { outputs } => outputs,
            Self::Empty {} => &[],
        }
    }

    /// Text of the first candidate, empty when there is none
    pub fn text(&self) -> String {
        self.candidates()
            .first()
            .map(Candidate::text)
            .unwrap_or_default()
    }
}

/// One generated candidate
///
/// Precedence: `content`, then `text`, then `output`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Candidate {
    Content { content: CandidateContent },
    Text { text: String },
    Output { output: String },
    Unknown(serde_json::Value),
}

impl Candidate {
    pub fn text(&self) -> String {
        match self {
            Self::Content { content } => content.text(),
            Self::Text { text } => text.clone(),
            Self::Output { output } => output.clone(),
            Self::Unknown(_) => String::new(),
        }
    }
}

/// Candidate `content`: structured parts or a bare string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CandidateContent {
    Parts(Content),
    Plain(String),
}

impl CandidateContent {
    pub fn text(&self) -> String {
        match self {
            Self::Parts(content) => content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect(),
            Self::Plain(text) => text.clone(),
        }
    }
}

/// Provider error body (`{"error": {...}}`)
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<i64>,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub status: Option<String>,
}

/// Summarization result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Final combined summary
    pub text: String,

    /// Number of transcript chunks summarized
    pub chunk_count: usize,

    /// Model used
    pub model: String,
}

impl Summary {
    /// Create new summary
    pub fn new(text: String, chunk_count: usize, model: String) -> Self {
        Self {
            text,
            chunk_count,
            model,
        }
    }
}
