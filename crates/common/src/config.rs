use crate::error::TubesumError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.youtube.com";
pub const DEFAULT_MAX_CHARS: usize = 6000;

/// Environment files, highest precedence first
pub const DOTENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Load `.env.local`, then `.env`, from `dir`
///
/// Variables that are already set are never overwritten, so the process
/// environment beats `.env.local`, which beats `.env`. Returns the files
/// that were loaded.
pub fn load_dotenv_files(dir: &Path) -> Vec<PathBuf> {
    DOTENV_FILES
        .iter()
        .map(|name| dir.join(name))
        .filter(|path| path.is_file() && dotenv::from_path(path).is_ok())
        .collect()
}

/// tubesum application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini API key used when a request carries none
    pub gemini_api_key: Option<String>,

    /// Gemini model used when a request carries none
    pub gemini_model: Option<String>,

    /// Gemini REST endpoint (without trailing slash)
    pub gemini_endpoint: String,

    /// Maximum characters per transcript chunk
    pub max_chars: usize,

    /// Maximum in-flight chunk summary calls per request
    pub chunk_concurrency: usize,

    /// Timeout for a single LLM call, in seconds
    pub llm_timeout_secs: u64,

    /// Caption language preference, most preferred first
    pub transcript_languages: Vec<String>,

    /// Timeout for a single YouTube request, in seconds
    pub transcript_timeout_secs: u64,

    /// YouTube base URL
    pub youtube_base_url: String,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log level
    pub log_level: String,

    /// Log directory (console only when unset)
    pub log_dir: Option<PathBuf>,
}

/// Credential and model resolved for one summarization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmCredentials {
    pub api_key: String,
    pub model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: None,
            gemini_endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            max_chars: DEFAULT_MAX_CHARS,
            chunk_concurrency: 1,
            llm_timeout_secs: 120,
            transcript_languages: vec!["en".to_string()],
            transcript_timeout_secs: 30,
            youtube_base_url: DEFAULT_YOUTUBE_BASE_URL.to_string(),
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, TubesumError> {
        // Load .env.local / .env from the working directory (ignore if missing)
        if let Ok(cwd) = std::env::current_dir() {
            load_dotenv_files(&cwd);
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TubesumError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let config = Self {
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL"),
            gemini_endpoint: get("GEMINI_ENDPOINT")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.gemini_endpoint),
            max_chars: Self::parse_number(get("GEMINI_MAX_CHARS"), "GEMINI_MAX_CHARS")?
                .unwrap_or(defaults.max_chars),
            chunk_concurrency: Self::parse_number(get("CHUNK_CONCURRENCY"), "CHUNK_CONCURRENCY")?
                .unwrap_or(defaults.chunk_concurrency),
            llm_timeout_secs: Self::parse_number(get("LLM_TIMEOUT_SECS"), "LLM_TIMEOUT_SECS")?
                .unwrap_or(defaults.llm_timeout_secs),
            transcript_languages: get("TRANSCRIPT_LANGUAGES")
                .map(|s| Self::parse_languages(&s))
                .unwrap_or(defaults.transcript_languages),
            transcript_timeout_secs: Self::parse_number(
                get("TRANSCRIPT_TIMEOUT_SECS"),
                "TRANSCRIPT_TIMEOUT_SECS",
            )?
            .unwrap_or(defaults.transcript_timeout_secs),
            youtube_base_url: get("YOUTUBE_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.youtube_base_url),
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: Self::parse_number(get("SERVER_PORT"), "SERVER_PORT")?
                .unwrap_or(defaults.server_port),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: get("LOG_DIR").map(PathBuf::from),
        };

        config.validate()?;

        Ok(config)
    }

    fn parse_number<T: std::str::FromStr>(
        value: Option<String>,
        key: &str,
    ) -> Result<Option<T>, TubesumError> {
        value
            .map(|v| {
                v.parse::<T>().map_err(|_| {
                    TubesumError::config(format!("{} must be a non-negative integer, got '{}'", key, v))
                })
            })
            .transpose()
    }

    fn parse_languages(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect()
    }

    /// Resolve the credential and model for one request
    ///
    /// Non-empty request overrides win over the configured values.
    pub fn resolve_llm(
        &self,
        api_key: Option<&str>,
        model: Option<&str>,
    ) -> Result<LlmCredentials, TubesumError> {
        let pick = |over: Option<&str>, configured: &Option<String>| {
            over.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .or_else(|| configured.clone())
        };

        let api_key = pick(api_key, &self.gemini_api_key).ok_or_else(|| {
            TubesumError::config(
                "Gemini API key not set. Provide api_key in the request or set GEMINI_API_KEY.",
            )
        })?;
        let model = pick(model, &self.gemini_model).ok_or_else(|| {
            TubesumError::config(
                "Gemini model not set. Provide model in the request or set GEMINI_MODEL.",
            )
        })?;

        Ok(LlmCredentials { api_key, model })
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), TubesumError> {
        if self.max_chars == 0 {
            return Err(TubesumError::config("GEMINI_MAX_CHARS must be greater than 0"));
        }

        if self.chunk_concurrency == 0 {
            return Err(TubesumError::config("CHUNK_CONCURRENCY must be greater than 0"));
        }

        for (name, url) in [
            ("GEMINI_ENDPOINT", &self.gemini_endpoint),
            ("YOUTUBE_BASE_URL", &self.youtube_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TubesumError::config(format!(
                    "{} must start with http:// or https://",
                    name
                )));
            }
        }

        if self.transcript_languages.is_empty() {
            return Err(TubesumError::config("TRANSCRIPT_LANGUAGES cannot be empty"));
        }

        if self.server_port == 0 {
            return Err(TubesumError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}
