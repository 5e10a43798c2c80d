pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use config::{load_dotenv_files, AppConfig, LlmCredentials};
pub use error::{TranscriptError, TubesumError};
pub type Result<T> = std::result::Result<T, TubesumError>;
