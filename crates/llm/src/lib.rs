//! tubesum LLM integration
//!
//! Gemini API client, transcript chunking and map-reduce summarization

mod chunking;
mod client;
mod llm_trait;
mod prompts;
mod summarize;
mod types;

pub use chunking::{chunk_text, TextChunk};
pub use client::GeminiClient;
pub use llm_trait::LlmClient;
pub use prompts::{chunk_prompt, combine_prompt, CHUNK_INSTRUCTION, COMBINE_INSTRUCTION};
pub use summarize::{
    SummarizeOptions, Summarizer, CHUNK_MAX_OUTPUT_TOKENS, FINAL_MAX_OUTPUT_TOKENS, SUMMARY_TEMPERATURE,
};
pub use types::{GenerateRequest, ResponseEnvelope, Summary};
