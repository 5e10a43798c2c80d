//! tubesum transcript retrieval
//!
//! YouTube video-ID parsing and caption fetching

pub mod fetcher;
pub mod parser;
pub mod types;
pub mod video_id;

// Re-export main types
pub use fetcher::{TranscriptSource, YouTubeTranscriptFetcher};
pub use types::{CaptionTrack, Transcript, TranscriptSegment};
pub use video_id::extract_video_id;
