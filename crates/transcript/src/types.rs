use serde::{Deserialize, Serialize};

/// Single caption segment with timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Caption text
    pub text: String,

    /// Start time in seconds
    pub start: f32,

    /// Duration in seconds
    pub duration: f32,
}

impl TranscriptSegment {
    /// Create a new segment
    pub fn new(text: impl Into<String>, start: f32, duration: f32) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Fetched transcript of one video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// YouTube video id
    pub video_id: String,

    /// Language code of the caption track used
    pub language_code: String,

    /// Segments in playback order
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Create a new transcript
    pub fn new(
        video_id: impl Into<String>,
        language_code: impl Into<String>,
        segments: Vec<TranscriptSegment>,
    ) -> Self {
        Self {
            video_id: video_id.into(),
            language_code: language_code.into(),
            segments,
        }
    }

    /// Flatten segments into one line of text
    ///
    /// Each segment is trimmed with its newlines turned into spaces; empty
    /// segments are dropped and the rest joined by single spaces.
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|seg| seg.text.trim())
            .filter(|text| !text.is_empty())
            .map(|text| text.replace('\n', " "))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Get total duration
    pub fn duration(&self) -> f32 {
        self.segments
            .last()
            .map(|seg| seg.start + seg.duration)
            .unwrap_or(0.0)
    }
}

/// Caption track advertised by the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionTrack {
    /// Timed-text URL
    pub base_url: String,

    /// Language code (e.g., "en", "pt-BR")
    pub language_code: String,

    /// Human readable name
    pub name: String,

    /// Auto-generated (ASR) track
    pub is_generated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_joins_and_normalizes() {
        let transcript = Transcript::new(
            "abc123",
            "en",
            vec![
                TranscriptSegment::new("  hello\nthere ", 0.0, 1.5),
                TranscriptSegment::new("   ", 1.5, 0.5),
                TranscriptSegment::new("general kenobi", 2.0, 2.0),
            ],
        );

        assert_eq!(transcript.text(), "hello there general kenobi");
        assert_eq!(transcript.duration(), 4.0);
    }

    #[test]
    fn test_empty_transcript() {
        let transcript = Transcript::new("abc123", "en", Vec::new());
        assert_eq!(transcript.text(), "");
        assert_eq!(transcript.duration(), 0.0);
    }
}
