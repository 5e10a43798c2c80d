/// Text chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Chunk text (trimmed)
    pub text: String,

    /// Start offset in the trimmed source, in characters
    pub start: usize,

    /// End offset (exclusive) in the trimmed source, in characters
    pub end: usize,
}

/// Split text into chunks of at most `max_chars` characters
///
/// A chunk ends one past the last `.` inside its window when there is one
/// after the window start; otherwise it is cut at exactly `max_chars`. The
/// last chunk always runs to the end of the text. Short (or empty) text comes
/// back as a single chunk.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<TextChunk> {
    let max_chars = max_chars.max(1);
    let text = text.trim();
    let chars: Vec<char> = text.chars().collect();
    let text_len = chars.len();

    if text_len <= max_chars {
        return vec![TextChunk {
            text: text.to_string(),
            start: 0,
            end: text_len,
        }];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text_len {
        let mut end = (start + max_chars).min(text_len);

        // Pull the cut back to a sentence boundary
        if end < text_len {
            if let Some(offset) = chars[start..end].iter().rposition(|&c| c == '.') {
                if offset > 0 {
                    end = start + offset + 1;
                }
            }
        }

        let chunk: String = chars[start..end].iter().collect();
        chunks.push(TextChunk {
            text: chunk.trim().to_string(),
            start,
            end,
        });

        start = end;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ws(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_chunk_short_text() {
        let text = "This is a short text.";
        let chunks = chunk_text(text, 100);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
    }

    #[test]
    fn test_chunk_exact_limit_is_single() {
        let text = "a".repeat(6000);
        assert_eq!(chunk_text(&text, 6000).len(), 1);
        assert_eq!(chunk_text(&"a".repeat(6001), 6000).len(), 2);
    }

    #[test]
    fn test_chunk_trims_input() {
        let chunks = chunk_text("   padded.  \n", 100);
        assert_eq!(chunks[0].text, "padded.");
    }

    #[test]
    fn test_chunk_empty_text() {
        let chunks = chunk_text("", 100);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "");
    }

    #[test]
    fn test_boundary_lands_after_period() {
        let mut chars = vec!['a'; 12000];
        chars[5990] = '.';
        let text: String = chars.into_iter().collect();

        let chunks = chunk_text(&text, 6000);
        assert_eq!(chunks[0].end, 5991);
        assert_eq!(chunks[0].text.len(), 5991);
        assert!(chunks[0].text.ends_with('.'));
        assert_eq!(chunks[1].start, 5991);
    }

    #[test]
    fn test_hard_cut_without_period() {
        let text = "a".repeat(250);
        let chunks = chunk_text(&text, 100);
        let bounds: Vec<(usize, usize)> = chunks.iter().map(|c| (c.start, c.end)).collect();
        assert_eq!(bounds, vec![(0, 100), (100, 200), (200, 250)]);
    }

    #[test]
    fn test_period_at_window_start_is_ignored() {
        // The only period sits at the window start, so the cut stays hard
        let text = format!(".{}", "b".repeat(30));
        let chunks = chunk_text(&text, 10);
        assert_eq!(chunks[0].end, 10);
        assert_eq!(chunks[0].text, format!(".{}", "b".repeat(9)));
        assert_eq!(chunks[1].start, 10);
    }

    #[test]
    fn test_chunks_cover_text_in_order() {
        let text = "First sentence. Second sentence is longer. Third. Fourth sentence here. \
                    Fifth one without much. Sixth and last sentence of this text.";
        let chunks = chunk_text(text, 25);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.text.chars().count() <= 25));
        for pair in chunks.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(chunks.last().unwrap().end, text.chars().count());

        let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(strip_ws(&joined), strip_ws(text));
    }

    #[test]
    fn test_multibyte_text() {
        let text = "안녕하세요. 반갑습니다. 좋은 하루 되세요.";
        let chunks = chunk_text(text, 8);

        assert!(chunks.len() > 1);
        assert_eq!(chunks[0].text, "안녕하세요.");
        let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(strip_ws(&joined), strip_ws(text));
    }

    #[test]
    fn test_deterministic() {
        let text = "One. Two. Three. Four. Five. Six. Seven. Eight. Nine. Ten.".repeat(20);
        assert_eq!(chunk_text(&text, 37), chunk_text(&text, 37));
    }
}
