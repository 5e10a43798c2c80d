//! Prompt templates for summarization

/// Instruction prepended to every transcript chunk
pub const CHUNK_INSTRUCTION: &str =
    "Summarize the following transcript in concise bullet points (5-10) and a short 2-sentence summary.";

/// Instruction prepended to the joined chunk summaries
pub const COMBINE_INSTRUCTION: &str = "You are a concise summarizer. Combine the following chunk summaries into: 1) 6 bullet points capturing the key ideas, and 2) a single 2-sentence overall summary.";

/// Separator between chunk summaries in the combining prompt
pub const SUMMARY_SEPARATOR: &str = "\n\n";

/// Prompt for chunk summarization
///
/// `index` is 1-based.
pub fn chunk_prompt(index: usize, chunk: &str) -> String {
    format!("{}\n\nChunk {}:\n{}", CHUNK_INSTRUCTION, index, chunk)
}

/// Prompt for the combining call over all chunk summaries
pub fn combine_prompt(chunk_summaries: &[String]) -> String {
    format!(
        "{}\n\n{}",
        COMBINE_INSTRUCTION,
        chunk_summaries.join(SUMMARY_SEPARATOR)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_prompt() {
        let prompt = chunk_prompt(3, "some words");
        assert!(prompt.starts_with(CHUNK_INSTRUCTION));
        assert!(prompt.ends_with("\n\nChunk 3:\nsome words"));
    }

    #[test]
    fn test_combine_prompt() {
        let prompt = combine_prompt(&["one".to_string(), "two".to_string()]);
        assert_eq!(prompt, format!("{}\n\none\n\ntwo", COMBINE_INSTRUCTION));
    }
}
