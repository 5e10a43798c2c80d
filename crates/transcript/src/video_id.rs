use tubesum_common::{Result, TubesumError};

/// Extract the video id from a YouTube URL
///
/// Accepts watch URLs (`v=` query parameter), short `youtu.be/<id>` URLs and
/// bare ids. The id ends at the next `&` or `?`.
pub fn extract_video_id(url: &str) -> Result<String> {
    let url = url.trim();

    let id = if let Some((_, rest)) = url.split_once("v=") {
        rest
    } else if let Some((_, rest)) = url.split_once("youtu.be/") {
        rest
    } else {
        url
    };

    let id = id
        .split(|c: char| c == '&' || c == '?')
        .next()
        .unwrap_or_default()
        .trim();

    if id.is_empty() {
        return Err(TubesumError::invalid_input(format!(
            "Could not extract a video id from '{}'",
            url
        )));
    }

    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123&t=5").unwrap(),
            "abc123"
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(extract_video_id("https://youtu.be/xyz789?t=3").unwrap(), "xyz789");
    }

    #[test]
    fn test_bare_video_id() {
        assert_eq!(extract_video_id("  dQw4w9WgXcQ \n").unwrap(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_watch_url_with_leading_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            extract_video_id("   "),
            Err(TubesumError::InvalidInput(_))
        ));
        assert!(extract_video_id("https://youtu.be/?t=3").is_err());
    }
}
