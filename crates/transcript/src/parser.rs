//! # YouTube page and caption parsing
//!
//! Pure functions over the watch page HTML, the innertube player response and
//! the timed-text XML payload. Network access lives in [`crate::fetcher`].

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tubesum_common::TranscriptError;

use crate::types::{CaptionTrack, TranscriptSegment};

static INNERTUBE_API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("valid regex")
});

static TEXT_ELEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<text\b([^>]*?)(?:/>|>(.*?)</text>)").expect("valid regex")
});

static START_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bstart="([^"]*)""#).expect("valid regex"));

static DUR_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bdur="([^"]*)""#).expect("valid regex"));

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Pull the innertube API key out of a watch page
///
/// # Returns
/// * `Err(RequestBlocked)` if YouTube served a captcha instead of the page.
/// * `Err(Parse)` if the key is missing.
pub fn extract_innertube_api_key(html: &str) -> Result<String, TranscriptError> {
    if let Some(caps) = INNERTUBE_API_KEY_RE.captures(html) {
        return Ok(caps[1].to_string());
    }

    if html.contains("class=\"g-recaptcha\"") {
        return Err(TranscriptError::RequestBlocked);
    }

    Err(TranscriptError::Parse(
        "INNERTUBE_API_KEY not found in watch page".to_string(),
    ))
}

/// List the caption tracks of an innertube player response
#[tracing::instrument(skip(player))]
pub fn caption_tracks(player: &Value) -> Result<Vec<CaptionTrack>, TranscriptError> {
    assert_playable(&player["playabilityStatus"])?;

    let tracks = player["captions"]["playerCaptionsTracklistRenderer"]["captionTracks"]
        .as_array()
        .ok_or(TranscriptError::Disabled)?;

    let tracks: Vec<CaptionTrack> = tracks.iter().filter_map(parse_track).collect();
    if tracks.is_empty() {
        return Err(TranscriptError::Disabled);
    }

    Ok(tracks)
}

fn assert_playable(status: &Value) -> Result<(), TranscriptError> {
    match status["status"].as_str() {
        None | Some("OK") => Ok(()),
        Some(status_code) => {
            let reason = status["reason"].as_str().unwrap_or(status_code);
            if status_code == "LOGIN_REQUIRED" && reason.contains("not a bot") {
                return Err(TranscriptError::RequestBlocked);
            }
            Err(TranscriptError::VideoUnavailable(reason.to_string()))
        }
    }
}

fn parse_track(track: &Value) -> Option<CaptionTrack> {
    let base_url = track["baseUrl"].as_str()?;
    let language_code = track["languageCode"].as_str()?;
    let name = track["name"]["simpleText"]
        .as_str()
        .or_else(|| track["name"]["runs"][0]["text"].as_str())
        .unwrap_or(language_code);

    Some(CaptionTrack {
        base_url: base_url.to_string(),
        language_code: language_code.to_string(),
        name: name.to_string(),
        is_generated: track["kind"].as_str() == Some("asr"),
    })
}

/// Pick the track for the first requested language that has one
///
/// Manually created tracks win over auto-generated ones of the same language.
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    languages: &[String],
) -> Result<&'a CaptionTrack, TranscriptError> {
    for language in languages {
        let manual = tracks
            .iter()
            .find(|t| !t.is_generated && &t.language_code == language);
        let generated = || {
            tracks
                .iter()
                .find(|t| t.is_generated && &t.language_code == language)
        };

        if let Some(track) = manual.or_else(generated) {
            return Ok(track);
        }
    }

    Err(TranscriptError::NotFound {
        requested: languages.to_vec(),
        available: tracks.iter().map(|t| t.language_code.clone()).collect(),
    })
}

/// Drop any `fmt` parameter so the default XML format is served
pub fn timedtext_url(base_url: &str) -> String {
    let Some((path, query)) = base_url.split_once('?') else {
        return base_url.to_string();
    };

    let query: Vec<&str> = query
        .split('&')
        .filter(|param| !param.is_empty() && !param.starts_with("fmt="))
        .collect();

    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query.join("&"))
    }
}

/// Parse a timed-text XML document into segments
///
/// Inline formatting tags are stripped and entities decoded (the payload is
/// escaped twice: once as XML, once as HTML).
pub fn parse_timedtext(xml: &str) -> Result<Vec<TranscriptSegment>, TranscriptError> {
    if !xml.contains("<transcript") && !xml.contains("<timedtext") {
        return Err(TranscriptError::Parse(
            "timed-text payload is not a transcript document".to_string(),
        ));
    }

    let mut segments = Vec::new();

    for caps in TEXT_ELEMENT_RE.captures_iter(xml) {
        let attrs = &caps[1];
        let start = attr_seconds(&START_ATTR_RE, attrs);
        let duration = attr_seconds(&DUR_ATTR_RE, attrs);

        let raw = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        let text = decode_entities(&TAG_RE.replace_all(&decode_entities(raw), ""));

        if text.trim().is_empty() {
            continue;
        }

        segments.push(TranscriptSegment::new(text, start, duration));
    }

    Ok(segments)
}

fn attr_seconds(re: &Regex, attrs: &str) -> f32 {
    re.captures(attrs)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0.0)
}

/// Decode named and numeric character references
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}
