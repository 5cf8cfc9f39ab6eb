use std::sync::LazyLock;

use regex::Regex;

/// Host fragments the backend knows how to process.
static MEDIA_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtube\.com/|youtu\.be/").expect("valid host pattern"));

static VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtu\.be/|[?&]v=|/shorts/)([A-Za-z0-9_-]+)").expect("valid video id pattern")
});

/// Cheap client-side check; the backend validates properly.
pub fn is_recognized_media_url(input: &str) -> bool {
    MEDIA_HOST.is_match(input)
}

/// Extracts the video id for log context, if one is present.
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Sanitize filename to remove invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    let cleaned = filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            _ => c,
        })
        .collect::<String>();

    let trimmed = cleaned.trim().trim_matches(|c| c == '.' || c == ' ');
    if trimmed.is_empty() {
        "download".to_string()
    } else {
        trimmed.to_string()
    }
}
