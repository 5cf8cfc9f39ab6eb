use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Output format bound to one action control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Video,
    Audio,
    Mp3,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Video, OutputFormat::Audio, OutputFormat::Mp3];

    /// Tag sent to the backend and used in status messages.
    pub fn tag(self) -> &'static str {
        match self {
            OutputFormat::Video => "video",
            OutputFormat::Audio => "audio",
            OutputFormat::Mp3 => "mp3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Video => "Download Video",
            OutputFormat::Audio => "Download Audio",
            OutputFormat::Mp3 => "Download MP3",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
    Success,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// A file the backend produced, with its download URL already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    pub url: Url,
    pub filename: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Dark,
    #[default]
    Light,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Dark => "dark",
            ThemePreference::Light => "light",
        }
    }

    /// Only the literal strings `"dark"` and `"light"` are recognised.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(ThemePreference::Dark),
            "light" => Some(ThemePreference::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Dark => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemePreference::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_serializes_as_tag() {
        assert_eq!(serde_json::to_string(&OutputFormat::Mp3).unwrap(), "\"mp3\"");
        assert_eq!(serde_json::to_string(&OutputFormat::Video).unwrap(), "\"video\"");
        for format in OutputFormat::ALL {
            assert_eq!(format.to_string(), format.tag());
        }
    }

    #[test]
    fn test_theme_preference_parse() {
        assert_eq!(ThemePreference::parse("dark"), Some(ThemePreference::Dark));
        assert_eq!(ThemePreference::parse("light"), Some(ThemePreference::Light));
        assert_eq!(ThemePreference::parse("Dark"), None);
        assert_eq!(ThemePreference::parse(""), None);
        assert_eq!(ThemePreference::Dark.toggled(), ThemePreference::Light);
    }
}
