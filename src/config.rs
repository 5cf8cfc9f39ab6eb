use std::path::PathBuf;

use url::Url;

use crate::api::models::ApiConfig;
use crate::domain::ThemePreference;

pub const BACKEND_URL_VAR: &str = "MEDIA_GRABBER_BACKEND_URL";
pub const PREFERENCES_VAR: &str = "MEDIA_GRABBER_PREFERENCES";
pub const COLOR_SCHEME_VAR: &str = "MEDIA_GRABBER_COLOR_SCHEME";

const APP_DIR: &str = "media-grabber";
const PREFERENCES_FILE: &str = "preferences.json";

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub preferences_path: Option<PathBuf>,
    pub forced_color_scheme: Option<ThemePreference>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            preferences_path: default_preferences_path(),
            forced_color_scheme: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(BACKEND_URL_VAR) {
            match Url::parse(raw.trim()) {
                Ok(base_url) => config.api = ApiConfig::new(base_url),
                Err(e) => tracing::warn!(
                    "Ignoring {}={:?}: {}; using {}",
                    BACKEND_URL_VAR,
                    raw,
                    e,
                    config.api.base_url
                ),
            }
        }

        if let Some(path) = lookup(PREFERENCES_VAR).filter(|p| !p.trim().is_empty()) {
            config.preferences_path = Some(PathBuf::from(path));
        }

        config.forced_color_scheme = lookup(COLOR_SCHEME_VAR)
            .and_then(|value| ThemePreference::parse(value.trim().to_lowercase().as_str()));

        config
    }
}

fn default_preferences_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(PREFERENCES_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.api.base_url.as_str(), "http://127.0.0.1:5000/");
        assert_eq!(config.forced_color_scheme, None);
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (BACKEND_URL_VAR, "https://grabber.example.com"),
            (PREFERENCES_VAR, "/tmp/prefs.json"),
            (COLOR_SCHEME_VAR, "Dark"),
        ]));
        assert_eq!(config.api.base_url.as_str(), "https://grabber.example.com/");
        assert_eq!(config.preferences_path, Some(PathBuf::from("/tmp/prefs.json")));
        assert_eq!(config.forced_color_scheme, Some(ThemePreference::Dark));
    }

    #[test]
    fn test_invalid_backend_url_keeps_default() {
        let config = AppConfig::from_lookup(lookup(&[(BACKEND_URL_VAR, "not a url")]));
        assert_eq!(config.api.base_url.as_str(), "http://127.0.0.1:5000/");
    }
}
