use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::OutputFormat;

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000/";

/// Body of `POST /process`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRequest {
    pub url: String,
    pub format: OutputFormat,
}

/// Successful reply from `/process`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResponse {
    pub download_url: String,
    pub filename: String,
    pub message: Option<String>,
}

/// Every field the backend may send, success or failure.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProcessBody {
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BACKEND_URL).expect("default backend URL is valid"),
        }
    }
}

impl ApiConfig {
    pub fn new(mut base_url: Url) -> Self {
        // `Url::join` drops the last segment unless the path ends in a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { base_url }
    }
}
