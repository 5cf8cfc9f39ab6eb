use futures::Stream;
use futures::TryStreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::models::{ApiConfig, ProcessBody, ProcessRequest, ProcessResponse};

const PROCESS_PATH: &str = "process";
const JSON: &str = "application/json";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Non-2xx reply, or a reply carrying an `error` field.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Clone)]
pub struct ProcessClient {
    config: ApiConfig,
    http: Client,
}

impl ProcessClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Resolves a `download_url` from `/process` against the backend.
    /// Absolute URLs pass through unchanged.
    pub fn resolve_download_url(&self, raw: &str) -> Result<Url> {
        Ok(self.config.base_url.join(raw)?)
    }

    /// POST /process
    pub async fn process(&self, request: &ProcessRequest) -> Result<ProcessResponse> {
        let endpoint = self.config.base_url.join(PROCESS_PATH)?;
        tracing::debug!(%endpoint, format = %request.format, "Submitting process request");

        let response = self
            .http
            .post(endpoint)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        Self::interpret(status, &text)
    }

    fn interpret(status: reqwest::StatusCode, text: &str) -> Result<ProcessResponse> {
        let parsed = serde_json::from_str::<ProcessBody>(text);

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|body| body.error)
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| format!("Server error: {}", status.as_u16()));
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = parsed
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))?;

        if let Some(message) = body.error.filter(|e| !e.trim().is_empty()) {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        match (body.download_url, body.filename) {
            (Some(download_url), Some(filename)) if !download_url.is_empty() => {
                Ok(ProcessResponse {
                    download_url,
                    filename,
                    message: body.message,
                })
            }
            _ => Err(ApiError::InvalidResponse(
                "missing download_url or filename".to_string(),
            )),
        }
    }

    /// Streams a produced file.
    /// Returns (total_size, stream)
    pub async fn download_file_stream(
        &self,
        download_url: &Url,
    ) -> Result<(Option<u64>, impl Stream<Item = Result<bytes::Bytes>>)> {
        let response = self.http.get(download_url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProcessBody>(&text)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("Server error: {}", status.as_u16()));
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let total_size = response.content_length();
        let stream = response.bytes_stream().map_err(ApiError::RequestError);

        Ok((total_size, stream))
    }
}
