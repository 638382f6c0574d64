use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::content::ParseError;

pub(crate) const DEFAULT_API_BASE: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("vellum/", env!("CARGO_PKG_VERSION"));

/// Client handle for the GitHub REST API.
///
/// Callers construct one with their credential and pass it to each
/// operation; there is no process-wide client state.
pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx response, carrying the API's own status and message.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("reference not found: {0}")]
    RefNotFound(String),
    #[error("front matter parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("content decode error: {0}")]
    Decode(String),
    #[error("unexpected response body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("empty file batch")]
    EmptyBatch,
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl GitHubClient {
    /// Create a client against api.github.com.
    pub fn new(token: Option<String>) -> Result<Self, GitHubError> {
        Self::with_base_url(DEFAULT_API_BASE.to_string(), token)
    }

    /// Create a client against a custom API root (GitHub Enterprise, tests).
    pub fn with_base_url(base_url: String, token: Option<String>) -> Result<Self, GitHubError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(GitHubError::InvalidUrl(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Accept", "application/vnd.github+json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GitHubError> {
        self.send(self.prepare(self.http.get(self.url(path)))).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, GitHubError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.prepare(self.http.post(self.url(path))).json(body))
            .await
    }

    pub(crate) async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, GitHubError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.prepare(self.http.patch(self.url(path))).json(body))
            .await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, GitHubError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(api_error(status, body))
    }
}

/// Map a non-2xx response to `Api { status, message }`, surfacing the API's
/// message verbatim. GitHub error bodies are JSON with a `message` field;
/// anything else falls back to the raw body text.
fn api_error(status: StatusCode, body: String) -> GitHubError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or(body);

    GitHubError::Api {
        status: status.as_u16(),
        message,
    }
}
