use serde::{Deserialize, Serialize};

use crate::github::{GitHubClient, GitHubError, DEFAULT_API_BASE};

/// Environment variable holding the personal access token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_PERSONAL_TOKEN";

/// Environment variable overriding the API root (GitHub Enterprise).
pub const API_BASE_ENV_VAR: &str = "VELLUM_API_BASE";

/// Editor configuration for one repository target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// API root.
    pub api_base: String,
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name; the edited branch is `heads/<repo>`.
    pub repo: String,
    /// Personal access token. Optional for public reads; any write
    /// without one fails with the API's own authentication error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl EditorConfig {
    /// Build a configuration from the environment for one repository.
    pub fn from_env(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            api_base: std::env::var(API_BASE_ENV_VAR)
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            owner: owner.into(),
            repo: repo.into(),
            token: std::env::var(TOKEN_ENV_VAR).ok(),
        }
    }

    /// Build an API client for this configuration.
    pub fn client(&self) -> Result<GitHubClient, GitHubError> {
        GitHubClient::with_base_url(self.api_base.clone(), self.token.clone())
    }
}
