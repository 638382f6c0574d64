use anyhow::{Context, Result};

use vellum::{EditorConfig, GitHubClient};

/// Shared application state for CLI commands
pub struct App {
    pub config: EditorConfig,
    pub client: GitHubClient,
}

impl App {
    /// Build from an `owner/name` argument plus the environment.
    pub fn new(repo_arg: &str) -> Result<Self> {
        let (owner, repo) = repo_arg
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty())
            .context("repository must be given as owner/name")?;

        let config = EditorConfig::from_env(owner, repo);
        let client = config.client().context("failed to build API client")?;

        Ok(Self { config, client })
    }
}
