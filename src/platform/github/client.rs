use async_trait::async_trait;
use octocrab::Octocrab;

use crate::config::{GitHubConfig, GITHUB_TOKEN_VAR};
use crate::error::{AppError, Result};
use crate::platform::types::*;
use crate::platform::Platform;

pub struct GitHubPlatform {
    config: GitHubConfig,
}

impl GitHubPlatform {
    pub fn new(config: &GitHubConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn token(&self) -> Result<&str> {
        self.config.token.as_deref().ok_or_else(|| {
            AppError::Config(format!("{GITHUB_TOKEN_VAR} environment variable is not set"))
        })
    }

    /// Get an octocrab instance authenticated with the personal token.
    fn client(&self) -> Result<Octocrab> {
        let token = self.token()?;
        Octocrab::builder()
            .base_uri(self.config.api_url.as_str())
            .map_err(|e| AppError::Config(format!("Invalid GitHub API URL: {e}")))?
            .personal_token(token.to_string())
            .build()
            .map_err(|e| AppError::GitHubApi(format!("Failed to build octocrab client: {e}")))
    }
}

#[async_trait]
impl Platform for GitHubPlatform {
    fn ensure_credentials(&self) -> Result<()> {
        self.token().map(|_| ())
    }

    async fn create_issue(&self, repo: &RepoRef, issue: &NewIssue) -> Result<CreatedIssue> {
        let client = self.client()?;

        // Raw route keeps the response model down to the fields we report
        let url = format!("/repos/{}/{}/issues", repo.owner, repo.repo);
        let created: CreatedIssue = client.post(&url, Some(issue)).await?;

        tracing::info!(
            repo = %repo,
            issue = created.number,
            url = %created.html_url,
            "Created GitHub issue"
        );

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_names_variable() {
        let platform = GitHubPlatform::new(&GitHubConfig::default());
        let err = platform.ensure_credentials().unwrap_err();
        assert!(matches!(&err, AppError::Config(msg) if msg.contains("GITHUB_TOKEN")));
    }

    #[test]
    fn test_configured_token() {
        let config = GitHubConfig {
            token: Some("ghp_test".to_string()),
            ..GitHubConfig::default()
        };
        assert!(GitHubPlatform::new(&config).ensure_credentials().is_ok());
    }
}
