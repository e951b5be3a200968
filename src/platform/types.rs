use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// An `owner/repo` pair identifying a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Parse `owner/repo`. Exactly two non-empty segments are accepted.
    pub fn parse(repo_full_name: &str) -> Result<Self> {
        let parts: Vec<&str> = repo_full_name.split('/').collect();
        match parts.as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(AppError::Validation(format!(
                "Invalid repository format: '{repo_full_name}'. Expected format: owner/repo"
            ))),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Payload for a new issue.
#[derive(Debug, Clone, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
}

/// An issue as returned by the platform after creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    pub number: u64,
    pub html_url: String,
}
