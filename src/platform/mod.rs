pub mod github;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use types::*;

#[async_trait]
pub trait Platform: Send + Sync {
    /// Fail with a configuration error when no credential is available.
    fn ensure_credentials(&self) -> Result<()>;

    /// Open a new issue in the given repository.
    async fn create_issue(&self, repo: &RepoRef, issue: &NewIssue) -> Result<CreatedIssue>;
}
