use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("Language model error: {0}")]
    ModelInvocation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// The underlying message, without the kind label `Display` adds.
    pub fn message(&self) -> String {
        match self {
            AppError::Config(msg)
            | AppError::Validation(msg)
            | AppError::GitHubApi(msg)
            | AppError::ModelInvocation(msg) => msg.clone(),
            AppError::Serialization(e) => e.to_string(),
        }
    }
}

impl From<octocrab::Error> for AppError {
    fn from(e: octocrab::Error) -> Self {
        let message = match &e {
            octocrab::Error::GitHub { source, .. } => source.message.clone(),
            other => other.to_string(),
        };
        // Keep it on one line; it ends up in a single-line reply
        AppError::GitHubApi(message.lines().collect::<Vec<_>>().join(" "))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_has_no_kind_label() {
        let err = AppError::Validation("Invalid repository format: 'x'".to_string());
        assert_eq!(err.to_string(), "Validation error: Invalid repository format: 'x'");
        assert_eq!(err.message(), "Invalid repository format: 'x'");

        let err = AppError::GitHubApi("Not Found".to_string());
        assert_eq!(err.message(), "Not Found");
    }
}
