use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: u64 },

    #[error("Username {username} already exists!")]
    UsernameTaken { username: String },
}

impl DomainError {
    pub fn user_not_found(id: u64) -> Self {
        Self::UserNotFound { id }
    }

    pub fn username_taken(username: impl Into<String>) -> Self {
        Self::UsernameTaken {
            username: username.into(),
        }
    }
}
