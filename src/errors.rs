use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Unknown command: {0}")]
    BadCommand(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match &e {
            DomainError::OrderNotFound(_) => AppError::NotFound(e.to_string()),
            DomainError::InvalidArgument(_) | DomainError::RemovalWindowElapsed { .. } => {
                AppError::Rejected(e.to_string())
            }
            DomainError::Internal(msg) => AppError::Internal(msg.clone()),
        }
    }
}

impl AppError {
    /// Process exit status for errors that end the program.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 78,
            AppError::Io(_) => 74,
            AppError::NotFound(_) | AppError::Rejected(_) | AppError::BadCommand(_) => 65,
            AppError::Internal(_) => 70,
        }
    }

    /// Errors a session reports and keeps going after.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_) | AppError::Rejected(_) | AppError::BadCommand(_)
        )
    }
}
