use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read tool manifest {0}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Malformed tool manifest: {0}")]
    Parse(String),

    #[error("Tool '{0}' is not registered")]
    NotFound(String),
}

impl RegistryError {
    /// Returns true if the caller can recover by handling the error locally,
    /// false if registry construction itself failed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            RegistryError::Io(_, _) => false,
            RegistryError::Parse(_) => false,
            RegistryError::NotFound(_) => true,
        }
    }
}
