/// Core error types for Wave Player
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for catalog operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// A collection or podcast was created with two parts sharing a name
    #[error("{entity} already contains an entry named {name}")]
    Duplicate { entity: &'static str, name: String },

    /// Deletion refused while reference ties are held
    #[error("{name} can't be deleted for now.")]
    InUse { name: String },

    /// Entity not found
    #[error("{entity} not found: {name}")]
    NotFound { entity: &'static str, name: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Create a duplicate-entry error
    pub fn duplicate(entity: &'static str, name: impl Into<String>) -> Self {
        Self::Duplicate {
            entity,
            name: name.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(entity: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            name: name.into(),
        }
    }

    /// Create an invalid-input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
