//! Error types for the setup advisor

use crate::wizard::Stage;
use thiserror::Error;

/// Result type alias for setup advisor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the setup advisor
#[derive(Error, Debug)]
pub enum Error {
    /// The chosen value is not one of the options offered at this stage.
    /// Recoverable: the front end should prompt again.
    #[error("'{choice}' is not a valid choice at the {stage} stage")]
    InvalidChoice { stage: Stage, choice: String },

    /// A transition or query that is illegal for the current session.
    /// Indicates an integration bug rather than bad user input.
    #[error("Invalid wizard state: {0}")]
    InvalidState(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error came from user input and can be retried
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::InvalidChoice { .. })
    }
}
