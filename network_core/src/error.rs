use roster::RosterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("This matrix has been cleaned and can no longer be modified")]
    Frozen,

    #[error("Unknown alias: '{0}'")]
    UnknownAlias(String),

    #[error("Unknown character: '{0}'")]
    UnknownCharacter(String),

    #[error("Entry point {entry} is out of range for a network of {size} characters")]
    EntryPointOutOfRange { entry: usize, size: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
