use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Actor not found: {0:?}")]
    ActorNotFound(crate::core::types::ActorId),

    #[error("Room not found: {0:?}")]
    RoomNotFound(crate::core::types::RoomId),

    #[error("{0}")]
    CheckFailed(String),

    #[error("Passage blocked: {0}")]
    Blocked(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
