use thiserror::Error;

/// Errors raised around the breathing controller.
///
/// None of these ever cross the tick boundary: the controller logs them and
/// degrades to silence. The binary is the only place they are chained with anyhow.

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Audio file not found: {path}")]
    NotFound { path: String },

    #[error("Failed to load audio file: {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Audio file is empty: {path}")]
    EmptyClip { path: String },

    #[error("Failed to decode audio format")]
    DecodeFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to initialize audio output stream")]
    StreamInitFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Audio playback failed")]
    PlaybackFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not resolve installation directory")]
    InstallDirUnresolved(#[source] Option<std::io::Error>),

    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to create config directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A host collaborator the controller needs is not there (yet).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("Interior mixer bus is unavailable, keeping default output")]
    MissingMixerBus,

    #[error("No G-load source attached")]
    NoLoadSource,
}
