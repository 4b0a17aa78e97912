//! Error types for cue routing

use crate::channel::ChannelId;
use crate::types::SoundCategory;
use thiserror::Error;

/// Audio routing errors
#[derive(Debug, Error)]
pub enum AudioError {
    /// Requested (or default) container is not registered
    #[error("Can't find audio container {0} in audio context")]
    ContainerNotFound(String),

    /// Container exists but has no sound with this name in the category
    #[error("Can't find {category} sound {name:?} in audio container {container}")]
    SoundNotFound {
        container: String,
        category: SoundCategory,
        name: String,
    },

    /// Requested (or global) channel is not registered
    #[error("Channel not found: {0}")]
    ChannelNotFound(ChannelId),

    /// A category already holds a sound with this name
    #[error("Duplicate {category} sound: {name}")]
    DuplicateSound { category: SoundCategory, name: String },

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No context has been installed in the global facade
    #[error("Audio context is not initialized")]
    NotInitialized,

    /// Configuration source could not be read or deserialized
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    /// JSON container data could not be parsed
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// TOML container data could not be parsed
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Configuration file could not be read
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether this error comes from a lookup miss (container or sound)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ContainerNotFound(_) | Self::SoundNotFound { .. } | Self::ChannelNotFound(_)
        )
    }
}

/// Result type for audio operations
pub type Result<T> = std::result::Result<T, AudioError>;
