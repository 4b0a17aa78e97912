/// Audio context configuration
use crate::channel::ChannelId;
use crate::container::AudioContainer;
use crate::error::{AudioError, Result};
use crate::types::SoundCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Environment variable prefix for overrides (`CUE_DEFAULT_CONTAINER`, ...)
pub const ENV_PREFIX: &str = "CUE";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AudioConfig {
    /// Container used when a request names none
    #[serde(default = "default_container")]
    pub default_container: String,

    /// Channel used for music when a request names none
    #[serde(default = "default_music_channel")]
    pub music_channel: ChannelId,

    /// Channel used for sfx when a request names none
    #[serde(default = "default_sfx_channel")]
    pub sfx_channel: ChannelId,

    /// Container data, keyed by container name
    #[serde(default)]
    pub containers: HashMap<String, AudioContainer>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            default_container: default_container(),
            music_channel: default_music_channel(),
            sfx_channel: default_sfx_channel(),
            containers: HashMap::new(),
        }
    }
}

impl AudioConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// The file format follows its extension (TOML, JSON, ...). Environment
    /// variables prefixed with `CUE_` override top-level keys.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<Self> {
        let mut settings = config::Config::builder();
        let mut containers = None;

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path));
                containers = read_containers(path)?;
            } else {
                tracing::debug!("Audio config {} not found, using defaults", path.display());
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix(prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Self = settings.build()?.try_deserialize()?;

        // `config` lowercases table keys; container names are case-sensitive
        if let Some(containers) = containers {
            config.containers = containers;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.default_container.is_empty() {
            return Err(AudioError::invalid_config(
                "default container name must not be empty",
            ));
        }

        if self.music_channel.as_str().is_empty() || self.sfx_channel.as_str().is_empty() {
            return Err(AudioError::invalid_config(
                "global channel ids must not be empty",
            ));
        }

        for (name, container) in &self.containers {
            for category in [SoundCategory::Music, SoundCategory::Sfx] {
                if let Some(sound) = container
                    .iter(category)
                    .find(|sound| !(0.0..=1.0).contains(&sound.volume))
                {
                    return Err(AudioError::InvalidConfig(format!(
                        "{} sound {:?} in container {} has volume {} outside 0.0-1.0",
                        category, sound.name, name, sound.volume
                    )));
                }
            }
        }

        if !self.containers.contains_key(&self.default_container) {
            tracing::warn!(
                "Default audio container {} is not defined in configuration",
                self.default_container
            );
        }

        Ok(())
    }
}

/// Top-level `containers` table of a configuration file
#[derive(Debug, Deserialize)]
struct ContainerFile {
    #[serde(default)]
    containers: HashMap<String, AudioContainer>,
}

/// Read container data with its names intact
///
/// Only TOML and JSON files are re-read; other formats keep whatever the
/// `config` layer produced.
fn read_containers(path: &Path) -> Result<Option<HashMap<String, AudioContainer>>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let file: ContainerFile = match extension.as_deref() {
        Some("toml") => toml::from_str(&std::fs::read_to_string(path)?)?,
        Some("json") => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        _ => {
            tracing::warn!(
                "Container names in {} may lose their case; use TOML or JSON",
                path.display()
            );
            return Ok(None);
        }
    };

    Ok(Some(file.containers))
}

// Default values
fn default_container() -> String {
    "default".to_string()
}

fn default_music_channel() -> ChannelId {
    ChannelId::new("music")
}

fn default_sfx_channel() -> ChannelId {
    ChannelId::new("sfx")
}
