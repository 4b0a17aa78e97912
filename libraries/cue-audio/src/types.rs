//! Core types for cue routing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Sound category
///
/// Partitions name lookup inside a container: a name may exist as both
/// music and sfx independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCategory {
    /// Looping background track on a persistent channel
    Music,

    /// Fire-and-forget one-shot effect
    Sfx,
}

impl fmt::Display for SoundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoundCategory::Music => f.write_str("music"),
            SoundCategory::Sfx => f.write_str("sfx"),
        }
    }
}

/// Opaque handle to decoded audio data owned by the host
///
/// Cloning is cheap. The library never looks inside; channels resolve it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(Arc<str>);

impl ClipId {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClipId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// One playable clip
///
/// Immutable once loaded into a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sound {
    /// Lookup name, unique per category within a container
    pub name: String,

    /// Playback volume (0.0-1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Audio data handle
    pub clip: ClipId,
}

impl Sound {
    /// Create a sound record
    ///
    /// Volume is clamped into 0.0-1.0.
    pub fn new(name: impl Into<String>, volume: f32, clip: impl Into<ClipId>) -> Self {
        Self {
            name: name.into(),
            volume: clamp_volume(volume),
            clip: clip.into(),
        }
    }
}

fn default_volume() -> f32 {
    1.0
}

/// Clamp a volume into 0.0-1.0, mapping NaN to silence
pub(crate) fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}
