//! Named groups of sounds, partitioned by category

use crate::error::{AudioError, Result};
use crate::types::{Sound, SoundCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A set of sounds looked up by name within a category
///
/// Serialized as `{ "music": [..], "sfx": [..] }`. Duplicate names within a
/// category are rejected on insert and on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ContainerData", into = "ContainerData")]
pub struct AudioContainer {
    music: HashMap<String, Sound>,
    sfx: HashMap<String, Sound>,
}

impl AudioContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_sound(mut self, category: SoundCategory, sound: Sound) -> Result<Self> {
        self.insert(category, sound)?;
        Ok(self)
    }

    /// Add a sound to a category
    pub fn insert(&mut self, category: SoundCategory, sound: Sound) -> Result<()> {
        let sounds = self.sounds_mut(category);
        if sounds.contains_key(&sound.name) {
            return Err(AudioError::DuplicateSound {
                category,
                name: sound.name,
            });
        }
        sounds.insert(sound.name.clone(), sound);
        Ok(())
    }

    /// Look up a sound by name within a category
    pub fn find(&self, name: &str, category: SoundCategory) -> Option<&Sound> {
        self.sounds(category).get(name)
    }

    /// Like [`find`](Self::find), reporting a miss as `SoundNotFound`
    ///
    /// `container` is only used to label the error.
    pub fn try_find(
        &self,
        container: &str,
        name: &str,
        category: SoundCategory,
    ) -> Result<&Sound> {
        self.find(name, category)
            .ok_or_else(|| AudioError::SoundNotFound {
                container: container.to_string(),
                category,
                name: name.to_string(),
            })
    }

    /// Sound names in a category, sorted
    pub fn names(&self, category: SoundCategory) -> Vec<&str> {
        let mut names: Vec<&str> = self.sounds(category).keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over all sounds in a category
    pub fn iter(&self, category: SoundCategory) -> impl Iterator<Item = &Sound> {
        self.sounds(category).values()
    }

    /// Total number of sounds across both categories
    pub fn len(&self) -> usize {
        self.music.len() + self.sfx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.music.is_empty() && self.sfx.is_empty()
    }

    fn sounds(&self, category: SoundCategory) -> &HashMap<String, Sound> {
        match category {
            SoundCategory::Music => &self.music,
            SoundCategory::Sfx => &self.sfx,
        }
    }

    fn sounds_mut(&mut self, category: SoundCategory) -> &mut HashMap<String, Sound> {
        match category {
            SoundCategory::Music => &mut self.music,
            SoundCategory::Sfx => &mut self.sfx,
        }
    }
}

/// Wire shape of a container
#[derive(Debug, Default, Serialize, Deserialize)]
struct ContainerData {
    #[serde(default)]
    music: Vec<Sound>,

    #[serde(default)]
    sfx: Vec<Sound>,
}

impl TryFrom<ContainerData> for AudioContainer {
    type Error = AudioError;

    fn try_from(data: ContainerData) -> Result<Self> {
        let mut container = AudioContainer::new();
        for sound in data.music {
            container.insert(SoundCategory::Music, sound)?;
        }
        for sound in data.sfx {
            container.insert(SoundCategory::Sfx, sound)?;
        }
        Ok(container)
    }
}

impl From<AudioContainer> for ContainerData {
    fn from(container: AudioContainer) -> Self {
        let sorted = |map: HashMap<String, Sound>| {
            let mut sounds: Vec<Sound> = map.into_values().collect();
            sounds.sort_by(|a, b| a.name.cmp(&b.name));
            sounds
        };

        Self {
            music: sorted(container.music),
            sfx: sorted(container.sfx),
        }
    }
}
