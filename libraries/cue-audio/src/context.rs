//! Audio context - request routing and fade driving
//!
//! Resolves a [`PlayRequest`] to a container, a sound and a channel, then
//! commands the channel immediately (music cut, sfx one-shot) or schedules a
//! [`MusicFade`] that [`AudioContext::tick`] advances.

use crate::{
    channel::{ChannelId, PlaybackChannel},
    config::AudioConfig,
    container::AudioContainer,
    error::{AudioError, Result},
    events::AudioEvent,
    fade::{FadePhase, FadeSettings, MusicFade},
    types::{Sound, SoundCategory},
};
use std::collections::HashMap;
use std::time::Duration;

/// A request to play a sound
///
/// Unset container and channel fall back to the context defaults; an unset
/// fade means an immediate cut.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    /// Sound name within its category
    pub name: String,

    /// Container to search (default container if `None`)
    pub container: Option<String>,

    /// Channel to play on (global channel for the category if `None`)
    pub channel: Option<ChannelId>,

    /// Fade for music requests (ignored by sfx)
    pub fade: Option<FadeSettings>,
}

impl PlayRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            container: None,
            channel: None,
            fade: None,
        }
    }

    #[must_use]
    pub fn in_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    #[must_use]
    pub fn on_channel(mut self, channel: impl Into<ChannelId>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    #[must_use]
    pub fn with_fade(mut self, fade: FadeSettings) -> Self {
        self.fade = Some(fade);
        self
    }
}

/// A fade in flight on one channel
#[derive(Debug)]
struct ActiveFade {
    channel: ChannelId,
    /// Fully resolved request replayed at the clip switch
    request: PlayRequest,
    fade: MusicFade,
}

/// Builder for [`AudioContext`]
pub struct AudioContextBuilder {
    config: AudioConfig,
    channels: HashMap<ChannelId, Box<dyn PlaybackChannel>>,
}

impl AudioContextBuilder {
    /// Start from configuration: defaults, global channel ids and containers
    pub fn from_config(config: AudioConfig) -> Self {
        Self {
            config,
            channels: HashMap::new(),
        }
    }

    #[must_use]
    pub fn default_container(mut self, name: impl Into<String>) -> Self {
        self.config.default_container = name.into();
        self
    }

    /// Register (or replace) a container
    #[must_use]
    pub fn container(mut self, name: impl Into<String>, container: AudioContainer) -> Self {
        self.config.containers.insert(name.into(), container);
        self
    }

    /// Register (or replace) a channel
    #[must_use]
    pub fn channel(
        mut self,
        id: impl Into<ChannelId>,
        channel: impl PlaybackChannel + 'static,
    ) -> Self {
        self.channels.insert(id.into(), Box::new(channel));
        self
    }

    /// Register the global music channel under the configured id
    #[must_use]
    pub fn music_channel(self, channel: impl PlaybackChannel + 'static) -> Self {
        let id = self.config.music_channel.clone();
        self.channel(id, channel)
    }

    /// Register the global sfx channel under the configured id
    #[must_use]
    pub fn sfx_channel(self, channel: impl PlaybackChannel + 'static) -> Self {
        let id = self.config.sfx_channel.clone();
        self.channel(id, channel)
    }

    /// Build the context
    ///
    /// Both global channels must be registered. The default container may
    /// be missing; requests relying on it then fail with `ContainerNotFound`.
    pub fn build(self) -> Result<AudioContext> {
        let AudioConfig {
            default_container,
            music_channel,
            sfx_channel,
            containers,
        } = self.config;

        for id in [&music_channel, &sfx_channel] {
            if !self.channels.contains_key(id) {
                return Err(AudioError::ChannelNotFound(id.clone()));
            }
        }

        tracing::debug!(
            "Audio context ready: {} containers, {} channels, default container {}",
            containers.len(),
            self.channels.len(),
            default_container
        );

        Ok(AudioContext {
            default_container,
            containers,
            channels: self.channels,
            music_channel,
            sfx_channel,
            fades: Vec::new(),
            pending_events: Vec::new(),
        })
    }
}

/// Routes play requests to containers and channels
///
/// Containers are read-only once the context is built. Channels are owned by
/// the context; hosts observe them through [`channel`](Self::channel) or
/// through shared-state implementations such as
/// [`MemoryChannel`](crate::MemoryChannel).
///
/// Fades are not exclusive: a second fade on a channel that is still fading
/// runs alongside the first, and each tick the later fade's volume write
/// wins. There is no cancellation; start another fade instead.
pub struct AudioContext {
    default_container: String,
    containers: HashMap<String, AudioContainer>,
    channels: HashMap<ChannelId, Box<dyn PlaybackChannel>>,
    music_channel: ChannelId,
    sfx_channel: ChannelId,
    fades: Vec<ActiveFade>,
    pending_events: Vec<AudioEvent>,
}

impl AudioContext {
    /// Builder with default configuration
    pub fn builder() -> AudioContextBuilder {
        AudioContextBuilder::from_config(AudioConfig::default())
    }

    /// Play music, with a fade if the request carries one
    pub fn play(&mut self, request: &PlayRequest) -> Result<()> {
        match &request.fade {
            Some(settings) => self.play_music_with_fade(request, settings),
            None => self.play_music(request),
        }
    }

    /// Play music immediately: assign the clip, loop it, start it
    ///
    /// Any clip already on the channel is cut.
    pub fn play_music(&mut self, request: &PlayRequest) -> Result<()> {
        let result = self.cut_to_music(request);
        report("play music", &request.name, result)
    }

    /// Fade the channel to silence, switch to the requested music, fade back
    /// up to the sound's stored volume
    ///
    /// The sound is resolved before anything starts: a lookup failure leaves
    /// the channel untouched. The fade itself runs in [`tick`](Self::tick).
    pub fn play_music_with_fade(
        &mut self,
        request: &PlayRequest,
        settings: &FadeSettings,
    ) -> Result<()> {
        let result = self.schedule_fade(request, settings);
        report("fade music", &request.name, result)
    }

    /// Fire a one-shot effect at the sound's stored volume
    ///
    /// The channel's clip, loop flag and volume are left as they are.
    pub fn play_sfx(&mut self, request: &PlayRequest) -> Result<()> {
        let result = self.fire_one_shot(request);
        report("play sfx", &request.name, result)
    }

    /// Advance all running fades by `dt` of wall-clock time
    ///
    /// Fades advance in the order they were started. Returns the events
    /// produced since the previous tick, including fades started meanwhile.
    pub fn tick(&mut self, dt: Duration) -> Vec<AudioEvent> {
        let mut events = std::mem::take(&mut self.pending_events);
        let mut fades = std::mem::take(&mut self.fades);

        for active in &mut fades {
            let step = active.fade.advance(dt);
            tracing::trace!(
                "Fade on {}: {:?} volume {:.3}",
                active.channel,
                step.phase,
                step.volume
            );

            // The old clip goes silent before the switch, even when this tick
            // already runs into the second phase
            let volume = if step.switch_clip { 0.0 } else { step.volume };
            match self.channels.get_mut(&active.channel) {
                Some(channel) => channel.set_volume(volume),
                None => events.push(AudioEvent::Error {
                    channel: active.channel.clone(),
                    message: AudioError::ChannelNotFound(active.channel.clone()).to_string(),
                }),
            }

            if step.switch_clip {
                let switched = self.cut_to_music(&active.request);
                if let Some(channel) = self.channels.get_mut(&active.channel) {
                    channel.set_volume(step.volume);
                }

                match switched {
                    Ok(()) => events.push(AudioEvent::ClipSwitched {
                        channel: active.channel.clone(),
                        sound: active.request.name.clone(),
                    }),
                    Err(e) => {
                        tracing::warn!("Fade on {} failed to switch clip: {}", active.channel, e);
                        events.push(AudioEvent::Error {
                            channel: active.channel.clone(),
                            message: e.to_string(),
                        });
                    }
                }
            }

            if step.phase == FadePhase::Completed {
                tracing::debug!(
                    "Fade on {} completed at volume {:.3}",
                    active.channel,
                    step.volume
                );
                events.push(AudioEvent::FadeCompleted {
                    channel: active.channel.clone(),
                    sound: active.request.name.clone(),
                    volume: step.volume,
                });
            }
        }

        fades.retain(|active| !active.fade.is_complete());
        fades.append(&mut self.fades);
        self.fades = fades;

        events
    }

    /// Fades still running, in start order
    pub fn active_fades(&self) -> impl Iterator<Item = (&ChannelId, &MusicFade)> {
        self.fades.iter().map(|active| (&active.channel, &active.fade))
    }

    /// Fades still running on one channel
    pub fn fades_on<'a>(
        &'a self,
        channel: &'a ChannelId,
    ) -> impl Iterator<Item = &'a MusicFade> {
        self.fades
            .iter()
            .filter(move |active| &active.channel == channel)
            .map(|active| &active.fade)
    }

    pub fn is_fading(&self) -> bool {
        !self.fades.is_empty()
    }

    pub fn default_container_name(&self) -> &str {
        &self.default_container
    }

    pub fn container(&self, name: &str) -> Option<&AudioContainer> {
        self.containers.get(name)
    }

    /// Registered container names, sorted
    pub fn container_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.containers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn music_channel_id(&self) -> &ChannelId {
        &self.music_channel
    }

    pub fn sfx_channel_id(&self) -> &ChannelId {
        &self.sfx_channel
    }

    pub fn channel(&self, id: &ChannelId) -> Option<&dyn PlaybackChannel> {
        self.channels.get(id).map(|channel| &**channel)
    }

    pub fn channel_mut(
        &mut self,
        id: &ChannelId,
    ) -> Option<&mut (dyn PlaybackChannel + 'static)> {
        self.channels.get_mut(id).map(|channel| &mut **channel)
    }

    /// Register an extra channel, returning the one it replaces
    pub fn add_channel(
        &mut self,
        id: impl Into<ChannelId>,
        channel: impl PlaybackChannel + 'static,
    ) -> Option<Box<dyn PlaybackChannel>> {
        self.channels.insert(id.into(), Box::new(channel))
    }

    /// Find a sound for a request without playing it
    pub fn find_sound(&self, request: &PlayRequest, category: SoundCategory) -> Result<&Sound> {
        let (container_name, container) = self.resolve_container(request.container.as_deref())?;
        container.try_find(container_name, &request.name, category)
    }

    fn resolve_channel_id(
        &self,
        requested: Option<&ChannelId>,
        category: SoundCategory,
    ) -> Result<ChannelId> {
        let id = match (requested, category) {
            (Some(id), _) => id,
            (None, SoundCategory::Music) => &self.music_channel,
            (None, SoundCategory::Sfx) => &self.sfx_channel,
        };

        if self.channels.contains_key(id) {
            Ok(id.clone())
        } else {
            Err(AudioError::ChannelNotFound(id.clone()))
        }
    }

    fn resolve_container(&self, requested: Option<&str>) -> Result<(&str, &AudioContainer)> {
        let name = requested.unwrap_or(self.default_container.as_str());
        self.containers
            .get_key_value(name)
            .map(|(name, container)| (name.as_str(), container))
            .ok_or_else(|| AudioError::ContainerNotFound(name.to_string()))
    }

    fn channel_for(&mut self, id: &ChannelId) -> Result<&mut Box<dyn PlaybackChannel>> {
        self.channels
            .get_mut(id)
            .ok_or_else(|| AudioError::ChannelNotFound(id.clone()))
    }

    fn cut_to_music(&mut self, request: &PlayRequest) -> Result<()> {
        let channel_id = self.resolve_channel_id(request.channel.as_ref(), SoundCategory::Music)?;
        let (container_name, sound) = {
            let (name, container) = self.resolve_container(request.container.as_deref())?;
            let sound = container.try_find(name, &request.name, SoundCategory::Music)?;
            (name.to_string(), sound.clone())
        };

        tracing::debug!(
            "Playing music {} from {} on {}",
            sound.name,
            container_name,
            channel_id
        );

        let channel = self.channel_for(&channel_id)?;
        channel.set_clip(Some(sound.clip));
        channel.set_looping(true);
        channel.play();
        Ok(())
    }

    fn schedule_fade(&mut self, request: &PlayRequest, settings: &FadeSettings) -> Result<()> {
        let channel_id = self.resolve_channel_id(request.channel.as_ref(), SoundCategory::Music)?;
        let (container_name, target_volume) = {
            let (name, container) = self.resolve_container(request.container.as_deref())?;
            let sound = container.try_find(name, &request.name, SoundCategory::Music)?;
            (name.to_string(), sound.volume)
        };

        let start_volume = self.channel_for(&channel_id)?.volume();

        let running = self.fades_on(&channel_id).count();
        if running > 0 {
            tracing::debug!(
                "Starting fade on {} while {} other fade(s) still run; later fade wins each tick",
                channel_id,
                running
            );
        }

        tracing::debug!(
            "Fading music on {} to {} from {} ({:?} + {:?})",
            channel_id,
            request.name,
            container_name,
            settings.fade_in_duration,
            settings.fade_out_duration
        );

        self.pending_events.push(AudioEvent::FadeStarted {
            channel: channel_id.clone(),
            sound: request.name.clone(),
            duration_ms: u64::try_from(settings.total_duration().as_millis()).unwrap_or(u64::MAX),
        });

        self.fades.push(ActiveFade {
            channel: channel_id.clone(),
            request: PlayRequest {
                name: request.name.clone(),
                container: Some(container_name),
                channel: Some(channel_id),
                fade: None,
            },
            fade: MusicFade::new(start_volume, target_volume, *settings),
        });

        Ok(())
    }

    fn fire_one_shot(&mut self, request: &PlayRequest) -> Result<()> {
        let channel_id = self.resolve_channel_id(request.channel.as_ref(), SoundCategory::Sfx)?;
        let sound = {
            let (name, container) = self.resolve_container(request.container.as_deref())?;
            container
                .try_find(name, &request.name, SoundCategory::Sfx)?
                .clone()
        };

        tracing::debug!("One-shot {} on {} at {:.2}", sound.name, channel_id, sound.volume);

        self.channel_for(&channel_id)?
            .play_one_shot(&sound.clip, sound.volume);
        Ok(())
    }
}

/// Surface a failed request in the log; the caller still gets the error
fn report<T>(operation: &str, name: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        tracing::warn!("Failed to {} {}: {}", operation, name, e);
    }
    result
}
