//! Platform-agnostic playback channel trait
//!
//! Abstracts the host's audio output (an engine audio source, a mixer bus, a
//! device stream). The library only sets state on channels; decoding and
//! mixing stay on the host side.

use crate::types::{clamp_volume, ClipId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Name of a channel registered in an audio context
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Playback resource with persistent clip/loop/volume state
///
/// Implementors forward these calls to the real output. Music uses the
/// persistent state (`set_clip` + `play`), effects use `play_one_shot`, which
/// must not touch the persistent state and must allow overlapping one-shots.
pub trait PlaybackChannel: Send {
    /// Current channel volume (0.0-1.0)
    fn volume(&self) -> f32;

    /// Set channel volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32);

    /// Clip assigned for persistent playback
    fn clip(&self) -> Option<ClipId>;

    /// Assign the clip for persistent playback
    fn set_clip(&mut self, clip: Option<ClipId>);

    fn is_looping(&self) -> bool;

    fn set_looping(&mut self, looping: bool);

    /// Start (or restart) the assigned clip
    fn play(&mut self);

    fn stop(&mut self);

    fn is_playing(&self) -> bool;

    /// Fire-and-forget playback of `clip` scaled by `volume`
    fn play_one_shot(&mut self, clip: &ClipId, volume: f32);
}

/// A one-shot recorded by [`MemoryChannel`]
#[derive(Debug, Clone, PartialEq)]
pub struct OneShot {
    pub clip: ClipId,
    pub volume: f32,
}

/// Snapshot of a [`MemoryChannel`]
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelState {
    pub volume: f32,
    pub clip: Option<ClipId>,
    pub looping: bool,
    pub playing: bool,
    /// Number of times `play()` was called
    pub play_count: usize,
    pub one_shots: Vec<OneShot>,
}

impl Default for ChannelState {
    fn default() -> Self {
        Self {
            volume: 1.0,
            clip: None,
            looping: false,
            playing: false,
            play_count: 0,
            one_shots: Vec::new(),
        }
    }
}

/// In-memory channel for headless hosts and tests
///
/// Clones share state, so a host can hand one clone to the context and keep
/// another to observe what the context did.
#[derive(Debug, Clone, Default)]
pub struct MemoryChannel {
    state: Arc<Mutex<ChannelState>>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channel starting at the given volume
    pub fn with_volume(volume: f32) -> Self {
        let channel = Self::new();
        channel.lock().volume = clamp_volume(volume);
        channel
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ChannelState {
        self.lock().clone()
    }

    /// One-shots played so far
    pub fn one_shots(&self) -> Vec<OneShot> {
        self.lock().one_shots.clone()
    }

    fn lock(&self) -> MutexGuard<'_, ChannelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PlaybackChannel for MemoryChannel {
    fn volume(&self) -> f32 {
        self.lock().volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.lock().volume = clamp_volume(volume);
    }

    fn clip(&self) -> Option<ClipId> {
        self.lock().clip.clone()
    }

    fn set_clip(&mut self, clip: Option<ClipId>) {
        self.lock().clip = clip;
    }

    fn is_looping(&self) -> bool {
        self.lock().looping
    }

    fn set_looping(&mut self, looping: bool) {
        self.lock().looping = looping;
    }

    fn play(&mut self) {
        let mut state = self.lock();
        state.playing = state.clip.is_some();
        state.play_count += 1;
    }

    fn stop(&mut self) {
        self.lock().playing = false;
    }

    fn is_playing(&self) -> bool {
        self.lock().playing
    }

    fn play_one_shot(&mut self, clip: &ClipId, volume: f32) {
        self.lock().one_shots.push(OneShot {
            clip: clip.clone(),
            volume: clamp_volume(volume),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let observer = MemoryChannel::new();
        let mut channel: Box<dyn PlaybackChannel> = Box::new(observer.clone());

        channel.set_clip(Some(ClipId::new("croco.ogg")));
        channel.set_looping(true);
        channel.play();

        let state = observer.snapshot();
        assert_eq!(state.clip, Some(ClipId::new("croco.ogg")));
        assert!(state.looping);
        assert!(state.playing);
        assert_eq!(state.play_count, 1);
    }

    #[test]
    fn play_without_clip_stays_silent() {
        let mut channel = MemoryChannel::new();
        channel.play();
        assert!(!channel.is_playing());
        assert_eq!(channel.snapshot().play_count, 1);
    }

    #[test]
    fn one_shots_leave_persistent_state_alone() {
        let mut channel = MemoryChannel::with_volume(0.4);
        let before = channel.snapshot();

        channel.play_one_shot(&ClipId::new("quack.wav"), 0.9);
        channel.play_one_shot(&ClipId::new("quack.wav"), 0.9);

        let after = channel.snapshot();
        assert_eq!(after.volume, before.volume);
        assert_eq!(after.clip, before.clip);
        assert_eq!(after.looping, before.looping);
        assert_eq!(after.one_shots.len(), 2);
    }

    #[test]
    fn volume_is_clamped() {
        let mut channel = MemoryChannel::new();
        assert_eq!(channel.volume(), 1.0);

        channel.set_volume(1.5);
        assert_eq!(channel.volume(), 1.0);

        channel.set_volume(-0.5);
        assert_eq!(channel.volume(), 0.0);
    }

    #[test]
    fn stop_keeps_clip() {
        let mut channel = MemoryChannel::new();
        channel.set_clip(Some(ClipId::new("french.ogg")));
        channel.play();
        channel.stop();

        assert!(!channel.is_playing());
        assert_eq!(channel.clip(), Some(ClipId::new("french.ogg")));
    }
}
