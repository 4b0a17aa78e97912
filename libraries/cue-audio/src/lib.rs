//! Cue Audio - Music and Sound Effect Cues
//!
//! Platform-agnostic routing of named audio cues to playback channels.
//!
//! This crate provides:
//! - Named containers of sounds, split into music and sfx
//! - Default resolution for container and channel
//! - Immediate music cuts and fire-and-forget one-shots
//! - Two-phase music fades (fade out, switch clip, fade in)
//! - Configuration from file and environment
//! - An optional process-wide context with static entry points
//!
//! # Architecture
//!
//! `cue-audio` never touches an audio device:
//! - No decoding, no mixing
//! - No render loop: fades advance when the host calls [`AudioContext::tick`]
//! - Channels are provided by the host through [`PlaybackChannel`]
//!
//! # Example: Music and Effects
//!
//! ```rust
//! use cue_audio::{AudioContainer, AudioContext, MemoryChannel, PlayRequest, Sound, SoundCategory};
//!
//! let container = AudioContainer::new()
//!     .with_sound(SoundCategory::Music, Sound::new("croco", 0.8, "music/croco.ogg"))?
//!     .with_sound(SoundCategory::Sfx, Sound::new("quack", 0.5, "sfx/quack.wav"))?;
//!
//! let music = MemoryChannel::new();
//! let mut context = AudioContext::builder()
//!     .container("default", container)
//!     .music_channel(music.clone())
//!     .sfx_channel(MemoryChannel::new())
//!     .build()?;
//!
//! context.play(&PlayRequest::new("croco"))?;
//! context.play_sfx(&PlayRequest::new("quack"))?;
//!
//! assert!(music.snapshot().playing);
//! # Ok::<(), cue_audio::AudioError>(())
//! ```
//!
//! # Example: Fading Between Tracks
//!
//! ```rust
//! use cue_audio::{
//!     AudioContainer, AudioContext, Ease, FadeSettings, MemoryChannel, PlayRequest, Sound,
//!     SoundCategory,
//! };
//! use std::time::Duration;
//!
//! let container = AudioContainer::new()
//!     .with_sound(SoundCategory::Music, Sound::new("french", 0.6, "music/french.ogg"))?;
//!
//! let mut context = AudioContext::builder()
//!     .container("default", container)
//!     .music_channel(MemoryChannel::new())
//!     .sfx_channel(MemoryChannel::new())
//!     .build()?;
//!
//! let fade = FadeSettings::with_duration(Duration::from_secs(1))
//!     .eased(Ease::InCubic, Ease::OutCubic);
//! context.play(&PlayRequest::new("french").with_fade(fade))?;
//!
//! // Host loop: feed wall-clock time
//! while context.is_fading() {
//!     context.tick(Duration::from_millis(16));
//! }
//! # Ok::<(), cue_audio::AudioError>(())
//! ```

pub mod channel;
pub mod config;
mod container;
mod context;
pub mod ease;
mod error;
pub mod events;
pub mod fade;
pub mod global;
pub mod types;

// Public exports
pub use channel::{ChannelId, ChannelState, MemoryChannel, OneShot, PlaybackChannel};
pub use crate::config::AudioConfig;
pub use container::AudioContainer;
pub use context::{AudioContext, AudioContextBuilder, PlayRequest};
pub use ease::Ease;
pub use error::{AudioError, Result};
pub use events::AudioEvent;
pub use fade::{FadePhase, FadeSettings, FadeStep, MusicFade};
pub use types::{ClipId, Sound, SoundCategory};
