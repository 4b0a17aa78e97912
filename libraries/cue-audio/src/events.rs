//! Audio Events
//!
//! Events reported while fades run, so hosts can sync UI or logs:
//! - Fade scheduled on a channel
//! - Clip switched at the fade boundary
//! - Fade reached its target volume
//! - A deferred clip switch failed

use crate::channel::ChannelId;
use serde::{Deserialize, Serialize};

/// Events emitted by [`AudioContext::tick`](crate::AudioContext::tick)
/// and the fade entry point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AudioEvent {
    /// A fade was scheduled
    FadeStarted {
        channel: ChannelId,
        /// Music sound that will play after the switch
        sound: String,
        /// Length of both phases in milliseconds
        duration_ms: u64,
    },

    /// The new clip started at the end of the first phase
    ClipSwitched { channel: ChannelId, sound: String },

    /// Volume reached the new sound's stored volume
    FadeCompleted {
        channel: ChannelId,
        sound: String,
        volume: f32,
    },

    /// Error while driving a fade
    Error { channel: ChannelId, message: String },
}

impl AudioEvent {
    /// Channel the event refers to
    pub fn channel(&self) -> &ChannelId {
        match self {
            AudioEvent::FadeStarted { channel, .. }
            | AudioEvent::ClipSwitched { channel, .. }
            | AudioEvent::FadeCompleted { channel, .. }
            | AudioEvent::Error { channel, .. } => channel,
        }
    }
}
