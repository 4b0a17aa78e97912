//! Process-wide audio context
//!
//! For hosts that want static entry points instead of passing an
//! [`AudioContext`] around. The first installed context wins for the rest of
//! the process; later installs are discarded without error.

use crate::{
    channel::ChannelId,
    context::{AudioContext, PlayRequest},
    error::{AudioError, Result},
    events::AudioEvent,
    fade::FadeSettings,
};
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::Duration;

static CONTEXT: OnceLock<Mutex<AudioContext>> = OnceLock::new();

/// Install the process-wide context
///
/// Returns `true` if `context` became the global one, `false` if one was
/// already installed (in which case `context` is dropped).
pub fn install(context: AudioContext) -> bool {
    let mut installed = false;
    CONTEXT.get_or_init(|| {
        installed = true;
        Mutex::new(context)
    });

    if installed {
        tracing::debug!("Global audio context installed");
    } else {
        tracing::debug!("Global audio context already installed, discarding duplicate");
    }
    installed
}

pub fn is_installed() -> bool {
    CONTEXT.get().is_some()
}

/// Run `f` against the installed context
pub fn with_context<T>(f: impl FnOnce(&mut AudioContext) -> T) -> Result<T> {
    let context = CONTEXT.get().ok_or(AudioError::NotInitialized)?;
    let mut guard = context.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(f(&mut guard))
}

/// Play music on the global context
///
/// `None` arguments fall back to the context defaults; no fade means an
/// immediate cut.
pub fn play_global_music(
    name: &str,
    fade: Option<FadeSettings>,
    container: Option<&str>,
    channel: Option<ChannelId>,
) -> Result<()> {
    let request = PlayRequest {
        name: name.to_string(),
        container: container.map(str::to_string),
        channel,
        fade,
    };
    with_context(|context| context.play(&request))?
}

/// Play a one-shot effect on the global context
pub fn play_global_sfx(
    name: &str,
    container: Option<&str>,
    channel: Option<ChannelId>,
) -> Result<()> {
    let request = PlayRequest {
        name: name.to_string(),
        container: container.map(str::to_string),
        channel,
        fade: None,
    };
    with_context(|context| context.play_sfx(&request))?
}

/// Advance fades on the global context
pub fn tick_global(dt: Duration) -> Result<Vec<AudioEvent>> {
    with_context(|context| context.tick(dt))
}
