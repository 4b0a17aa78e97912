//! Two-phase music fade
//!
//! A music fade masks a clip switch:
//! 1. Fading out: channel volume goes from its current value to 0
//! 2. Clip switch: the new track starts at the phase boundary
//! 3. Fading in: volume goes from 0 to the new sound's stored volume
//!
//! The fade is a plain state machine advanced by an external tick, so it can
//! be driven by any host loop (or a test) without a render loop.
//!
//! Field naming note: `fade_in_*` parameterizes the *fading out* phase and
//! `fade_out_*` the *fading in* phase. This matches the observable timing of
//! the established cue API and is kept as-is.

use crate::ease::Ease;
use crate::types::clamp_volume;
use std::time::Duration;

/// Default length of each fade phase
pub const DEFAULT_FADE_DURATION: Duration = Duration::from_millis(500);

/// Fade parameters for one music request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeSettings {
    /// Length of the first phase (current volume down to silence)
    pub fade_in_duration: Duration,

    /// Curve of the first phase
    pub fade_in_ease: Ease,

    /// Length of the second phase (silence up to the new sound's volume)
    pub fade_out_duration: Duration,

    /// Curve of the second phase
    pub fade_out_ease: Ease,
}

impl Default for FadeSettings {
    fn default() -> Self {
        Self {
            fade_in_duration: DEFAULT_FADE_DURATION,
            fade_in_ease: Ease::default(),
            fade_out_duration: DEFAULT_FADE_DURATION,
            fade_out_ease: Ease::default(),
        }
    }
}

impl FadeSettings {
    /// Same duration for both phases, default curves
    pub fn with_duration(duration: Duration) -> Self {
        Self::with_durations(duration, duration)
    }

    /// Explicit phase durations, default curves
    pub fn with_durations(fade_in_duration: Duration, fade_out_duration: Duration) -> Self {
        Self {
            fade_in_duration,
            fade_out_duration,
            ..Default::default()
        }
    }

    /// Replace both curves
    #[must_use]
    pub fn eased(mut self, fade_in_ease: Ease, fade_out_ease: Ease) -> Self {
        self.fade_in_ease = fade_in_ease;
        self.fade_out_ease = fade_out_ease;
        self
    }

    /// Combined length of both phases, saturating at `Duration::MAX`
    pub fn total_duration(&self) -> Duration {
        self.fade_in_duration.saturating_add(self.fade_out_duration)
    }
}

/// Fade phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    /// Volume heading to silence, old clip still audible
    FadingOut,

    /// New clip playing, volume heading to its target
    FadingIn,

    /// Target volume reached
    Completed,
}

/// Result of advancing a fade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeStep {
    /// Channel volume to apply
    pub volume: f32,

    /// True exactly once: on the tick that crosses the phase boundary
    pub switch_clip: bool,

    /// Phase after this step
    pub phase: FadePhase,
}

/// Tick-driven fade-out / switch / fade-in state machine
#[derive(Debug, Clone)]
pub struct MusicFade {
    settings: FadeSettings,
    start_volume: f32,
    target_volume: f32,
    phase: FadePhase,
    phase_elapsed: Duration,
    elapsed: Duration,
    volume: f32,
}

impl MusicFade {
    /// Create a fade starting at `start_volume`, ending at `target_volume`
    pub fn new(start_volume: f32, target_volume: f32, settings: FadeSettings) -> Self {
        let start_volume = clamp_volume(start_volume);

        Self {
            settings,
            start_volume,
            target_volume: clamp_volume(target_volume),
            phase: FadePhase::FadingOut,
            phase_elapsed: Duration::ZERO,
            elapsed: Duration::ZERO,
            volume: start_volume,
        }
    }

    /// Advance by `dt` of wall-clock time
    ///
    /// Time left over after the first phase ends carries into the second
    /// phase within the same call. A zero-length phase ends on the first
    /// call, even with `dt == 0`.
    pub fn advance(&mut self, dt: Duration) -> FadeStep {
        let mut remaining = dt;
        let mut switch_clip = false;

        if self.phase == FadePhase::FadingOut {
            let duration = self.settings.fade_in_duration;
            let available = duration.saturating_sub(self.phase_elapsed);

            if remaining < available {
                self.phase_elapsed += remaining;
                self.elapsed = self.elapsed.saturating_add(remaining);
                let t = ratio(self.phase_elapsed, duration);
                self.volume = self
                    .settings
                    .fade_in_ease
                    .interpolate(self.start_volume, 0.0, t);
                return self.step(false);
            }

            remaining -= available;
            self.elapsed = self.elapsed.saturating_add(available);
            self.volume = 0.0;
            self.phase = FadePhase::FadingIn;
            self.phase_elapsed = Duration::ZERO;
            switch_clip = true;
        }

        if self.phase == FadePhase::FadingIn {
            let duration = self.settings.fade_out_duration;
            let available = duration.saturating_sub(self.phase_elapsed);

            if remaining < available {
                self.phase_elapsed += remaining;
                self.elapsed = self.elapsed.saturating_add(remaining);
                let t = ratio(self.phase_elapsed, duration);
                self.volume = self
                    .settings
                    .fade_out_ease
                    .interpolate(0.0, self.target_volume, t);
            } else {
                self.elapsed = self.elapsed.saturating_add(available);
                self.phase_elapsed = duration;
                self.volume = self.target_volume;
                self.phase = FadePhase::Completed;
            }
        }

        self.step(switch_clip)
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    /// Current volume of the fade envelope
    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn start_volume(&self) -> f32 {
        self.start_volume
    }

    pub fn target_volume(&self) -> f32 {
        self.target_volume
    }

    pub fn settings(&self) -> &FadeSettings {
        &self.settings
    }

    /// Time consumed so far (never exceeds the total duration)
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn total_duration(&self) -> Duration {
        self.settings.total_duration()
    }

    /// Progress over both phases (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.phase == FadePhase::Completed {
            return 1.0;
        }
        ratio(self.elapsed, self.total_duration())
    }

    /// Progress within the current phase (0.0 to 1.0)
    pub fn phase_progress(&self) -> f32 {
        match self.phase {
            FadePhase::FadingOut => ratio(self.phase_elapsed, self.settings.fade_in_duration),
            FadePhase::FadingIn => ratio(self.phase_elapsed, self.settings.fade_out_duration),
            FadePhase::Completed => 1.0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == FadePhase::Completed
    }

    fn step(&self, switch_clip: bool) -> FadeStep {
        FadeStep {
            volume: self.volume,
            switch_clip,
            phase: self.phase,
        }
    }
}

#[inline]
fn ratio(part: Duration, whole: Duration) -> f32 {
    if whole.is_zero() {
        return 0.0;
    }
    (part.as_secs_f32() / whole.as_secs_f32()).clamp(0.0, 1.0)
}
