//! Easing functions for volume fades
//!
//! All curves map normalized time 0.0-1.0 onto normalized progress 0.0-1.0,
//! start at 0, end at 1 and are monotonic in between, so a fade driven by
//! any of them never overshoots its target volume.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Easing curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ease {
    /// Constant rate
    Linear,

    InSine,
    OutSine,
    InOutSine,

    InQuad,
    /// Default ease: quick start, gentle landing
    #[default]
    OutQuad,
    InOutQuad,

    InCubic,
    OutCubic,
    InOutCubic,

    InQuart,
    OutQuart,
    InOutQuart,

    InExpo,
    OutExpo,
    InOutExpo,
}

impl Ease {
    /// Eased progress for normalized time `t`
    ///
    /// `t` is clamped into 0.0-1.0.
    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Ease::Linear => t,

            Ease::InSine => 1.0 - (t * PI * 0.5).cos(),
            Ease::OutSine => (t * PI * 0.5).sin(),
            Ease::InOutSine => (1.0 - (PI * t).cos()) * 0.5,

            Ease::InQuad => t * t,
            Ease::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::InOutQuad => in_out(t, |x| x * x),

            Ease::InCubic => t.powi(3),
            Ease::OutCubic => 1.0 - (1.0 - t).powi(3),
            Ease::InOutCubic => in_out(t, |x| x.powi(3)),

            Ease::InQuart => t.powi(4),
            Ease::OutQuart => 1.0 - (1.0 - t).powi(4),
            Ease::InOutQuart => in_out(t, |x| x.powi(4)),

            Ease::InExpo => in_expo(t),
            Ease::OutExpo => 1.0 - in_expo(1.0 - t),
            Ease::InOutExpo => in_out(t, in_expo),
        }
    }

    /// Interpolate between `from` and `to` at normalized time `t`
    #[inline]
    pub fn interpolate(&self, from: f32, to: f32, t: f32) -> f32 {
        from + (to - from) * self.apply(t)
    }

    /// Get a human-readable name for the curve
    pub fn display_name(&self) -> &'static str {
        match self {
            Ease::Linear => "Linear",
            Ease::InSine => "Sine In",
            Ease::OutSine => "Sine Out",
            Ease::InOutSine => "Sine In-Out",
            Ease::InQuad => "Quad In",
            Ease::OutQuad => "Quad Out",
            Ease::InOutQuad => "Quad In-Out",
            Ease::InCubic => "Cubic In",
            Ease::OutCubic => "Cubic Out",
            Ease::InOutCubic => "Cubic In-Out",
            Ease::InQuart => "Quart In",
            Ease::OutQuart => "Quart Out",
            Ease::InOutQuart => "Quart In-Out",
            Ease::InExpo => "Expo In",
            Ease::OutExpo => "Expo Out",
            Ease::InOutExpo => "Expo In-Out",
        }
    }

    pub const ALL: [Ease; 16] = [
        Ease::Linear,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
        Ease::InExpo,
        Ease::OutExpo,
        Ease::InOutExpo,
    ];
}

/// Mirror an ease-in curve into a symmetric in-out curve
#[inline]
fn in_out(t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    if t < 0.5 {
        ease_in(t * 2.0) * 0.5
    } else {
        1.0 - ease_in((1.0 - t) * 2.0) * 0.5
    }
}

#[inline]
fn in_expo(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else {
        2.0_f32.powf(10.0 * t - 10.0)
    }
}
