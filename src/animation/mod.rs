//! Progress sources and morph state.
//!
//! The host's render loop owns time. Geometry code only sees a scalar in
//! `[0, 1]`, either pushed in directly or pulled through [`ProgressSource`].

mod transition;

pub use transition::{EntryAnimation, Morph, MorphState, morph_indexed, morph_vertices};

use serde::{Deserialize, Serialize};

use crate::core::primitives::clamp_progress;

/// Anything that can be sampled once per frame for animation progress.
pub trait ProgressSource {
    fn sample(&mut self) -> f64;
}

/// Progress set explicitly by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ManualProgress {
    value: f64,
}

impl ManualProgress {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value: clamp_progress(value),
        }
    }

    pub fn set(&mut self, value: f64) {
        self.value = clamp_progress(value);
    }
}

impl ProgressSource for ManualProgress {
    fn sample(&mut self) -> f64 {
        self.value
    }
}

/// Timing curve applied to linear time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Exponential ease-out, `1 - 2^(-10t)`, snapped to `1` at the end.
    #[default]
    ExpOut,
    /// Ease-out with overshoot; samples may exceed `1` mid-flight.
    BackOut { overshoot: f64 },
    CubicInOut,
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = clamp_progress(t);
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::ExpOut => 1.0 - 2.0_f64.powf(-10.0 * t),
            Self::BackOut { overshoot } => {
                let u = 1.0 - t;
                1.0 - u * u * ((overshoot + 1.0) * u - overshoot)
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }

    /// Overshoot-free counterpart used where a sample of `1` means "done".
    #[must_use]
    pub fn settling(self) -> Self {
        match self {
            Self::BackOut { .. } => Self::ExpOut,
            other => other,
        }
    }
}

/// Duration and easing of one animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationTuning {
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Default for AnimationTuning {
    fn default() -> Self {
        Self {
            duration_ms: 1_500.0,
            easing: Easing::ExpOut,
        }
    }
}

impl AnimationTuning {
    #[must_use]
    pub fn new(duration_ms: f64, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }

    /// Same duration with an easing that never passes `1`, so a data morph
    /// lasts its full duration.
    #[must_use]
    pub fn for_morph(self) -> Self {
        Self::new(self.duration_ms, self.easing.settling())
    }
}

/// Progress driven by elapsed time pushed from the host's frame callback.
///
/// Frame deltas may be irregular; only their sum matters. Zero or invalid
/// durations complete immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedProgress {
    tuning: AnimationTuning,
    elapsed_ms: f64,
}

impl TimedProgress {
    #[must_use]
    pub fn new(tuning: AnimationTuning) -> Self {
        Self {
            tuning,
            elapsed_ms: 0.0,
        }
    }

    pub fn restart(&mut self) {
        self.elapsed_ms = 0.0;
    }

    /// Adds a frame delta; negative and non-finite deltas are ignored.
    pub fn advance(&mut self, delta_ms: f64) {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.elapsed_ms += delta_ms;
        }
    }

    #[must_use]
    pub fn linear_progress(&self) -> f64 {
        let duration = self.tuning.duration_ms;
        if !duration.is_finite() || duration <= 0.0 {
            return 1.0;
        }
        clamp_progress(self.elapsed_ms / duration)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.linear_progress() >= 1.0
    }
}

impl ProgressSource for TimedProgress {
    fn sample(&mut self) -> f64 {
        self.tuning.easing.apply(self.linear_progress())
    }
}
