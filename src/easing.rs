//! Progress easing curves applied between the host clock and the columns.
//!
//! The core itself is progress-driven, not time-driven: the host clock
//! produces a raw fraction in [0, 1] and the selected curve shapes how the
//! scroll advances through it.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Easing curve for transition progress.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// No easing.
    Linear,
    /// Cosine-shaped curve: slow start, fast middle, slow finish.
    #[default]
    AccelerateDecelerate,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
}

impl EasingFunction {
    /// Evaluate the curve at time `t`.
    ///
    /// Input outside [0.0, 1.0] is clamped. The endpoints are exact: 0.0
    /// maps to 0.0 and 1.0 maps to 1.0 regardless of the curve, so a
    /// completed clock always lands columns precisely on their targets.
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
        }
    }
}
