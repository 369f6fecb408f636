/// Easing curves applied to normalized tween progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Quadratic, slow start.
    InQuad,
    /// Quadratic, slow end.
    OutQuad,
    /// Quadratic, slow start and end.
    InOutQuad,
    /// Cubic, slow start.
    InCubic,
    /// Cubic, slow end.
    OutCubic,
    /// Cubic, slow start and end.
    #[default]
    InOutCubic,
}

impl Ease {
    /// Map linear progress `t` (clamped to `[0, 1]`) through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }

    /// Eased progress for `elapsed` out of `total`. A zero `total` is already finished.
    pub fn sample(self, elapsed: std::time::Duration, total: std::time::Duration) -> f64 {
        if total.is_zero() {
            return 1.0;
        }
        self.apply(elapsed.as_secs_f64() / total.as_secs_f64())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
