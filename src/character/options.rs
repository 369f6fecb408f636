use std::time::Duration;

use crate::{
    animation::ease::Ease,
    foundation::error::{InkError, InkResult},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Character-level configuration.
pub struct CharacterOptions {
    /// Pause between consecutive stroke animations, in milliseconds.
    #[serde(alias = "delayBetweenStrokes")]
    pub delay_between_strokes_ms: u64,
    /// Passed unmodified to the stroke factory.
    pub stroke: StrokeOptions,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Per-stroke rendering and timing configuration.
pub struct StrokeOptions {
    /// Length of one stroke's draw-in animation, in milliseconds.
    #[serde(alias = "strokeAnimationDuration")]
    pub stroke_animation_duration_ms: u64,
    /// Default length of `show`/`hide` fades, in milliseconds.
    pub fade_duration_ms: u64,
    /// Outline width in path units.
    pub stroke_width: f64,
    /// Straight (non-premultiplied) RGBA8.
    pub color_rgba8: [u8; 4],
    /// Curve for the draw-in animation.
    pub ease: Ease,
    /// Tween step interval, in milliseconds. Must be > 0.
    pub frame_interval_ms: u64,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            stroke_animation_duration_ms: 1000,
            fade_duration_ms: 300,
            stroke_width: 2.0,
            color_rgba8: [0, 0, 0, 255],
            ease: Ease::InOutCubic,
            frame_interval_ms: 16,
        }
    }
}

impl CharacterOptions {
    /// Parse and validate options from JSON. Missing fields take their defaults.
    pub fn from_json(src: &str) -> InkResult<Self> {
        let opts: Self =
            serde_json::from_str(src).map_err(|e| InkError::serde(format!("options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Check the nested stroke options.
    pub fn validate(&self) -> InkResult<()> {
        self.stroke.validate()
    }

    /// [`CharacterOptions::delay_between_strokes_ms`] as a [`Duration`].
    pub fn delay_between_strokes(&self) -> Duration {
        Duration::from_millis(self.delay_between_strokes_ms)
    }
}

impl StrokeOptions {
    /// Reject a non-finite or negative width and a zero frame interval.
    pub fn validate(&self) -> InkResult<()> {
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(InkError::validation(
                "stroke_width must be finite and >= 0",
            ));
        }
        if self.frame_interval_ms == 0 {
            return Err(InkError::validation("frame_interval_ms must be > 0"));
        }
        Ok(())
    }

    /// Draw-in length as a [`Duration`].
    pub fn stroke_animation_duration(&self) -> Duration {
        Duration::from_millis(self.stroke_animation_duration_ms)
    }

    /// Default fade length as a [`Duration`].
    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }

    /// Tween step interval as a [`Duration`].
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/character/options.rs"]
mod tests;
