//! The stroke capability consumed by [`crate::Character`], plus the two concrete strokes the
//! crate ships: [`PathStroke`] (one SVG path) and [`ComboStroke`] (several fragments acting as
//! one stroke).
use std::{cell::Cell, rc::Rc, time::Duration};

use crate::{
    character::options::StrokeOptions,
    foundation::{
        core::{Bounds, Point},
        error::InkResult,
    },
    render::canvas::SharedCanvas,
};

pub mod combo;
pub mod path;

pub use combo::ComboStroke;
pub use path::{PathStroke, PathStrokeFactory};

/// Completion callback. Strokes call it exactly once.
pub type OnComplete = Box<dyn FnOnce()>;

/// Options for `show`/`hide` transitions.
#[derive(Default)]
pub struct AnimationOpts {
    /// Transition length; `None` uses the stroke's configured default.
    pub duration: Option<Duration>,
    /// Called once the transition has finished.
    pub on_complete: Option<OnComplete>,
}

impl AnimationOpts {
    /// Default duration, no callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the transition length.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Set the completion callback.
    pub fn with_on_complete(mut self, on_complete: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    /// Split into `n` option sets sharing one completion callback.
    ///
    /// The callback fires once, after all `n` parts have completed. With `n == 0` it fires
    /// immediately.
    pub(crate) fn fan_out(self, n: usize) -> Vec<AnimationOpts> {
        let duration = self.duration;
        let Some(done) = self.on_complete else {
            return (0..n)
                .map(|_| AnimationOpts {
                    duration,
                    on_complete: None,
                })
                .collect();
        };
        if n == 0 {
            done();
            return Vec::new();
        }
        let join = Rc::new(Join {
            remaining: Cell::new(n),
            done: Cell::new(Some(done)),
        });
        (0..n)
            .map(|_| {
                let join = Rc::clone(&join);
                AnimationOpts {
                    duration,
                    on_complete: Some(Box::new(move || join.arrive())),
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for AnimationOpts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationOpts")
            .field("duration", &self.duration)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

struct Join {
    remaining: Cell<usize>,
    done: Cell<Option<OnComplete>>,
}

impl Join {
    fn arrive(&self) {
        let left = self.remaining.get().saturating_sub(1);
        self.remaining.set(left);
        if left == 0
            && let Some(done) = self.done.take()
        {
            done();
        }
    }
}

/// Operations a character needs from each of its strokes.
///
/// All methods take `&self`: a stroke owns its render state and mutates it internally, while
/// the character only ever reads its stroke list.
pub trait StrokeLike {
    /// Whether the fragment closes a drawing unit on its own.
    fn is_complete(&self) -> bool;

    /// Axis-aligned box around the stroke geometry.
    fn bounds(&self) -> Bounds;

    /// Mean distance from `points` to this stroke. Lower is closer.
    fn average_distance(&self, points: &[Point]) -> f64;

    /// Fade the stroke in, fully drawn.
    fn show(&self, opts: AnimationOpts);

    /// Fade the stroke out.
    fn hide(&self, opts: AnimationOpts);

    /// Render the current state to the attached canvas, if any.
    fn draw(&self);

    /// Play the draw-in animation, then call `on_complete` exactly once.
    fn animate(&self, on_complete: OnComplete);

    /// Attach the stroke to `canvas`.
    fn set_canvas(&self, canvas: SharedCanvas);
}

/// Builds raw strokes from path descriptions.
pub trait StrokeFactory {
    /// Stroke type produced.
    type Stroke: StrokeLike + 'static;

    /// Build one stroke from a path description.
    fn build(&self, path: &str, opts: &StrokeOptions) -> InkResult<Self::Stroke>;
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/opts.rs"]
mod tests;
