//! inkstroke assembles pen-drawn characters from SVG path fragments and drives them stroke by
//! stroke.
//!
//! # Overview
//!
//! 1. **Assemble**: ordered path descriptions become a [`Character`]. Fragments that are not
//!    complete on their own are merged with the next complete fragment into one
//!    [`ComboStroke`].
//! 2. **Query**: [`Character::bounds`] encloses all strokes; [`Character::matching_stroke`]
//!    scores caller-supplied points against every stroke and returns the closest one under
//!    [`Character::DISTANCE_THRESHOLD`].
//! 3. **Animate**: [`Character::animate`] hides the character and replays strokes in order
//!    with a configurable delay, on a caller-driven [`Scheduler`].
//!
//! Everything is single-threaded and callback-driven. Nothing blocks: time only moves when the
//! host advances its scheduler (see [`ManualScheduler`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod character;
mod foundation;
mod render;
mod stroke;

#[cfg(test)]
#[path = "../tests/unit/support/fake_stroke.rs"]
pub(crate) mod fake;

pub use animation::ease::Ease;
pub use animation::scheduler::{ManualScheduler, Scheduler, SharedScheduler, Task};
pub use animation::tween::{Tween, TweenHandle};
pub use character::model::{Character, CharacterStroke, StrokeMatch, group_strokes};
pub use character::options::{CharacterOptions, StrokeOptions};
pub use foundation::core::{BezPath, Bounds, Point, Rect, Vec2};
pub use foundation::error::{InkError, InkResult};
pub use render::canvas::{Canvas, DrawOp, RecordingCanvas, SharedCanvas};
pub use stroke::{
    AnimationOpts, ComboStroke, OnComplete, PathStroke, PathStrokeFactory, StrokeFactory,
    StrokeLike,
};
