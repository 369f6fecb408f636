use std::{rc::Rc, time::Duration};

use crate::{
    animation::scheduler::SharedScheduler,
    character::options::CharacterOptions,
    foundation::{
        core::{Bounds, Point},
        error::InkResult,
    },
    render::canvas::SharedCanvas,
    stroke::{
        AnimationOpts, ComboStroke, OnComplete, PathStroke, PathStrokeFactory, StrokeFactory,
        StrokeLike,
    },
};

/// One logical stroke of a character: a standalone fragment or a merged run of fragments.
#[derive(Debug)]
pub enum CharacterStroke<S> {
    /// A complete fragment standing on its own.
    Single(S),
    /// Incomplete fragments merged with the complete fragment that closed them.
    Combo(ComboStroke<S>),
}

impl<S: StrokeLike + 'static> CharacterStroke<S> {
    /// Whether this stroke was merged from several fragments.
    pub fn is_combo(&self) -> bool {
        matches!(self, Self::Combo(_))
    }

    fn as_dyn(&self) -> &dyn StrokeLike {
        match self {
            Self::Single(s) => s,
            Self::Combo(c) => c,
        }
    }
}

impl<S: StrokeLike + 'static> StrokeLike for CharacterStroke<S> {
    fn is_complete(&self) -> bool {
        self.as_dyn().is_complete()
    }

    fn bounds(&self) -> Bounds {
        self.as_dyn().bounds()
    }

    fn average_distance(&self, points: &[Point]) -> f64 {
        self.as_dyn().average_distance(points)
    }

    fn show(&self, opts: AnimationOpts) {
        self.as_dyn().show(opts)
    }

    fn hide(&self, opts: AnimationOpts) {
        self.as_dyn().hide(opts)
    }

    fn draw(&self) {
        self.as_dyn().draw()
    }

    fn animate(&self, on_complete: OnComplete) {
        self.as_dyn().animate(on_complete)
    }

    fn set_canvas(&self, canvas: SharedCanvas) {
        self.as_dyn().set_canvas(canvas)
    }
}

/// Result of [`Character::matching_stroke`].
#[derive(Debug)]
pub struct StrokeMatch<'a, S> {
    /// Position of the stroke in drawing order.
    pub index: usize,
    /// The matched stroke.
    pub stroke: &'a CharacterStroke<S>,
    /// Its average distance to the input points.
    pub distance: f64,
}

/// A drawable character: an ordered, immutable list of strokes.
///
/// Stroke order is drawing order. `show`, `hide` and `draw` apply to every stroke at once;
/// `animate` plays the strokes one after another.
pub struct Character<S> {
    options: CharacterOptions,
    strokes: Rc<Vec<CharacterStroke<S>>>,
    scheduler: SharedScheduler,
    canvas: Option<SharedCanvas>,
}

impl Character<PathStroke> {
    /// Build a character from SVG path `d` strings.
    pub fn from_paths<P: AsRef<str>>(
        paths: impl IntoIterator<Item = P>,
        options: CharacterOptions,
        scheduler: SharedScheduler,
    ) -> InkResult<Self> {
        let factory = PathStrokeFactory::new(Rc::clone(&scheduler));
        Self::new(paths, options, &factory, scheduler)
    }
}

impl<S: StrokeLike + 'static> Character<S> {
    /// Largest average distance (in path units) still accepted as a match.
    pub const DISTANCE_THRESHOLD: f64 = 30.0;

    /// Build every stroke with `factory` and group the fragments.
    ///
    /// Fails on the first path the factory rejects.
    #[tracing::instrument(skip_all, fields(paths = tracing::field::Empty))]
    pub fn new<F, P>(
        paths: impl IntoIterator<Item = P>,
        options: CharacterOptions,
        factory: &F,
        scheduler: SharedScheduler,
    ) -> InkResult<Self>
    where
        F: StrokeFactory<Stroke = S>,
        P: AsRef<str>,
    {
        options.validate()?;
        let raw = paths
            .into_iter()
            .map(|p| factory.build(p.as_ref(), &options.stroke))
            .collect::<InkResult<Vec<S>>>()?;
        tracing::Span::current().record("paths", raw.len());

        let (strokes, dropped) = group_strokes(raw)?;
        if !dropped.is_empty() {
            tracing::warn!(
                dropped = dropped.len(),
                "trailing incomplete stroke fragments were never closed and are dropped"
            );
        }
        tracing::debug!(strokes = strokes.len(), "character assembled");

        Ok(Self {
            options,
            strokes: Rc::new(strokes),
            scheduler,
            canvas: None,
        })
    }

    /// Options the character was built with.
    pub fn options(&self) -> &CharacterOptions {
        &self.options
    }

    /// Number of logical strokes. Fixed at construction.
    pub fn num_strokes(&self) -> usize {
        self.strokes.len()
    }

    /// Strokes in drawing order.
    pub fn strokes(&self) -> impl Iterator<Item = &CharacterStroke<S>> {
        self.strokes.iter()
    }

    /// Stroke `n` in drawing order, if it exists.
    pub fn stroke(&self, n: usize) -> Option<&CharacterStroke<S>> {
        self.strokes.get(n)
    }

    /// Box enclosing every stroke's box. `None` only when there are no strokes.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(self.strokes.iter().map(StrokeLike::bounds))
    }

    /// Stroke closest to `points`, if it is closer than [`Self::DISTANCE_THRESHOLD`].
    ///
    /// Ties go to the earlier stroke.
    pub fn matching_stroke(&self, points: &[Point]) -> Option<StrokeMatch<'_, S>> {
        let mut best: Option<StrokeMatch<'_, S>> = None;
        for (index, stroke) in self.strokes.iter().enumerate() {
            let distance = stroke.average_distance(points);
            if best.as_ref().is_none_or(|b| distance < b.distance) {
                best = Some(StrokeMatch {
                    index,
                    stroke,
                    distance,
                });
            }
        }
        let best = best.filter(|b| b.distance < Self::DISTANCE_THRESHOLD);
        tracing::debug!(
            points = points.len(),
            matched = ?best.as_ref().map(|b| b.index),
            "stroke matching"
        );
        best
    }

    /// Show every stroke. `on_complete`, if any, fires once all strokes are shown.
    pub fn show(&self, opts: AnimationOpts) {
        for (stroke, opts) in self.strokes.iter().zip(opts.fan_out(self.strokes.len())) {
            stroke.show(opts);
        }
    }

    /// Hide every stroke. `on_complete`, if any, fires once all strokes are hidden.
    pub fn hide(&self, opts: AnimationOpts) {
        for (stroke, opts) in self.strokes.iter().zip(opts.fan_out(self.strokes.len())) {
            stroke.hide(opts);
        }
    }

    /// Show stroke `n` only. Returns `false` (and does nothing) when `n` is out of range.
    pub fn show_stroke(&self, n: usize, opts: AnimationOpts) -> bool {
        match self.strokes.get(n) {
            Some(stroke) => {
                stroke.show(opts);
                true
            }
            None => false,
        }
    }

    /// Draw every stroke in its current state.
    pub fn draw(&self) {
        for stroke in self.strokes.iter() {
            stroke.draw();
        }
    }

    /// Hide the character, then animate each stroke in order with the configured delay between
    /// strokes. `on_complete` fires once, right after the last stroke finishes.
    pub fn animate(&self, on_complete: OnComplete) {
        let strokes = Rc::clone(&self.strokes);
        let scheduler = Rc::clone(&self.scheduler);
        let delay = self.options.delay_between_strokes();
        self.hide(AnimationOpts::new().with_on_complete(move || {
            animate_stroke(strokes, scheduler, delay, 0, on_complete);
        }));
    }

    /// Canvas set by [`Character::set_canvas`], if any.
    pub fn canvas(&self) -> Option<&SharedCanvas> {
        self.canvas.as_ref()
    }

    /// Attach the character and every stroke to `canvas`.
    pub fn set_canvas(&mut self, canvas: SharedCanvas) {
        for stroke in self.strokes.iter() {
            stroke.set_canvas(Rc::clone(&canvas));
        }
        self.canvas = Some(canvas);
    }
}

fn animate_stroke<S: StrokeLike + 'static>(
    strokes: Rc<Vec<CharacterStroke<S>>>,
    scheduler: SharedScheduler,
    delay: Duration,
    idx: usize,
    on_complete: OnComplete,
) {
    let Some(stroke) = strokes.get(idx) else {
        on_complete();
        return;
    };
    let rest = Rc::clone(&strokes);
    stroke.animate(Box::new(move || {
        if idx + 1 < rest.len() {
            let next = Rc::clone(&scheduler);
            next.schedule_after(
                delay,
                Box::new(move || animate_stroke(rest, scheduler, delay, idx + 1, on_complete)),
            );
        } else {
            on_complete();
        }
    }));
}

/// Group raw fragments into logical strokes in one left-to-right pass.
///
/// Runs of incomplete fragments are buffered until the next complete fragment, and the run
/// plus that fragment become one [`ComboStroke`]. A complete fragment with nothing buffered
/// stands alone. Fragments still buffered at the end are returned separately; they never
/// become strokes.
pub fn group_strokes<S: StrokeLike + 'static>(
    raw: Vec<S>,
) -> InkResult<(Vec<CharacterStroke<S>>, Vec<S>)> {
    let mut strokes = Vec::new();
    let mut pending: Vec<S> = Vec::new();
    for stroke in raw {
        let complete = stroke.is_complete();
        if complete && pending.is_empty() {
            strokes.push(CharacterStroke::Single(stroke));
        } else if complete {
            pending.push(stroke);
            let parts = std::mem::take(&mut pending);
            strokes.push(CharacterStroke::Combo(ComboStroke::new(parts)?));
        } else {
            pending.push(stroke);
        }
    }
    Ok((strokes, pending))
}

impl<S: std::fmt::Debug> std::fmt::Debug for Character<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Character")
            .field("options", &self.options)
            .field("strokes", &self.strokes)
            .field("canvas", &self.canvas.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/character/model.rs"]
mod tests;
