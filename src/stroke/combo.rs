use std::rc::Rc;

use crate::{
    foundation::{
        core::{Bounds, Point},
        error::{InkError, InkResult},
    },
    render::canvas::SharedCanvas,
    stroke::{AnimationOpts, OnComplete, StrokeLike},
};

/// Several consecutive stroke fragments acting as one logical stroke.
///
/// The combo takes ownership of its fragments; they are not reachable from outside it.
pub struct ComboStroke<S> {
    parts: Rc<Vec<S>>,
}

impl<S: StrokeLike + 'static> ComboStroke<S> {
    /// Take ownership of `parts` in drawing order. Fails when `parts` is empty.
    pub fn new(parts: Vec<S>) -> InkResult<Self> {
        if parts.is_empty() {
            return Err(InkError::validation("combo stroke needs at least one part"));
        }
        Ok(Self {
            parts: Rc::new(parts),
        })
    }

    /// Number of merged fragments.
    pub fn num_parts(&self) -> usize {
        self.parts.len()
    }
}

fn animate_part<S: StrokeLike + 'static>(parts: Rc<Vec<S>>, idx: usize, on_complete: OnComplete) {
    let Some(part) = parts.get(idx) else {
        on_complete();
        return;
    };
    let rest = Rc::clone(&parts);
    part.animate(Box::new(move || {
        if idx + 1 < rest.len() {
            animate_part(rest, idx + 1, on_complete);
        } else {
            on_complete();
        }
    }));
}

impl<S: StrokeLike + 'static> StrokeLike for ComboStroke<S> {
    fn is_complete(&self) -> bool {
        self.parts.last().is_some_and(S::is_complete)
    }

    fn bounds(&self) -> Bounds {
        // parts is never empty
        Bounds::enclosing(self.parts.iter().map(S::bounds))
            .unwrap_or_else(|| Bounds::new(Point::ZERO, Point::ZERO))
    }

    fn average_distance(&self, points: &[Point]) -> f64 {
        let total: f64 = self
            .parts
            .iter()
            .map(|part| part.average_distance(points))
            .sum();
        total / self.parts.len() as f64
    }

    fn show(&self, opts: AnimationOpts) {
        for (part, opts) in self.parts.iter().zip(opts.fan_out(self.parts.len())) {
            part.show(opts);
        }
    }

    fn hide(&self, opts: AnimationOpts) {
        for (part, opts) in self.parts.iter().zip(opts.fan_out(self.parts.len())) {
            part.hide(opts);
        }
    }

    fn draw(&self) {
        for part in self.parts.iter() {
            part.draw();
        }
    }

    fn animate(&self, on_complete: OnComplete) {
        animate_part(Rc::clone(&self.parts), 0, on_complete);
    }

    fn set_canvas(&self, canvas: SharedCanvas) {
        for part in self.parts.iter() {
            part.set_canvas(Rc::clone(&canvas));
        }
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for ComboStroke<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComboStroke")
            .field("parts", &self.parts)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/combo.rs"]
mod tests;
