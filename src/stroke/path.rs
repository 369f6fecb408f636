use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    time::Duration,
};

use kurbo::{ParamCurveNearest, PathEl, Shape};

use crate::{
    animation::{
        ease::Ease,
        scheduler::SharedScheduler,
        tween::{Tween, TweenHandle},
    },
    character::options::StrokeOptions,
    foundation::{
        core::{BezPath, Bounds, Point},
        error::{InkError, InkResult},
    },
    render::canvas::{DrawOp, SharedCanvas},
    stroke::{AnimationOpts, OnComplete, StrokeFactory, StrokeLike},
};

const FLATTEN_TOLERANCE: f64 = 0.1;
const NEAREST_ACCURACY: f64 = 1e-6;

/// A single stroke parsed from an SVG path `d` string.
///
/// Cloning yields another handle to the same stroke.
#[derive(Clone)]
pub struct PathStroke {
    inner: Rc<Inner>,
}

struct Inner {
    outline: BezPath,
    polylines: Vec<Vec<Point>>,
    length: f64,
    complete: bool,
    bounds: Bounds,
    opts: StrokeOptions,
    scheduler: SharedScheduler,
    state: RefCell<RenderState>,
}

struct RenderState {
    opacity: f64,
    reveal: f64,
    canvas: Option<SharedCanvas>,
    fade: Option<TweenHandle>,
    drawing: Option<TweenHandle>,
}

impl PathStroke {
    /// Parse `d`. Fails on malformed input or a path without segments.
    pub fn new(d: &str, opts: StrokeOptions, scheduler: SharedScheduler) -> InkResult<Self> {
        let outline =
            BezPath::from_svg(d).map_err(|e| InkError::path(format!("invalid path '{d}': {e}")))?;
        if outline.segments().next().is_none() {
            return Err(InkError::path(format!("path '{d}' has no segments")));
        }

        let complete = outline
            .elements()
            .iter()
            .any(|el| matches!(el, PathEl::ClosePath));
        let bounds = Bounds::from(outline.bounding_box());
        let polylines = flatten(&outline);
        let length = polylines.iter().map(|line| polyline_length(line)).sum();

        Ok(Self {
            inner: Rc::new(Inner {
                outline,
                polylines,
                length,
                complete,
                bounds,
                opts,
                scheduler,
                state: RefCell::new(RenderState {
                    opacity: 1.0,
                    reveal: 1.0,
                    canvas: None,
                    fade: None,
                    drawing: None,
                }),
            }),
        })
    }

    /// Parsed outline.
    pub fn outline(&self) -> &BezPath {
        &self.inner.outline
    }

    /// Total flattened length in path units.
    pub fn length(&self) -> f64 {
        self.inner.length
    }

    /// Current opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.inner.state.borrow().opacity
    }

    /// Fraction of the outline currently drawn, by length.
    pub fn reveal(&self) -> f64 {
        self.inner.state.borrow().reveal
    }

    fn fade_to(&self, target: f64, opts: AnimationOpts) {
        let previous = self.inner.state.borrow_mut().fade.take();
        if let Some(previous) = previous {
            previous.finish_early();
        }

        let from = self.inner.state.borrow().opacity;
        let duration = opts.duration.unwrap_or_else(|| self.inner.opts.fade_duration());
        let on_done: OnComplete = match opts.on_complete {
            Some(cb) => cb,
            None => Box::new(|| {}),
        };
        let weak = Rc::downgrade(&self.inner);
        let handle = self.tween(duration, Ease::Linear).start(
            Rc::clone(&self.inner.scheduler),
            move |p| {
                Inner::update(&weak, |state| state.opacity = from + (target - from) * p);
            },
            on_done,
        );
        self.inner.state.borrow_mut().fade = Some(handle);
    }

    fn tween(&self, duration: Duration, ease: Ease) -> Tween {
        Tween::new(duration, self.inner.opts.frame_interval(), ease)
    }
}

impl Inner {
    fn update(weak: &Weak<Inner>, f: impl FnOnce(&mut RenderState)) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        if let Ok(mut state) = inner.state.try_borrow_mut() {
            f(&mut state);
        }
        inner.draw();
    }

    fn draw(&self) {
        let (canvas, opacity, reveal) = {
            let state = self.state.borrow();
            let Some(canvas) = state.canvas.clone() else {
                return;
            };
            (canvas, state.opacity, state.reveal)
        };
        if opacity <= 0.0 || reveal <= 0.0 {
            return;
        }

        let path = if reveal >= 1.0 {
            self.outline.clone()
        } else {
            revealed_prefix(&self.polylines, self.length * reveal)
        };
        let op = DrawOp::StrokePath {
            path,
            color: self.opts.color_rgba8,
            width: self.opts.stroke_width,
            opacity: opacity as f32,
        };
        if let Ok(mut canvas) = canvas.try_borrow_mut() {
            canvas.draw(op);
        }
    }
}

impl StrokeLike for PathStroke {
    fn is_complete(&self) -> bool {
        self.inner.complete
    }

    fn bounds(&self) -> Bounds {
        self.inner.bounds
    }

    fn average_distance(&self, points: &[Point]) -> f64 {
        if points.is_empty() {
            return f64::INFINITY;
        }
        let total: f64 = points
            .iter()
            .map(|&p| {
                self.inner
                    .outline
                    .segments()
                    .map(|seg| seg.nearest(p, NEAREST_ACCURACY).distance_sq)
                    .fold(f64::INFINITY, f64::min)
                    .sqrt()
            })
            .sum();
        total / points.len() as f64
    }

    fn show(&self, opts: AnimationOpts) {
        let drawing = self.inner.state.borrow_mut().drawing.take();
        if let Some(drawing) = drawing {
            drawing.finish_early();
        }
        self.inner.state.borrow_mut().reveal = 1.0;
        self.fade_to(1.0, opts);
    }

    fn hide(&self, opts: AnimationOpts) {
        self.fade_to(0.0, opts);
    }

    fn draw(&self) {
        self.inner.draw();
    }

    fn animate(&self, on_complete: OnComplete) {
        let (fade, drawing) = {
            let mut state = self.inner.state.borrow_mut();
            (state.fade.take(), state.drawing.take())
        };
        for handle in [fade, drawing].into_iter().flatten() {
            handle.finish_early();
        }
        {
            let mut state = self.inner.state.borrow_mut();
            state.opacity = 1.0;
            state.reveal = 0.0;
        }

        let weak = Rc::downgrade(&self.inner);
        let handle = self
            .tween(
                self.inner.opts.stroke_animation_duration(),
                self.inner.opts.ease,
            )
            .start(
                Rc::clone(&self.inner.scheduler),
                move |p| Inner::update(&weak, |state| state.reveal = p),
                on_complete,
            );
        self.inner.state.borrow_mut().drawing = Some(handle);
    }

    fn set_canvas(&self, canvas: SharedCanvas) {
        self.inner.state.borrow_mut().canvas = Some(canvas);
    }
}

impl std::fmt::Debug for PathStroke {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathStroke")
            .field("complete", &self.inner.complete)
            .field("bounds", &self.inner.bounds)
            .field("length", &self.inner.length)
            .finish_non_exhaustive()
    }
}

/// Builds [`PathStroke`]s that animate on a shared scheduler.
#[derive(Clone)]
pub struct PathStrokeFactory {
    scheduler: SharedScheduler,
}

impl PathStrokeFactory {
    /// Factory whose strokes tween on `scheduler`.
    pub fn new(scheduler: SharedScheduler) -> Self {
        Self { scheduler }
    }
}

impl StrokeFactory for PathStrokeFactory {
    type Stroke = PathStroke;

    fn build(&self, path: &str, opts: &StrokeOptions) -> InkResult<PathStroke> {
        PathStroke::new(path, opts.clone(), Rc::clone(&self.scheduler))
    }
}

fn flatten(outline: &BezPath) -> Vec<Vec<Point>> {
    let mut lines: Vec<Vec<Point>> = Vec::new();
    kurbo::flatten(outline, FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => lines.push(vec![p]),
        PathEl::LineTo(p) => {
            if let Some(line) = lines.last_mut() {
                line.push(p);
            }
        }
        PathEl::ClosePath => {
            if let Some(line) = lines.last_mut()
                && let Some(&first) = line.first()
            {
                line.push(first);
            }
        }
        // flatten only emits lines
        _ => {}
    });
    lines
}

fn polyline_length(line: &[Point]) -> f64 {
    line.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Open path covering the first `target` units of the polylines.
fn revealed_prefix(lines: &[Vec<Point>], target: f64) -> BezPath {
    let mut out = BezPath::new();
    let mut walked = 0.0;
    for line in lines {
        let Some(&start) = line.first() else {
            continue;
        };
        if walked >= target {
            break;
        }
        out.move_to(start);
        for w in line.windows(2) {
            let seg = w[0].distance(w[1]);
            if walked + seg >= target {
                let t = if seg > 0.0 { (target - walked) / seg } else { 1.0 };
                out.line_to(w[0].lerp(w[1], t));
                return out;
            }
            out.line_to(w[1]);
            walked += seg;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/path.rs"]
mod tests;
