//! Scriptable stroke double that records every call into a shared log.
use std::{cell::RefCell, rc::Rc, time::Duration};

use crate::{
    animation::scheduler::{ManualScheduler, Scheduler},
    character::options::StrokeOptions,
    foundation::{
        core::{Bounds, Point},
        error::{InkError, InkResult},
    },
    render::canvas::SharedCanvas,
    stroke::{AnimationOpts, OnComplete, StrokeFactory, StrokeLike},
};

pub(crate) type Log = Rc<RefCell<Vec<String>>>;

pub(crate) fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub(crate) struct FakeStroke {
    pub name: String,
    complete: bool,
    bounds: Bounds,
    distance: f64,
    anim_time: Duration,
    scheduler: Option<Rc<ManualScheduler>>,
    log: Log,
}

impl FakeStroke {
    pub fn new(name: &str, complete: bool, log: &Log) -> Self {
        Self {
            name: name.to_string(),
            complete,
            bounds: Bounds::new(Point::ZERO, Point::ZERO),
            distance: 0.0,
            anim_time: Duration::ZERO,
            scheduler: None,
            log: Rc::clone(log),
        }
    }

    pub fn with_bounds(mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        self.bounds = Bounds::new(Point::new(x0, y0), Point::new(x1, y1));
        self
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Animations complete after `ms` on `sched` instead of synchronously.
    pub fn timed(mut self, sched: &Rc<ManualScheduler>, ms: u64) -> Self {
        self.scheduler = Some(Rc::clone(sched));
        self.anim_time = Duration::from_millis(ms);
        self
    }

    fn record(&self, op: &str) {
        let at = self
            .scheduler
            .as_ref()
            .map_or(0, |s| s.now().as_millis());
        self.log
            .borrow_mut()
            .push(format!("{op} {}@{at}", self.name));
    }
}

impl StrokeLike for FakeStroke {
    fn is_complete(&self) -> bool {
        self.complete
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn average_distance(&self, _points: &[Point]) -> f64 {
        self.distance
    }

    fn show(&self, opts: AnimationOpts) {
        self.record("show");
        if let Some(cb) = opts.on_complete {
            cb();
        }
    }

    fn hide(&self, opts: AnimationOpts) {
        self.record("hide");
        if let Some(cb) = opts.on_complete {
            cb();
        }
    }

    fn draw(&self) {
        self.record("draw");
    }

    fn animate(&self, on_complete: OnComplete) {
        self.record("animate");
        match &self.scheduler {
            Some(sched) => {
                let log = Rc::clone(&self.log);
                let name = self.name.clone();
                let clock = Rc::clone(sched);
                sched.schedule_after(
                    self.anim_time,
                    Box::new(move || {
                        let at = clock.now().as_millis();
                        log.borrow_mut().push(format!("done {name}@{at}"));
                        on_complete();
                    }),
                );
            }
            None => {
                self.record("done");
                on_complete();
            }
        }
    }

    fn set_canvas(&self, _canvas: SharedCanvas) {
        self.record("canvas");
    }
}

impl std::fmt::Debug for FakeStroke {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FakeStroke({})", self.name)
    }
}

/// Builds [`FakeStroke`]s from `"name[~] [x0 y0 x1 y1 [distance]]"` descriptions.
///
/// A trailing `~` on the name marks the fragment incomplete. The name `bad` fails to build.
pub(crate) struct FakeFactory {
    pub log: Log,
    pub scheduler: Option<(Rc<ManualScheduler>, u64)>,
}

impl FakeFactory {
    pub fn new(log: &Log) -> Self {
        Self {
            log: Rc::clone(log),
            scheduler: None,
        }
    }

    pub fn timed(log: &Log, sched: &Rc<ManualScheduler>, ms: u64) -> Self {
        Self {
            log: Rc::clone(log),
            scheduler: Some((Rc::clone(sched), ms)),
        }
    }
}

impl StrokeFactory for FakeFactory {
    type Stroke = FakeStroke;

    fn build(&self, path: &str, _opts: &StrokeOptions) -> InkResult<FakeStroke> {
        let mut tokens = path.split_whitespace();
        let head = tokens
            .next()
            .ok_or_else(|| InkError::path("empty fake path"))?;
        if head == "bad" {
            return Err(InkError::path("fake stroke 'bad' refused"));
        }
        let nums = tokens
            .map(|t| t.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| InkError::path(e.to_string()))?;

        let (name, complete) = match head.strip_suffix('~') {
            Some(name) => (name, false),
            None => (head, true),
        };
        let mut stroke = FakeStroke::new(name, complete, &self.log);
        if let [x0, y0, x1, y1, rest @ ..] = nums.as_slice() {
            stroke = stroke.with_bounds(*x0, *y0, *x1, *y1);
            if let [distance] = rest {
                stroke = stroke.with_distance(*distance);
            }
        }
        if let Some((sched, ms)) = &self.scheduler {
            stroke = stroke.timed(sched, *ms);
        }
        Ok(stroke)
    }
}
