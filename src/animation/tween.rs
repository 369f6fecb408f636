use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use crate::animation::{
    ease::Ease,
    scheduler::{SharedScheduler, Task},
};

/// Time-sliced 0..1 progress driver.
///
/// A tween calls `on_step` with eased progress once per frame interval until the duration has
/// elapsed (the last step is always exactly `1.0`), then calls `on_done` once.
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    /// Total length of the tween.
    pub duration: Duration,
    /// Time between steps.
    pub frame_interval: Duration,
    /// Curve applied to progress before each step.
    pub ease: Ease,
}

/// Handle to a running tween.
///
/// Dropping the handle does not stop the tween.
#[derive(Clone)]
pub struct TweenHandle {
    state: Rc<TweenState>,
}

struct TweenState {
    tween: Tween,
    start: Duration,
    scheduler: SharedScheduler,
    finished: Cell<bool>,
    on_step: RefCell<Box<dyn FnMut(f64)>>,
    on_done: Cell<Option<Task>>,
}

impl Tween {
    /// Build a tween description; nothing runs until [`Tween::start`].
    pub fn new(duration: Duration, frame_interval: Duration, ease: Ease) -> Self {
        Self {
            duration,
            frame_interval,
            ease,
        }
    }

    /// Start the tween. A zero duration steps to `1.0` and completes synchronously.
    pub fn start(
        self,
        scheduler: SharedScheduler,
        on_step: impl FnMut(f64) + 'static,
        on_done: Task,
    ) -> TweenHandle {
        let state = Rc::new(TweenState {
            tween: self,
            start: scheduler.now(),
            scheduler,
            finished: Cell::new(false),
            on_step: RefCell::new(Box::new(on_step)),
            on_done: Cell::new(Some(on_done)),
        });
        if self.duration.is_zero() {
            state.step(1.0);
            state.finish();
        } else {
            state.step(0.0);
            TweenState::schedule_tick(&state);
        }
        TweenHandle { state }
    }
}

impl TweenHandle {
    /// Whether the completion callback has fired.
    pub fn is_finished(&self) -> bool {
        self.state.finished.get()
    }

    /// Stop stepping and fire the completion callback now if it has not fired yet.
    ///
    /// Used when a newer tween takes over the same property.
    pub fn finish_early(&self) {
        self.state.finish();
    }
}

impl TweenState {
    fn step(&self, progress: f64) {
        if let Ok(mut on_step) = self.on_step.try_borrow_mut() {
            on_step(progress);
        }
    }

    fn finish(&self) {
        if self.finished.replace(true) {
            return;
        }
        if let Some(done) = self.on_done.take() {
            done();
        }
    }

    fn schedule_tick(this: &Rc<Self>) {
        let elapsed = this.scheduler.now().saturating_sub(this.start);
        let remaining = this.tween.duration.saturating_sub(elapsed);
        let interval = if this.tween.frame_interval.is_zero() {
            remaining
        } else {
            this.tween.frame_interval.min(remaining)
        };
        let next = Rc::clone(this);
        this.scheduler
            .schedule_after(interval, Box::new(move || TweenState::tick(&next)));
    }

    fn tick(this: &Rc<Self>) {
        if this.finished.get() {
            return;
        }
        let elapsed = this.scheduler.now().saturating_sub(this.start);
        if elapsed >= this.tween.duration {
            this.step(1.0);
            this.finish();
        } else {
            this.step(this.tween.ease.sample(elapsed, this.tween.duration));
            TweenState::schedule_tick(this);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
