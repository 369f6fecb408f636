use std::{cell::RefCell, collections::BTreeMap, rc::Rc, time::Duration};

/// Deferred unit of work run by a [`Scheduler`].
pub type Task = Box<dyn FnOnce()>;

/// Single-threaded schedule-after-duration primitive.
///
/// Implementations must never run `task` from inside `schedule_after`; the task always runs
/// on a later turn of whatever loop drives the scheduler.
pub trait Scheduler {
    /// Current time on the scheduler's clock.
    fn now(&self) -> Duration;

    /// Run `task` once `delay` has elapsed.
    fn schedule_after(&self, delay: Duration, task: Task);
}

/// Reference-counted scheduler handle shared by a character and its strokes.
pub type SharedScheduler = Rc<dyn Scheduler>;

/// Scheduler driven by an explicit virtual clock.
///
/// Hosts advance it from their own frame loop; tests use it to step time deterministically.
#[derive(Default)]
pub struct ManualScheduler {
    inner: RefCell<Queue>,
}

#[derive(Default)]
struct Queue {
    now: Duration,
    seq: u64,
    tasks: BTreeMap<(Duration, u64), Task>,
}

impl ManualScheduler {
    /// Scheduler with its clock at zero and no tasks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as [`ManualScheduler::new`], wrapped for sharing.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Move the clock forward by `by`, running every task that falls due on the way.
    ///
    /// Tasks run in due-time order (ties in scheduling order). Tasks scheduled while advancing
    /// that fall inside the window run too. Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.inner.borrow().now + by;
        let mut ran = 0;
        while let Some(task) = self.pop_due(Some(target)) {
            task();
            ran += 1;
        }
        self.inner.borrow_mut().now = target;
        ran
    }

    /// Run tasks until the queue is empty, jumping the clock to each due time.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.pop_due(None) {
            task();
            ran += 1;
        }
        ran
    }

    fn pop_due(&self, limit: Option<Duration>) -> Option<Task> {
        let mut q = self.inner.borrow_mut();
        let (&(due, _), _) = q.tasks.first_key_value()?;
        if limit.is_some_and(|limit| due > limit) {
            return None;
        }
        let ((due, _), task) = q.tasks.pop_first()?;
        q.now = q.now.max(due);
        Some(task)
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    fn schedule_after(&self, delay: Duration, task: Task) {
        let mut q = self.inner.borrow_mut();
        let due = q.now + delay;
        let seq = q.seq;
        q.seq += 1;
        q.tasks.insert((due, seq), task);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
