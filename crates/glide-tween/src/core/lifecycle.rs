// core/lifecycle.rs
//
// Playback lifecycle for tweenable objects. A Playback wraps anything
// implementing Tweenable and makes it schedulable through one of two
// paths: a shared TweenRunner ticked by the host loop, or a repeating
// task attached to a host Driver.
//
// Usage:
//   let runner = TweenRunner::new();
//   let fade = Playback::new(ValueTween::new(1.0, 0.0, 0.5, Easing::QuadOut));
//   fade.start(&runner);
//   runner.tick(dt);  // once per frame

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::core::driver::{Driver, TaskHandle};
use crate::core::runner::{RunnerCore, TweenRunner};

/// Outcome of a single tick step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickResult {
    /// Keep ticking next frame.
    #[default]
    Running,
    /// Done. Remove from the active schedule.
    Finished,
    /// Done. Remove, then reset via `recycle()` so the object can run again.
    FinishedRecycle,
}

impl TickResult {
    /// Whether this outcome ends the playback.
    pub fn is_done(self) -> bool {
        !matches!(self, TickResult::Running)
    }
}

/// How a stopped tweenable should treat its final value.
///
/// The lifecycle layer forwards this to `Tweenable::on_stop` and attaches
/// no semantics of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopBehavior {
    /// Halt wherever the last tick left things.
    #[default]
    AsIs,
    /// Settle on the end value.
    Complete,
    /// Settle on the end value before `stop` returns.
    CompleteNow,
}

/// Completion event id reported to the runner when a tweenable finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenEvent(pub u32);

/// An object that can be registered for per-frame updates and report
/// completion.
///
/// Implementors are not limited to interpolating a value; anything that
/// wants a tick each frame fits, see `TweenChain` for a composite one.
pub trait Tweenable {
    /// Advance by `dt` seconds.
    fn tick(&mut self, dt: f32) -> TickResult;

    /// Stop hint forwarded from `Playback::stop`. Default: ignore it.
    fn on_stop(&mut self, _behavior: StopBehavior) {}

    /// Reset internal state so the object can run again.
    fn recycle(&mut self) {}

    /// Event reported to the runner when this object finishes.
    fn completion_event(&self) -> Option<TweenEvent> {
        None
    }
}

/// The scheduling path currently driving a playback.
enum TickSource {
    /// Registered with a runner; the weak handle is the removal path.
    Runner(Weak<RunnerCore>),
    /// Attached to a driver task; the handle is the cancellation path.
    Task(TaskHandle),
}

pub(crate) struct PlaybackInner {
    tween: Box<dyn Tweenable>,
    paused: bool,
    source: Option<TickSource>,
}

impl PlaybackInner {
    /// Managed means the recorded source is still live. A stale runner
    /// weak-handle or a cancelled task no longer counts.
    fn managed(&self) -> bool {
        match &self.source {
            Some(TickSource::Runner(core)) => core.strong_count() > 0,
            Some(TickSource::Task(handle)) => !handle.is_cancelled(),
            None => false,
        }
    }
}

/// Sweep decision handed back to the runner for one registered playback.
pub(crate) enum Advance {
    Keep,
    Drop(Option<TweenEvent>),
}

/// Cloneable handle that makes a tweenable schedulable.
///
/// At most one scheduling path (runner or driver task) is active at a
/// time. Starting while already managed only clears the paused flag, it
/// never double-registers. The playback cell is borrowed for the whole
/// duration of a tick, so a tweenable must not control its own playback
/// from inside `tick`.
#[derive(Clone)]
pub struct Playback {
    inner: Rc<RefCell<PlaybackInner>>,
}

impl Playback {
    pub fn new(tween: impl Tweenable + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PlaybackInner {
                tween: Box::new(tween),
                paused: false,
                source: None,
            })),
        }
    }

    /// True while registered with an active scheduling path.
    pub fn is_managed(&self) -> bool {
        self.inner.borrow().managed()
    }

    pub fn is_paused(&self) -> bool {
        self.inner.borrow().paused
    }

    /// True iff managed and not paused.
    pub fn is_running(&self) -> bool {
        let inner = self.inner.borrow();
        inner.managed() && !inner.paused
    }

    /// Register with `runner`. Re-invoking while managed only un-pauses.
    pub fn start(&self, runner: &TweenRunner) {
        if self.inner.borrow().managed() {
            self.inner.borrow_mut().paused = false;
            return;
        }
        runner.add(self);
        self.inner.borrow_mut().paused = false;
    }

    /// Attach to a repeating task on `driver` instead of a runner. The
    /// supplied step ticks the playback every frame until the task is
    /// cancelled by `stop`. Same idempotency rule as `start`.
    pub fn start_on(&self, driver: &mut dyn Driver) {
        if self.inner.borrow().managed() {
            self.inner.borrow_mut().paused = false;
            return;
        }
        let cell = Rc::downgrade(&self.inner);
        let handle = driver.spawn_repeating(Box::new(move |dt| match cell.upgrade() {
            Some(cell) => {
                Playback::drive(&cell, dt);
                true
            }
            // Playback dropped by user code; let the driver retire the task.
            None => false,
        }));
        let mut inner = self.inner.borrow_mut();
        inner.source = Some(TickSource::Task(handle));
        inner.paused = false;
    }

    /// Skip updates but keep the registration.
    pub fn pause(&self) {
        self.inner.borrow_mut().paused = true;
    }

    pub fn resume(&self) {
        self.inner.borrow_mut().paused = false;
    }

    /// Deregister from whichever scheduling path is active: a driver task
    /// is cancelled, a runner registration is removed. The playback ends
    /// up paused and unmanaged, and can be started again later.
    ///
    /// `behavior` is forwarded to the tweenable's `on_stop` hook before
    /// deregistration. Stopping a playback that was never started is a
    /// no-op.
    pub fn stop(&self, behavior: StopBehavior) {
        let source = {
            let mut inner = self.inner.borrow_mut();
            inner.tween.on_stop(behavior);
            inner.paused = true;
            inner.source.take()
        };
        match source {
            Some(TickSource::Task(handle)) => handle.cancel(),
            Some(TickSource::Runner(core)) => {
                if let Some(core) = core.upgrade() {
                    core.remove_playback(self);
                }
            }
            None => {}
        }
    }

    // ---- crate-internal plumbing for the runner and driver paths ----

    pub(crate) fn same(&self, other: &Playback) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Record this playback as runner-managed. Caller has checked that no
    /// other path is live.
    pub(crate) fn bind_runner(&self, core: &Rc<RunnerCore>) {
        self.inner.borrow_mut().source = Some(TickSource::Runner(Rc::downgrade(core)));
    }

    /// Clear the source if it points at `core`. Used by direct runner
    /// removal; `stop` has already taken the source by the time it asks
    /// the runner for removal.
    pub(crate) fn unbind_runner(&self, core: &Rc<RunnerCore>) {
        let mut inner = self.inner.borrow_mut();
        if let Some(TickSource::Runner(weak)) = &inner.source {
            if std::ptr::eq(weak.as_ptr(), Rc::as_ptr(core)) {
                inner.source = None;
            }
        }
    }

    /// One runner sweep step: decide whether this playback stays in the
    /// active set, ticking it if appropriate.
    pub(crate) fn advance(&self, dt: f32, owner: &Rc<RunnerCore>) -> Advance {
        let mut inner = self.inner.borrow_mut();

        // Stopped or re-registered elsewhere since the sweep began.
        let attached = matches!(
            &inner.source,
            Some(TickSource::Runner(weak)) if std::ptr::eq(weak.as_ptr(), Rc::as_ptr(owner))
        );
        if !attached {
            return Advance::Drop(None);
        }
        if inner.paused {
            return Advance::Keep;
        }

        let result = inner.tween.tick(dt);
        match result {
            TickResult::Running => Advance::Keep,
            TickResult::Finished | TickResult::FinishedRecycle => {
                let event = inner.tween.completion_event();
                if result == TickResult::FinishedRecycle {
                    inner.tween.recycle();
                }
                // Natural completion leaves the playback restartable.
                inner.source = None;
                Advance::Drop(event)
            }
        }
    }

    /// Driver-path step: tick until the task is cancelled. A finished
    /// tweenable just keeps reporting done; the task only goes away when
    /// `stop` cancels it.
    fn drive(cell: &Rc<RefCell<PlaybackInner>>, dt: f32) {
        let mut inner = cell.borrow_mut();
        if inner.paused {
            return;
        }
        let _ = inner.tween.tick(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::driver::FrameDriver;

    /// Test tweenable: counts ticks and optionally finishes after a budget.
    struct Probe {
        ticks: u32,
        finish_after: Option<u32>,
    }

    impl Probe {
        fn endless() -> Self {
            Self {
                ticks: 0,
                finish_after: None,
            }
        }

        fn finishing_after(ticks: u32) -> Self {
            Self {
                finish_after: Some(ticks),
                ..Self::endless()
            }
        }
    }

    impl Tweenable for Probe {
        fn tick(&mut self, _dt: f32) -> TickResult {
            self.ticks += 1;
            match self.finish_after {
                Some(budget) if self.ticks >= budget => TickResult::Finished,
                _ => TickResult::Running,
            }
        }
    }

    #[test]
    fn start_twice_is_idempotent() {
        let runner = TweenRunner::new();
        let playback = Playback::new(Probe::endless());

        playback.start(&runner);
        playback.start(&runner);

        assert_eq!(runner.len(), 1);
        assert!(playback.is_running());
    }

    #[test]
    fn restart_while_managed_clears_pause_only() {
        let runner = TweenRunner::new();
        let playback = Playback::new(Probe::endless());

        playback.start(&runner);
        playback.pause();
        assert!(!playback.is_running());

        playback.start(&runner);
        assert!(playback.is_running());
        assert_eq!(runner.len(), 1);
    }

    #[test]
    fn pause_blocks_running_regardless_of_managed_state() {
        let runner = TweenRunner::new();
        let playback = Playback::new(Probe::endless());

        // Unmanaged: never running, paused or not.
        playback.pause();
        assert!(!playback.is_running());
        playback.resume();
        assert!(!playback.is_running());

        playback.start(&runner);
        playback.pause();
        assert!(playback.is_managed());
        assert!(!playback.is_running());
        playback.resume();
        assert!(playback.is_running());
    }

    #[test]
    fn paused_playback_is_not_ticked_but_stays_registered() {
        let runner = TweenRunner::new();
        let playback = Playback::new(Probe::endless());

        playback.start(&runner);
        playback.pause();
        runner.tick(0.016);
        runner.tick(0.016);

        assert_eq!(runner.len(), 1);
        assert!(playback.is_managed());
    }

    #[test]
    fn stop_then_restart_re_registers() {
        let runner = TweenRunner::new();
        let playback = Playback::new(Probe::endless());

        playback.start(&runner);
        playback.stop(StopBehavior::AsIs);

        assert!(!playback.is_running());
        assert!(!runner.contains(&playback));

        playback.start(&runner);
        assert!(playback.is_running());
        assert_eq!(runner.len(), 1);
    }

    #[test]
    fn stop_without_start_is_a_noop() {
        let playback = Playback::new(Probe::endless());
        playback.stop(StopBehavior::AsIs);
        assert!(!playback.is_running());
        assert!(!playback.is_managed());
    }

    #[test]
    fn double_stop_is_tolerated() {
        let runner = TweenRunner::new();
        let playback = Playback::new(Probe::endless());

        playback.start(&runner);
        playback.stop(StopBehavior::AsIs);
        playback.stop(StopBehavior::AsIs);

        assert_eq!(runner.len(), 0);
        assert!(!playback.is_managed());
    }

    #[test]
    fn stop_forwards_behavior_to_the_hook() {
        use std::cell::Cell;

        struct HookProbe {
            seen: Rc<Cell<Option<StopBehavior>>>,
        }

        impl Tweenable for HookProbe {
            fn tick(&mut self, _dt: f32) -> TickResult {
                TickResult::Running
            }

            fn on_stop(&mut self, behavior: StopBehavior) {
                self.seen.set(Some(behavior));
            }
        }

        let runner = TweenRunner::new();
        let seen = Rc::new(Cell::new(None));
        let playback = Playback::new(HookProbe { seen: seen.clone() });

        playback.start(&runner);
        playback.stop(StopBehavior::Complete);
        assert_eq!(seen.get(), Some(StopBehavior::Complete));

        // The hook fires even with no active registration left.
        playback.stop(StopBehavior::CompleteNow);
        assert_eq!(seen.get(), Some(StopBehavior::CompleteNow));
    }

    #[test]
    fn driver_stop_cancels_the_task_and_never_touches_the_runner() {
        let runner = TweenRunner::new();
        let mut driver = FrameDriver::new();
        let playback = Playback::new(Probe::endless());

        playback.start_on(&mut driver);
        assert!(playback.is_running());
        assert_eq!(runner.len(), 0);
        assert_eq!(driver.len(), 1);

        playback.stop(StopBehavior::AsIs);
        assert!(!playback.is_running());
        assert_eq!(runner.len(), 0);

        // The cancelled task is retired on the next pump.
        driver.pump(0.016);
        assert_eq!(driver.len(), 0);
    }

    #[test]
    fn driver_path_ticks_until_cancelled() {
        let mut driver = FrameDriver::new();
        let playback = Playback::new(Probe::finishing_after(1));

        playback.start_on(&mut driver);
        driver.pump(0.016);
        driver.pump(0.016);
        driver.pump(0.016);

        // Finished long ago, but the task stays until stop cancels it.
        assert_eq!(driver.len(), 1);
        playback.stop(StopBehavior::AsIs);
        driver.pump(0.016);
        assert_eq!(driver.len(), 0);
    }

    #[test]
    fn driver_pause_skips_ticks_without_cancelling() {
        let mut driver = FrameDriver::new();
        let playback = Playback::new(Probe::endless());

        playback.start_on(&mut driver);
        playback.pause();
        driver.pump(0.016);
        driver.pump(0.016);

        assert_eq!(driver.len(), 1);
        assert!(playback.is_managed());
        assert!(!playback.is_running());
    }

    #[test]
    fn start_while_driver_managed_does_not_register_with_runner() {
        let runner = TweenRunner::new();
        let mut driver = FrameDriver::new();
        let playback = Playback::new(Probe::endless());

        playback.start_on(&mut driver);
        playback.pause();

        // Already managed: this only un-pauses.
        playback.start(&runner);
        assert_eq!(runner.len(), 0);
        assert!(playback.is_running());
    }

    #[test]
    fn runner_stop_requests_removal_exactly_once() {
        let runner = TweenRunner::new();
        let playback = Playback::new(Probe::endless());

        playback.start(&runner);
        assert!(runner.contains(&playback));

        playback.stop(StopBehavior::AsIs);
        assert!(!runner.contains(&playback));
        assert_eq!(runner.len(), 0);

        // A second stop has no registration left to remove.
        playback.stop(StopBehavior::AsIs);
        assert_eq!(runner.len(), 0);
    }

    #[test]
    fn natural_completion_leaves_playback_restartable() {
        let runner = TweenRunner::new();
        let playback = Playback::new(Probe::finishing_after(2));

        playback.start(&runner);
        runner.tick(0.016);
        assert!(playback.is_running());
        runner.tick(0.016);

        assert!(!playback.is_managed());
        assert_eq!(runner.len(), 0);

        playback.start(&runner);
        assert!(playback.is_running());
    }

    #[test]
    fn full_lifecycle_scenario() {
        let runner = TweenRunner::new();
        let playback = Playback::new(Probe::endless());

        playback.start(&runner);
        assert!(playback.is_running());

        playback.pause();
        assert!(!playback.is_running());

        playback.resume();
        assert!(playback.is_running());

        playback.stop(StopBehavior::AsIs);
        assert!(!playback.is_running());
        assert!(!runner.contains(&playback));
    }
}
