// core/runner.rs
//
// Shared tween scheduler. The host loop owns one runner, hands clones of
// the handle to whoever starts playbacks, and ticks it once per frame.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::lifecycle::{Advance, Playback, StopBehavior, TweenEvent};

#[derive(Default)]
pub(crate) struct RunnerCore {
    active: RefCell<Vec<Playback>>,
    events: RefCell<Vec<TweenEvent>>,
}

impl RunnerCore {
    /// Remove a playback from the active set. Objects not currently
    /// present are tolerated.
    pub(crate) fn remove_playback(&self, playback: &Playback) {
        self.active.borrow_mut().retain(|p| !p.same(playback));
    }
}

/// Scheduler service ticking all registered playbacks once per frame.
///
/// Cheaply cloneable handle to shared single-threaded state; playbacks
/// keep a weak reference back to it for deregistration.
#[derive(Clone, Default)]
pub struct TweenRunner {
    core: Rc<RunnerCore>,
}

impl TweenRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a playback for ticking. Usually reached through
    /// `Playback::start`. Adding an already-registered playback is a
    /// no-op; adding one managed by another scheduling path is refused.
    pub fn add(&self, playback: &Playback) {
        if playback.is_managed() {
            if !self.contains(playback) {
                log::warn!("playback already managed by another scheduling path, ignoring add");
            }
            return;
        }
        playback.bind_runner(&self.core);
        self.core.active.borrow_mut().push(playback.clone());
    }

    /// Deregister a playback. Tolerates objects not currently present.
    pub fn remove(&self, playback: &Playback) {
        self.core.remove_playback(playback);
        playback.unbind_runner(&self.core);
    }

    /// Whether a playback is in the active set.
    pub fn contains(&self, playback: &Playback) -> bool {
        self.core.active.borrow().iter().any(|p| p.same(playback))
    }

    /// Step every registered playback once. Paused playbacks are skipped
    /// but stay registered; finished ones are removed and their completion
    /// events collected. Playbacks started or stopped from inside a tick
    /// are picked up without disturbing the rest of the sweep.
    pub fn tick(&self, dt: f32) {
        let batch = std::mem::take(&mut *self.core.active.borrow_mut());
        let mut keep = Vec::with_capacity(batch.len());

        for playback in batch {
            match playback.advance(dt, &self.core) {
                Advance::Keep => keep.push(playback),
                Advance::Drop(event) => {
                    if let Some(event) = event {
                        self.core.events.borrow_mut().push(event);
                    }
                }
            }
        }

        // Anything registered mid-sweep landed in the fresh list; append
        // it behind the survivors to preserve tick order.
        let mut active = self.core.active.borrow_mut();
        let added = std::mem::take(&mut *active);
        keep.extend(added);
        *active = keep;
    }

    /// Take the completion events collected since the last drain.
    pub fn drain_events(&self) -> Vec<TweenEvent> {
        std::mem::take(&mut *self.core.events.borrow_mut())
    }

    /// Pause every registered playback.
    pub fn pause_all(&self) {
        for playback in self.core.active.borrow().iter() {
            playback.pause();
        }
    }

    /// Resume every registered playback.
    pub fn resume_all(&self) {
        for playback in self.core.active.borrow().iter() {
            playback.resume();
        }
    }

    /// Stop every registered playback, forwarding `behavior` to each.
    pub fn stop_all(&self, behavior: StopBehavior) {
        let batch = std::mem::take(&mut *self.core.active.borrow_mut());
        for playback in &batch {
            playback.stop(behavior);
        }
    }

    /// Number of registered playbacks.
    pub fn len(&self) -> usize {
        self.core.active.borrow().len()
    }

    /// Whether no playbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.core.active.borrow().is_empty()
    }
}
