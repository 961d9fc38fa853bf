// tweens/value.rs
//
// The interpolating tweenable: moves a value from start to end over a
// fixed duration with an easing curve. Observers read the animated value
// through a shared output cell.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::lifecycle::{StopBehavior, TickResult, Tweenable, TweenEvent};
use crate::easing::{ease, Easing, TweenValue};

/// What happens when a tween reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Finish and report done.
    #[default]
    Once,
    /// Restart from the beginning.
    Loop,
    /// Reverse direction each pass.
    PingPong,
}

/// Interpolates from a start to an end value over a fixed duration.
pub struct ValueTween<V: TweenValue> {
    from: V,
    to: V,
    /// Duration of one pass in seconds.
    duration: f32,
    elapsed: f32,
    easing: Easing,
    loop_mode: LoopMode,
    /// Ping-pong direction, true while heading from `from` to `to`.
    forward: bool,
    value: V,
    output: Option<Rc<Cell<V>>>,
    completion: Option<TweenEvent>,
    recycle_on_finish: bool,
}

impl<V: TweenValue> ValueTween<V> {
    pub fn new(from: V, to: V, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
            loop_mode: LoopMode::Once,
            forward: true,
            value: from,
            output: None,
            completion: None,
            recycle_on_finish: false,
        }
    }

    // -- Builder methods --

    pub fn with_loop(mut self, mode: LoopMode) -> Self {
        self.loop_mode = mode;
        self
    }

    /// Publish the animated value into a shared cell each tick.
    pub fn with_output(mut self, output: Rc<Cell<V>>) -> Self {
        output.set(self.value);
        self.output = Some(output);
        self
    }

    /// Event reported through the runner when the tween finishes.
    pub fn with_completion(mut self, event: TweenEvent) -> Self {
        self.completion = Some(event);
        self
    }

    /// Report `FinishedRecycle` at the end so the runner rewinds this
    /// tween for reuse instead of leaving it spent.
    pub fn with_recycle(mut self) -> Self {
        self.recycle_on_finish = true;
        self
    }

    /// The most recently computed value.
    pub fn value(&self) -> V {
        self.value
    }

    /// Normalized progress of the current pass, in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Whether a once-mode tween has reached its end.
    pub fn is_complete(&self) -> bool {
        self.loop_mode == LoopMode::Once && self.elapsed >= self.duration
    }

    fn publish(&self) {
        if let Some(output) = &self.output {
            output.set(self.value);
        }
    }

    fn finish_result(&self) -> TickResult {
        if self.recycle_on_finish {
            TickResult::FinishedRecycle
        } else {
            TickResult::Finished
        }
    }
}

impl<V: TweenValue> Tweenable for ValueTween<V> {
    fn tick(&mut self, dt: f32) -> TickResult {
        // Already spent (a driver task may keep ticking after the end).
        if self.is_complete() {
            return self.finish_result();
        }

        self.elapsed += dt;
        let raw = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        let t = if self.forward {
            raw.clamp(0.0, 1.0)
        } else {
            (1.0 - raw).clamp(0.0, 1.0)
        };
        self.value = ease(self.from, self.to, t, self.easing);
        self.publish();

        if self.elapsed >= self.duration {
            match self.loop_mode {
                LoopMode::Once => return self.finish_result(),
                LoopMode::Loop => self.elapsed = 0.0,
                LoopMode::PingPong => {
                    self.elapsed = 0.0;
                    self.forward = !self.forward;
                }
            }
        }
        TickResult::Running
    }

    fn on_stop(&mut self, behavior: StopBehavior) {
        match behavior {
            StopBehavior::AsIs => {}
            StopBehavior::Complete | StopBehavior::CompleteNow => {
                self.elapsed = self.duration;
                self.forward = true;
                self.value = self.to;
                self.publish();
            }
        }
    }

    fn recycle(&mut self) {
        self.elapsed = 0.0;
        self.forward = true;
        self.value = self.from;
    }

    fn completion_event(&self) -> Option<TweenEvent> {
        self.completion
    }
}
