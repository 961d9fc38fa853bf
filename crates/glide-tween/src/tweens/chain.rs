//! Sequential composition of tweenables.
//!
//! A chain is itself a tweenable, so chains nest and take the same
//! lifecycle treatment as any single tween.

use crate::core::lifecycle::{StopBehavior, TickResult, Tweenable, TweenEvent};

/// Runs a sequence of tweenables one after another.
///
/// Each link gets ticked until it reports done, then the next link takes
/// over on the following tick. The chain finishes when its last link
/// does. An empty chain finishes on its first tick.
#[derive(Default)]
pub struct TweenChain {
    links: Vec<Box<dyn Tweenable>>,
    current: usize,
    completion: Option<TweenEvent>,
}

impl TweenChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a link. Builder-style, so chains read in play order.
    pub fn then(mut self, link: impl Tweenable + 'static) -> Self {
        self.links.push(Box::new(link));
        self
    }

    /// Event reported through the runner when the whole chain finishes.
    pub fn with_completion(mut self, event: TweenEvent) -> Self {
        self.completion = Some(event);
        self
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Index of the link currently playing.
    pub fn current_index(&self) -> usize {
        self.current
    }
}

impl Tweenable for TweenChain {
    fn tick(&mut self, dt: f32) -> TickResult {
        let Some(link) = self.links.get_mut(self.current) else {
            return TickResult::Finished;
        };

        let result = link.tick(dt);
        if result.is_done() {
            if result == TickResult::FinishedRecycle {
                link.recycle();
            }
            self.current += 1;
            if self.current >= self.links.len() {
                return TickResult::Finished;
            }
        }
        TickResult::Running
    }

    fn on_stop(&mut self, behavior: StopBehavior) {
        if behavior == StopBehavior::AsIs {
            return;
        }
        // Forward the hint to every link that has not finished yet, then
        // mark the chain spent.
        for link in self.links.iter_mut().skip(self.current) {
            link.on_stop(behavior);
        }
        self.current = self.links.len();
    }

    fn recycle(&mut self) {
        for link in &mut self.links {
            link.recycle();
        }
        self.current = 0;
    }

    fn completion_event(&self) -> Option<TweenEvent> {
        self.completion
    }
}
