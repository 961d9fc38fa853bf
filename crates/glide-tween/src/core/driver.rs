// core/driver.rs
//
// Host-frame driver abstraction. A Driver is anything that can run a
// cancellable repeating task once per frame; FrameDriver is the bundled
// implementation, pumped manually by the host loop.

use std::cell::Cell;
use std::rc::Rc;

/// Per-frame step function hosted by a driver. Returns false when the
/// task is defunct and should be retired.
pub type FrameStep = Box<dyn FnMut(f32) -> bool>;

/// Cancellation handle for a repeating driver task.
///
/// Cancellation is synchronous: after `cancel` returns, the step is
/// never invoked again.
#[derive(Clone, Default)]
pub struct TaskHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the task. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// A host object capable of running cancellable repeating per-frame
/// tasks.
pub trait Driver {
    /// Begin invoking `step` once per frame until the returned handle is
    /// cancelled or the step returns false.
    fn spawn_repeating(&mut self, step: FrameStep) -> TaskHandle;
}

struct Task {
    step: FrameStep,
    handle: TaskHandle,
}

/// Bundled driver: owns its task list and is stepped explicitly by the
/// host loop.
///
/// Usage:
///   let mut driver = FrameDriver::new();
///   playback.start_on(&mut driver);
///   driver.pump(dt);  // once per frame
#[derive(Default)]
pub struct FrameDriver {
    tasks: Vec<Task>,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step every live task once. Cancelled and defunct tasks are
    /// retired before and after their step respectively.
    pub fn pump(&mut self, dt: f32) {
        self.tasks.retain_mut(|task| {
            if task.handle.is_cancelled() {
                return false;
            }
            (task.step)(dt) && !task.handle.is_cancelled()
        });
    }

    /// Number of tasks still attached.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no tasks are attached.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Driver for FrameDriver {
    fn spawn_repeating(&mut self, step: FrameStep) -> TaskHandle {
        let handle = TaskHandle::new();
        self.tasks.push(Task {
            step,
            handle: handle.clone(),
        });
        handle
    }
}
