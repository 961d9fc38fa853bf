pub mod core;
pub mod easing;
pub mod manifest;
pub mod tweens;

// Re-export key types at crate root for convenience
pub use crate::core::driver::{Driver, FrameDriver, FrameStep, TaskHandle};
pub use crate::core::lifecycle::{Playback, StopBehavior, TickResult, TweenEvent, Tweenable};
pub use crate::core::runner::TweenRunner;
pub use crate::core::time::FixedTimestep;
pub use crate::easing::{ease, lerp, Easing, TweenValue};
pub use crate::manifest::{Endpoint, TweenDef, TweenManifest};
pub use crate::tweens::{LoopMode, TweenChain, ValueTween};
