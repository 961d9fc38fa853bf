// tweens/mod.rs
//
// Concrete tweenables: the interpolating ValueTween and the sequential
// TweenChain. Both plug into the lifecycle layer through the Tweenable
// trait and carry no scheduling state of their own.

pub mod chain;
pub mod value;

pub use chain::TweenChain;
pub use value::{LoopMode, ValueTween};
