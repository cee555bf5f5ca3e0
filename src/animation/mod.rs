//! Animation system: progress curves and animators.
//!
//! Animators only produce progress values; they never see chart data. The
//! [`crate::controller`] module wires their ticks into the diff engine.

mod animator;
mod frame;
mod manual;
mod runner;
mod thread;

pub mod interpolation;

pub use animator::{Animator, AnimatorState, ProgressCallback};
pub use frame::FrameAnimator;
pub use interpolation::{lerp, shared, FnInterpolator, Interpolator, SharedInterpolator};
pub use manual::ManualAnimator;
pub use runner::AnimationRunner;
pub use thread::{CancelHandle, ThreadAnimator};
