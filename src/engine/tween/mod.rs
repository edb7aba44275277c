// Tween engine
//
// Fire-and-forget timed transform changes with easing curves, multi-stage
// sequences, looping, and completion reporting. Single-threaded and
// cooperative: the owner ticks the scheduler, nothing blocks.

mod easing;
mod scheduler;

pub use easing::Easing;
pub use scheduler::{
    AxisTargets, Transform, TweenField, TweenHandle, TweenScheduler, TweenStage,
};
