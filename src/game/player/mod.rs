// Player entity
//
// The motion-and-collision core of the game:
// - Controller owning logical state and transform targets
// - Animation set builders for hops, idling and collision visuals

pub mod animations;
pub mod entity;

pub use animations::HopAnimationSet;
pub use entity::{PlayerEntity, PlayingPredicate};
