// Gameplay tuning constants

/// Duration of one animation leg (seconds). A full hop runs two legs of
/// position movement under a single three-leg scale squash.
pub const BASE_ANIMATION_TIME: f32 = 0.15;

/// Peak height of the hop arc above the landing elevation.
pub const HOP_HEIGHT: f32 = 0.5;

/// Fraction of the horizontal delta covered when the hop reaches its peak.
pub const HOP_PEAK_PROGRESS: f32 = 0.75;

/// Y level the player stands at on plain ground.
pub const GROUND_LEVEL: f32 = 0.5;

/// Row (z coordinate) the player spawns on.
pub const STARTING_ROW: f32 = -3.0;

/// Scale the idle breathing animation squashes down to.
pub const PLAYER_IDLE_SCALE: f32 = 0.8;

/// Duration of each idle breathing leg (seconds).
pub const IDLE_LEG_DURATION: f32 = 0.3;

/// How far the player may sit from a lane center and still count as
/// grounded on that lane for collision purposes.
pub const LANE_CENTER_EPSILON: f32 = 0.1;

/// Transverse clearance the player is pushed to when a car bumps it aside.
pub const CAR_CLEARANCE: f32 = 0.52;
