// Player animation set
//
// Builders for the small set of concurrent tweens the player runs per
// state transition. A hop is three independent tweens (scale squash,
// two-leg position arc, rotation turn) sharing the base leg duration;
// only the position tween gates hop completion.

use glam::Vec3;

use crate::engine::tween::{
    AxisTargets, Easing, TweenField, TweenHandle, TweenScheduler, TweenStage,
};
use crate::game::settings::{
    BASE_ANIMATION_TIME, HOP_HEIGHT, HOP_PEAK_PROGRESS, IDLE_LEG_DURATION, PLAYER_IDLE_SCALE,
};

/// Duration of the fatal flatten visual.
const RUN_OVER_DURATION: f32 = 0.2;
/// Duration of the non-fatal shear visual.
const SIDE_HIT_DURATION: f32 = 0.15;

/// Handles for the three tweens of an in-flight hop.
///
/// The controller waits on `position` for hop completion and on
/// `rotation` for yaw renormalization; `scale` runs free.
#[derive(Debug, Clone, Copy)]
pub struct HopAnimationSet {
    pub position: TweenHandle,
    pub scale: TweenHandle,
    pub rotation: TweenHandle,
}

impl HopAnimationSet {
    pub fn handles(&self) -> [TweenHandle; 3] {
        [self.position, self.scale, self.rotation]
    }
}

/// Schedule the full hop animation set from `initial` to `target`.
///
/// The position arc rises to a takeoff point at 75% of the horizontal
/// delta, elevated by the hop height above the landing elevation, then
/// descends onto the target.
pub fn schedule_hop(
    scheduler: &mut TweenScheduler,
    initial: Vec3,
    target: Vec3,
    target_rotation: f32,
) -> HopAnimationSet {
    let delta_x = target.x - initial.x;
    let delta_z = target.z - initial.z;
    let in_air = Vec3::new(
        initial.x + delta_x * HOP_PEAK_PROGRESS,
        target.y + HOP_HEIGHT,
        initial.z + delta_z * HOP_PEAK_PROGRESS,
    );

    let position = scheduler.schedule(
        TweenField::Position,
        vec![
            TweenStage::new(
                AxisTargets::xyz(in_air.x, in_air.y, in_air.z),
                BASE_ANIMATION_TIME,
                Easing::QuadOut,
            ),
            TweenStage::new(
                AxisTargets::xyz(target.x, target.y, target.z),
                BASE_ANIMATION_TIME,
                Easing::QuadOut,
            ),
        ],
    );

    // Stretch tall, squash wide, bounce back to unit.
    let scale = scheduler.schedule(
        TweenField::Scale,
        vec![
            TweenStage::new(
                AxisTargets::xyz(1.0, 1.2, 1.0),
                BASE_ANIMATION_TIME,
                Easing::QuadOut,
            ),
            TweenStage::new(
                AxisTargets::xyz(1.0, 0.8, 1.0),
                BASE_ANIMATION_TIME,
                Easing::QuadOut,
            ),
            TweenStage::new(
                AxisTargets::xyz(1.0, 1.0, 1.0),
                BASE_ANIMATION_TIME,
                Easing::BounceOut,
            ),
        ],
    );

    let rotation = scheduler.schedule(
        TweenField::Rotation,
        vec![TweenStage::new(
            AxisTargets::y(target_rotation),
            BASE_ANIMATION_TIME,
            Easing::QuadInOut,
        )],
    );

    HopAnimationSet {
        position,
        scale,
        rotation,
    }
}

/// Schedule the perpetual idle breathing oscillation on the y scale.
pub fn schedule_idle(scheduler: &mut TweenScheduler) -> TweenHandle {
    scheduler.schedule_looping(
        TweenField::Scale,
        vec![
            TweenStage::new(
                AxisTargets::y(PLAYER_IDLE_SCALE),
                IDLE_LEG_DURATION,
                Easing::QuadIn,
            ),
            TweenStage::new(AxisTargets::y(1.0), IDLE_LEG_DURATION, Easing::QuadOut),
        ],
    )
}

/// Schedule the fatal run-over visual: flatten against the road and
/// tumble the body to the given yaw.
pub fn schedule_run_over(scheduler: &mut TweenScheduler, tumble_yaw: f32) -> [TweenHandle; 2] {
    let scale = scheduler.schedule(
        TweenField::Scale,
        vec![TweenStage::new(
            AxisTargets::xyz(1.7, 0.05, 1.7),
            RUN_OVER_DURATION,
            Easing::QuadOut,
        )],
    );
    let rotation = scheduler.schedule(
        TweenField::Rotation,
        vec![TweenStage::new(
            AxisTargets::y(tumble_yaw),
            RUN_OVER_DURATION,
            Easing::QuadOut,
        )],
    );
    [scale, rotation]
}

/// Schedule the non-fatal side-hit visual: stretch and tilt.
pub fn schedule_side_hit(scheduler: &mut TweenScheduler, tilt: f32) -> [TweenHandle; 2] {
    let scale = scheduler.schedule(
        TweenField::Scale,
        vec![TweenStage::new(
            AxisTargets::yz(1.5, 0.2),
            SIDE_HIT_DURATION,
            Easing::QuadOut,
        )],
    );
    let rotation = scheduler.schedule(
        TweenField::Rotation,
        vec![TweenStage::new(
            AxisTargets::z(tilt),
            SIDE_HIT_DURATION,
            Easing::QuadOut,
        )],
    );
    [scale, rotation]
}

/// Schedule the game-over pose: a held wide squash.
pub fn schedule_pose(scheduler: &mut TweenScheduler) -> TweenHandle {
    scheduler.schedule(
        TweenField::Scale,
        vec![TweenStage::new(
            AxisTargets::xyz(1.2, 0.75, 1.0),
            RUN_OVER_DURATION,
            Easing::QuadOut,
        )],
    )
}
