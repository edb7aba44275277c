// Timed transform tween scheduling
//
// A tween targets one transform field (position, rotation or scale) and
// walks through a sequence of stages. Each stage names only the axes it
// wants to drive; untouched axes keep whatever value the owner (or another
// tween) last wrote. Stage start values are captured when the stage begins,
// so back-to-back stages chain off each other's end state.

use super::easing::Easing;
use crate::core::math::lerp;
use glam::Vec3;

/// Position/rotation/scale triple a scheduler's tweens write into.
///
/// Rotation is stored as Euler angles, one per axis, matching how the
/// controller reasons about yaw (`rotation.y`) and tilt (`rotation.z`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Which transform field a tween drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenField {
    Position,
    Rotation,
    Scale,
}

/// Per-axis target values; `None` leaves that axis untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisTargets {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
}

impl AxisTargets {
    pub fn xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    pub fn x(x: f32) -> Self {
        Self {
            x: Some(x),
            ..Self::default()
        }
    }

    pub fn y(y: f32) -> Self {
        Self {
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn z(z: f32) -> Self {
        Self {
            z: Some(z),
            ..Self::default()
        }
    }

    pub fn yz(y: f32, z: f32) -> Self {
        Self {
            x: None,
            y: Some(y),
            z: Some(z),
        }
    }
}

/// One leg of a tween: target axes, how long to reach them, and the curve.
#[derive(Debug, Clone, Copy)]
pub struct TweenStage {
    pub targets: AxisTargets,
    pub duration: f32,
    pub easing: Easing,
}

impl TweenStage {
    pub fn new(targets: AxisTargets, duration: f32, easing: Easing) -> Self {
        Self {
            targets,
            duration,
            easing,
        }
    }
}

/// Handle to a scheduled tween. Stays valid (as a no-op) after the tween
/// completes or is cancelled, so cancel is idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenHandle(u64);

#[derive(Debug)]
struct ActiveTween {
    handle: TweenHandle,
    field: TweenField,
    stages: Vec<TweenStage>,
    stage_index: usize,
    /// Time elapsed within the current stage.
    elapsed: f32,
    /// Field value captured when the current stage began; captured lazily
    /// on the first update tick that touches the stage.
    stage_start: Option<Vec3>,
    looping: bool,
    paused: bool,
}

/// Cooperative tween scheduler, driven by the owner's tick.
///
/// `update` advances every active tween against the supplied transform and
/// returns the handles of tweens that finished this tick, in scheduling
/// order. Writes land in tick order; the scheduler never reorders them.
#[derive(Debug, Default)]
pub struct TweenScheduler {
    tweens: Vec<ActiveTween>,
    next_handle: u64,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a one-shot tween. Completion is reported by `update` once
    /// the final stage finishes.
    pub fn schedule(&mut self, field: TweenField, stages: Vec<TweenStage>) -> TweenHandle {
        self.push(field, stages, false)
    }

    /// Schedule a tween that restarts from its first stage forever.
    /// Looping tweens never report completion; stop them with `cancel`.
    pub fn schedule_looping(&mut self, field: TweenField, stages: Vec<TweenStage>) -> TweenHandle {
        // A loop with no time in it would never yield back to the tick.
        debug_assert!(
            stages.iter().any(|s| s.duration > 0.0),
            "looping tween needs at least one stage with a positive duration"
        );
        self.push(field, stages, true)
    }

    fn push(&mut self, field: TweenField, stages: Vec<TweenStage>, looping: bool) -> TweenHandle {
        debug_assert!(!stages.is_empty(), "tween must have at least one stage");
        let handle = TweenHandle(self.next_handle);
        self.next_handle += 1;
        self.tweens.push(ActiveTween {
            handle,
            field,
            stages,
            stage_index: 0,
            elapsed: 0.0,
            stage_start: None,
            looping,
            paused: false,
        });
        handle
    }

    /// Cancel a tween. Idempotent: unknown or already-finished handles are
    /// ignored. A cancelled tween never reports completion.
    pub fn cancel(&mut self, handle: TweenHandle) {
        self.tweens.retain(|t| t.handle != handle);
    }

    /// Pause a tween in place; `update` skips it until resumed.
    pub fn pause(&mut self, handle: TweenHandle) {
        if let Some(tween) = self.tweens.iter_mut().find(|t| t.handle == handle) {
            tween.paused = true;
        }
    }

    /// Resume a paused tween.
    pub fn resume(&mut self, handle: TweenHandle) {
        if let Some(tween) = self.tweens.iter_mut().find(|t| t.handle == handle) {
            tween.paused = false;
        }
    }

    /// Drop every scheduled tween without reporting completions.
    pub fn clear(&mut self) {
        self.tweens.clear();
    }

    /// Whether the handle refers to a tween that is still scheduled.
    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.tweens.iter().any(|t| t.handle == handle)
    }

    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    /// Advance all tweens by `dt` seconds, writing into `transform`.
    /// Returns the handles of tweens that completed during this tick.
    pub fn update(&mut self, dt: f32, transform: &mut Transform) -> Vec<TweenHandle> {
        let mut completed = Vec::new();

        for tween in &mut self.tweens {
            if tween.paused {
                continue;
            }
            if advance(tween, dt, transform) {
                completed.push(tween.handle);
            }
        }

        if !completed.is_empty() {
            self.tweens.retain(|t| !completed.contains(&t.handle));
        }

        completed
    }
}

fn field_mut(transform: &mut Transform, field: TweenField) -> &mut Vec3 {
    match field {
        TweenField::Position => &mut transform.position,
        TweenField::Rotation => &mut transform.rotation,
        TweenField::Scale => &mut transform.scale,
    }
}

/// Advance one tween. Returns true if it completed this tick.
fn advance(tween: &mut ActiveTween, dt: f32, transform: &mut Transform) -> bool {
    tween.elapsed += dt;

    loop {
        let stage = tween.stages[tween.stage_index];
        let value = field_mut(transform, tween.field);
        let start = *tween.stage_start.get_or_insert(*value);

        let t = if stage.duration > 0.0 {
            (tween.elapsed / stage.duration).min(1.0)
        } else {
            1.0
        };
        let eased = stage.easing.apply(t);

        if let Some(x) = stage.targets.x {
            value.x = lerp(start.x, x, eased);
        }
        if let Some(y) = stage.targets.y {
            value.y = lerp(start.y, y, eased);
        }
        if let Some(z) = stage.targets.z {
            value.z = lerp(start.z, z, eased);
        }

        if t < 1.0 {
            return false;
        }

        // Stage finished; carry leftover time into the next one.
        tween.elapsed -= stage.duration;
        tween.stage_start = None;

        if tween.stage_index + 1 < tween.stages.len() {
            tween.stage_index += 1;
        } else if tween.looping {
            tween.stage_index = 0;
        } else {
            return true;
        }

        if tween.elapsed <= 0.0 {
            return false;
        }
    }
}
