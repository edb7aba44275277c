// Player entity controller
//
// Owns the player's logical state (alive/dead, moving/idle, riding/hit-by)
// and its transform, and orchestrates the animation set per transition.
// All operations return immediately; completion is observed through the
// owner's `update` tick. For a single entity at most one hop is ever in
// flight: a commit while moving is rejected, never queued.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use log::warn;
use rand::Rng;

use super::animations;
use crate::core::math::normalize_angle;
use crate::engine::models::{ModelCatalog, ModelError, Node};
use crate::engine::tween::{Transform, TweenHandle, TweenScheduler};
use crate::game::settings::{CAR_CLEARANCE, GROUND_LEVEL, LANE_CENTER_EPSILON, STARTING_ROW};
use crate::game::world::{EntityId, EntityRegistry, RoadContext};

/// Injected "is the game still in active play" check, consulted when a hop
/// finishes to decide whether idle breathing resumes.
pub type PlayingPredicate = Box<dyn Fn() -> bool>;

pub struct PlayerEntity {
    pub transform: Transform,
    /// Cleared by the game-over flow on a fatal collision, restored by
    /// `reset`. The run-over visual itself does not touch this.
    pub is_alive: bool,

    character: Option<String>,
    node: Option<Node>,

    moving: bool,
    /// The entity's last settled (or externally displaced) location.
    /// Carrier ticks keep this in sync while the player is being dragged,
    /// so the next hop computes its deltas from the carried-to position.
    initial_position: Option<Vec3>,
    target_position: Option<Vec3>,
    target_rotation: Option<f32>,
    last_position: Option<Vec3>,

    /// Platform currently carrying the player, if any. Non-owning.
    riding_on: Option<EntityId>,
    /// Car that bumped the player aside without killing it, if any.
    /// Non-owning.
    hit_by: Option<EntityId>,

    scheduler: TweenScheduler,
    idle_animation: Option<TweenHandle>,
    /// Every scheduled transform tween for the current transition; reset
    /// cancels these so a stale completion can never fire afterwards.
    active_animations: Vec<TweenHandle>,
    position_tween: Option<TweenHandle>,
    rotation_tween: Option<TweenHandle>,
    on_move_complete: Option<Box<dyn FnOnce()>>,

    is_playing: PlayingPredicate,
}

impl PlayerEntity {
    /// Create a player wearing the given character's model, at spawn state.
    pub fn new(
        character: &str,
        models: &ModelCatalog,
        is_playing: PlayingPredicate,
    ) -> Result<Self, ModelError> {
        let mut player = Self {
            transform: Transform::IDENTITY,
            is_alive: true,
            character: None,
            node: None,
            moving: false,
            initial_position: None,
            target_position: None,
            target_rotation: None,
            last_position: None,
            riding_on: None,
            hit_by: None,
            scheduler: TweenScheduler::new(),
            idle_animation: None,
            active_animations: Vec::new(),
            position_tween: None,
            rotation_tween: None,
            on_move_complete: None,
            is_playing,
        };
        player.set_character(character, models)?;
        player.reset();
        Ok(player)
    }

    /// Swap the character model. No-op when the character is unchanged.
    /// The previous node is detached and released before the new one is
    /// attached; the node is exclusively owned by one player at a time.
    pub fn set_character(&mut self, character: &str, models: &ModelCatalog) -> Result<(), ModelError> {
        if self.character.as_deref() == Some(character) {
            return Ok(());
        }
        let mut node = models.get_node(character)?;
        node.scale_longest_side_to_size(1.0);
        node.align(Vec3::new(0.5, 1.0, 0.5));

        self.node = Some(node);
        self.character = Some(character.to_string());
        Ok(())
    }

    /// Return the entity to its spawn transform and clear all transient
    /// state. Idempotent, callable mid-animation: every scheduled tween is
    /// cancelled first so no stale completion can corrupt the fresh state.
    pub fn reset(&mut self) {
        self.scheduler.clear();
        self.idle_animation = None;
        self.active_animations.clear();
        self.position_tween = None;
        self.rotation_tween = None;
        self.on_move_complete = None;

        self.transform.position = Vec3::new(0.0, GROUND_LEVEL, STARTING_ROW);
        self.transform.rotation = Vec3::new(0.0, PI, 0.0);
        self.transform.scale = Vec3::ONE;

        self.initial_position = None;
        self.target_position = None;
        self.target_rotation = None;
        self.last_position = None;
        self.moving = false;
        self.hit_by = None;
        self.riding_on = None;
        self.is_alive = true;
    }

    /// Commit a hop toward `target_position`, facing `target_rotation`.
    ///
    /// Rejected (returning false, invoking nothing) when the entity is
    /// dead or a hop is already in flight. On acceptance the committed
    /// target becomes the new rest point immediately, so concurrent
    /// carrier updates apply their deltas against the correct base.
    ///
    /// `on_complete` runs exactly once, when the descent leg of the
    /// position tween finishes.
    pub fn commit_move(
        &mut self,
        target_position: Vec3,
        target_rotation: f32,
        on_complete: impl FnOnce() + 'static,
    ) -> bool {
        if !self.is_alive {
            warn!("move rejected: player is dead");
            return false;
        }
        if self.moving {
            warn!("move rejected: a hop is already in flight");
            return false;
        }

        self.stop_idle();

        let initial = self.initial_position.unwrap_or(self.transform.position);
        self.target_position = Some(target_position);
        self.target_rotation = Some(target_rotation);
        self.moving = true;

        let set = animations::schedule_hop(
            &mut self.scheduler,
            initial,
            target_position,
            target_rotation,
        );
        self.position_tween = Some(set.position);
        self.rotation_tween = Some(set.rotation);
        self.active_animations = set.handles().to_vec();
        self.on_move_complete = Some(Box::new(on_complete));

        self.initial_position = Some(target_position);
        true
    }

    /// Advance all scheduled animations by `dt` and finalize any that
    /// completed. Called once per game tick.
    pub fn update(&mut self, dt: f32) {
        let completed = self.scheduler.update(dt, &mut self.transform);
        for handle in completed {
            self.active_animations.retain(|h| *h != handle);

            if self.rotation_tween == Some(handle) {
                self.rotation_tween = None;
                self.transform.rotation.y = normalize_angle(self.transform.rotation.y);
            }
            if self.position_tween == Some(handle) {
                self.position_tween = None;
                self.finish_moving();
            }
        }
    }

    /// Hop landed: settle exactly on the target, renormalize the facing
    /// angle, resume idle breathing if the game is still in active play,
    /// then hand control back to the caller's completion.
    fn finish_moving(&mut self) {
        self.moving = false;
        if let Some(target) = self.target_position {
            self.transform.position = target;
        }
        self.transform.rotation.y = normalize_angle(self.transform.rotation.y);
        self.last_position = Some(self.transform.position);

        if (self.is_playing)() {
            self.idle();
        }
        if let Some(on_complete) = self.on_move_complete.take() {
            on_complete();
        }
    }

    /// Snap an in-flight hop to its end state without running it out.
    ///
    /// Used when play must catch up synchronously (e.g. resuming from
    /// pause). The in-flight animation set is cancelled and the pending
    /// completion callback is dropped, never invoked. No-op when idle.
    pub fn skip_pending_movement(&mut self) {
        if !self.moving {
            return;
        }

        self.stop_animations();
        self.position_tween = None;
        self.rotation_tween = None;
        self.on_move_complete = None;

        if let Some(target) = self.target_position {
            self.transform.position = target;
        }
        if let Some(rotation) = self.target_rotation {
            self.transform.rotation.y = normalize_angle(rotation);
        }
        self.moving = false;
    }

    /// Cancel every tween scheduled for the current transition.
    pub fn stop_animations(&mut self) {
        for handle in self.active_animations.drain(..) {
            self.scheduler.cancel(handle);
        }
    }

    /// Start the looping idle breathing animation. No-op while one is
    /// already running; mutually exclusive with hop animations (a hop
    /// stops idle before its scale squash takes over).
    pub fn idle(&mut self) {
        if self.idle_animation.is_some() {
            return;
        }
        self.idle_animation = Some(animations::schedule_idle(&mut self.scheduler));
    }

    /// Cancel any running idle animation and restore unit scale.
    pub fn stop_idle(&mut self) {
        if let Some(handle) = self.idle_animation.take() {
            self.scheduler.cancel(handle);
        }
        self.transform.scale = Vec3::ONE;
    }

    /// Resolve a collision with a car.
    ///
    /// Airborne mid-hop and clearly off the lane center: the car passes
    /// underneath and bumps the player aside. Grounded in the car's path
    /// (or within the lane-center epsilon): run over.
    pub fn collide_with_car(&mut self, road: &RoadContext, car: EntityId) {
        let deviation = self.transform.position.z - self.transform.position.z.round();
        if self.moving && deviation.abs() > LANE_CENTER_EPSILON {
            self.get_hit_by_car(road, car);
        } else {
            self.get_run_over_by_car(road);
        }
    }

    /// Fatal visual: flatten against the road surface with a random
    /// tumble. Death bookkeeping is driven by the game-over flow outside
    /// this entity, not here.
    pub fn get_run_over_by_car(&mut self, road: &RoadContext) {
        self.transform.position.y = road.top - 0.05;

        let tumble = rand::rng().random_range(-FRAC_PI_2..FRAC_PI_2);
        let handles = animations::schedule_run_over(&mut self.scheduler, tumble);
        self.active_animations.extend(handles);
    }

    /// Non-fatal bump: the player is snapped to just outside the car's
    /// footprint on whichever side it was nearer to, sheared, and from now
    /// on carried by the car every tick until externally cleared.
    pub fn get_hit_by_car(&mut self, road: &RoadContext, car: EntityId) {
        self.hit_by = Some(car);

        let forward = self.transform.position.z - self.transform.position.z.round() > 0.0;
        self.transform.position.z =
            road.position_z + if forward { CAR_CLEARANCE } else { -CAR_CLEARANCE };

        let tilt = rand::rng().random_range(-FRAC_PI_2..FRAC_PI_2);
        let handles = animations::schedule_side_hit(&mut self.scheduler, tilt);
        self.active_animations.extend(handles);
    }

    /// Per-tick displacement while stuck to a car. The rest point tracks
    /// the car itself so the next hop starts from where the car dragged
    /// the player to. No-op without a live carrier.
    pub fn move_on_car(&mut self, registry: &EntityRegistry) {
        let Some(id) = self.hit_by else {
            return;
        };
        let Some(car) = registry.get(id) else {
            warn!("carry tick ignored: car {id} no longer exists");
            return;
        };

        self.transform.position.x += car.speed;
        if let Some(initial) = &mut self.initial_position {
            initial.x = car.position.x;
        }
    }

    /// Per-tick displacement while riding a platform. No-op without a
    /// live carrier.
    pub fn move_on_entity(&mut self, registry: &EntityRegistry) {
        let Some(id) = self.riding_on else {
            return;
        };
        let Some(platform) = registry.get(id) else {
            warn!("carry tick ignored: platform {id} no longer exists");
            return;
        };

        self.transform.position.x += platform.speed;
        if let Some(initial) = &mut self.initial_position {
            initial.x = self.transform.position.x;
        }
    }

    /// Strike the held game-over squash pose.
    pub fn pose(&mut self) {
        self.stop_idle();
        let handle = animations::schedule_pose(&mut self.scheduler);
        self.active_animations.push(handle);
    }

    // Accessors

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_idling(&self) -> bool {
        self.idle_animation.is_some()
    }

    pub fn character(&self) -> Option<&str> {
        self.character.as_deref()
    }

    pub fn node(&self) -> Option<&Node> {
        self.node.as_ref()
    }

    pub fn initial_position(&self) -> Option<Vec3> {
        self.initial_position
    }

    pub fn target_position(&self) -> Option<Vec3> {
        self.target_position
    }

    pub fn last_position(&self) -> Option<Vec3> {
        self.last_position
    }

    pub fn hit_by(&self) -> Option<EntityId> {
        self.hit_by
    }

    /// Clear the bump relation once the car releases the player.
    pub fn clear_hit_by(&mut self) {
        self.hit_by = None;
    }

    pub fn riding_on(&self) -> Option<EntityId> {
        self.riding_on
    }

    /// Set or clear the platform currently carrying the player. Owned by
    /// the world-side ride handoff logic.
    pub fn set_riding_on(&mut self, platform: Option<EntityId>) {
        self.riding_on = platform;
    }

    /// Number of tweens currently scheduled for this entity.
    pub fn active_tween_count(&self) -> usize {
        self.scheduler.active_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::settings::BASE_ANIMATION_TIME;
    use crate::game::world::CarrierKind;
    use approx::assert_relative_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    const TICK: f32 = 1.0 / 60.0;

    fn test_catalog() -> ModelCatalog {
        let mut catalog = ModelCatalog::new();
        catalog.register("bacon", Node::new("bacon", Vec3::new(1.0, 2.0, 1.0)));
        catalog.register("juwan", Node::new("juwan", Vec3::new(2.0, 2.0, 2.0)));
        catalog
    }

    fn test_player() -> PlayerEntity {
        PlayerEntity::new("bacon", &test_catalog(), Box::new(|| true)).unwrap()
    }

    /// Tick the player until the counter fires or the budget runs out.
    fn run_until_complete(player: &mut PlayerEntity, fired: &Rc<Cell<u32>>) {
        for _ in 0..120 {
            player.update(TICK);
            if fired.get() > 0 {
                return;
            }
        }
        panic!("hop never completed");
    }

    #[test]
    fn test_spawn_state() {
        let player = test_player();
        assert!(player.is_alive);
        assert!(!player.is_moving());
        assert_eq!(
            player.transform.position,
            Vec3::new(0.0, GROUND_LEVEL, STARTING_ROW)
        );
        assert_relative_eq!(player.transform.rotation.y, PI);
        assert_eq!(player.transform.scale, Vec3::ONE);
        assert!(player.hit_by().is_none());
        assert!(player.riding_on().is_none());
    }

    #[test]
    fn test_missing_character_model_fails() {
        let result = PlayerEntity::new("ghost", &test_catalog(), Box::new(|| true));
        assert!(matches!(result, Err(ModelError::NotFound(_))));
    }

    #[test]
    fn test_set_character_noop_when_unchanged() {
        let catalog = test_catalog();
        let mut player = test_player();
        let node_before = player.node().cloned();
        player.set_character("bacon", &catalog).unwrap();
        assert_eq!(player.node().cloned(), node_before);

        player.set_character("juwan", &catalog).unwrap();
        assert_eq!(player.character(), Some("juwan"));
    }

    #[test]
    fn test_node_normalized_on_attach() {
        let player = test_player();
        let node = player.node().unwrap();
        // Longest side scaled to 1, anchored at horizontal-center / base.
        assert_relative_eq!((node.size * node.scale).y, 1.0);
        assert_relative_eq!(node.offset.x, 0.0);
        assert_relative_eq!(node.offset.y, 0.5);
    }

    // Exactly one completion per committed move.
    #[test]
    fn test_commit_move_completes_exactly_once() {
        let mut player = test_player();
        let fired = Rc::new(Cell::new(0u32));
        let observer = fired.clone();

        let target = Vec3::new(0.0, GROUND_LEVEL, STARTING_ROW - 1.0);
        assert!(player.commit_move(target, PI, move || observer.set(observer.get() + 1)));
        assert!(player.is_moving());

        run_until_complete(&mut player, &fired);
        assert_eq!(fired.get(), 1);
        assert!(!player.is_moving());

        // Nothing further ever fires.
        for _ in 0..60 {
            player.update(TICK);
        }
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_commit_move_rejected_while_moving() {
        let mut player = test_player();
        let fired = Rc::new(Cell::new(0u32));
        let first = fired.clone();
        let second = fired.clone();

        assert!(player.commit_move(
            Vec3::new(0.0, GROUND_LEVEL, STARTING_ROW - 1.0),
            PI,
            move || first.set(first.get() + 1),
        ));
        // Re-entrant commit is refused and its callback never runs.
        assert!(!player.commit_move(
            Vec3::new(0.0, GROUND_LEVEL, STARTING_ROW - 2.0),
            PI,
            move || second.set(second.get() + 10),
        ));

        run_until_complete(&mut player, &fired);
        assert_eq!(fired.get(), 1);
        assert_relative_eq!(player.transform.position.z, STARTING_ROW - 1.0);
    }

    #[test]
    fn test_commit_move_rejected_when_dead() {
        let mut player = test_player();
        player.is_alive = false;
        assert!(!player.commit_move(Vec3::ZERO, 0.0, || {}));
        assert!(!player.is_moving());
    }

    // Facing angle lands in (-PI, PI] after every hop.
    #[test]
    fn test_rotation_normalized_after_each_hop() {
        let mut player = test_player();
        let rotations = [3.0 * PI, -2.5 * PI, 7.0, -7.0, PI];

        for (i, &rotation) in rotations.iter().enumerate() {
            let fired = Rc::new(Cell::new(0u32));
            let observer = fired.clone();
            let target = Vec3::new(0.0, GROUND_LEVEL, STARTING_ROW - (i + 1) as f32);
            assert!(player.commit_move(target, rotation, move || observer.set(1)));
            run_until_complete(&mut player, &fired);

            let yaw = player.transform.rotation.y;
            assert!(yaw > -PI - 1e-5 && yaw <= PI + 1e-5);
            assert_relative_eq!(yaw, normalize_angle(rotation), epsilon = 1e-4);
        }
    }

    // Reset is idempotent, and reset mid-hop leaves no pending callback.
    #[test]
    fn test_reset_is_idempotent() {
        let mut player = test_player();
        player.reset();
        let position = player.transform.position;
        let rotation = player.transform.rotation;
        player.reset();
        assert_eq!(player.transform.position, position);
        assert_eq!(player.transform.rotation, rotation);
        assert_eq!(player.active_tween_count(), 0);
    }

    #[test]
    fn test_reset_mid_hop_cancels_stale_callback() {
        let mut player = test_player();
        let fired = Rc::new(Cell::new(0u32));
        let observer = fired.clone();

        player.commit_move(
            Vec3::new(0.0, GROUND_LEVEL, STARTING_ROW - 1.0),
            PI,
            move || observer.set(observer.get() + 1),
        );
        player.update(TICK);
        player.reset();

        assert!(!player.is_moving());
        assert_eq!(player.active_tween_count(), 0);
        for _ in 0..120 {
            player.update(TICK);
        }
        assert_eq!(fired.get(), 0);
        assert_eq!(
            player.transform.position,
            Vec3::new(0.0, GROUND_LEVEL, STARTING_ROW)
        );
    }

    // Collision branch selection around the lane-center epsilon.
    #[test]
    fn test_airborne_off_center_collision_is_side_hit() {
        let mut player = test_player();
        let road = RoadContext {
            top: GROUND_LEVEL,
            position_z: 3.0,
        };
        player.commit_move(Vec3::new(0.0, GROUND_LEVEL, 3.0), PI, || {});
        player.update(TICK);
        player.transform.position.z = 3.3; // deviation 0.3 > 0.1

        player.collide_with_car(&road, 7);
        assert_eq!(player.hit_by(), Some(7));
        // Snapped forward of the car's footprint.
        assert_relative_eq!(player.transform.position.z, 3.0 + CAR_CLEARANCE);
    }

    #[test]
    fn test_near_lane_center_collision_is_run_over() {
        let mut player = test_player();
        let road = RoadContext {
            top: GROUND_LEVEL,
            position_z: 3.0,
        };
        player.commit_move(Vec3::new(0.0, GROUND_LEVEL, 3.0), PI, || {});
        player.update(TICK);
        player.transform.position.z = 3.05; // deviation 0.05 <= 0.1

        player.collide_with_car(&road, 7);
        assert!(player.hit_by().is_none());
        assert_relative_eq!(player.transform.position.y, road.top - 0.05);
    }

    #[test]
    fn test_grounded_collision_is_run_over() {
        let mut player = test_player();
        let road = RoadContext {
            top: GROUND_LEVEL,
            position_z: 3.0,
        };
        player.transform.position.z = 3.3;
        // Not moving: deviation does not matter, the player is on the road.
        player.collide_with_car(&road, 7);
        assert!(player.hit_by().is_none());
        assert_relative_eq!(player.transform.position.y, road.top - 0.05);
    }

    #[test]
    fn test_run_over_visual_flattens_but_does_not_kill() {
        let mut player = test_player();
        let road = RoadContext {
            top: GROUND_LEVEL,
            position_z: 3.0,
        };
        player.get_run_over_by_car(&road);
        // Death signaling belongs to the game-over flow.
        assert!(player.is_alive);

        for _ in 0..30 {
            player.update(TICK);
        }
        assert_relative_eq!(player.transform.scale.y, 0.05, epsilon = 1e-3);
        assert_relative_eq!(player.transform.scale.x, 1.7, epsilon = 1e-3);
        let yaw = player.transform.rotation.y;
        assert!((-FRAC_PI_2..FRAC_PI_2).contains(&yaw));
    }

    #[test]
    fn test_side_hit_snaps_to_nearer_side() {
        let mut player = test_player();
        let road = RoadContext {
            top: GROUND_LEVEL,
            position_z: 3.0,
        };
        player.transform.position.z = 2.8; // behind lane center
        player.get_hit_by_car(&road, 4);
        assert_relative_eq!(player.transform.position.z, 3.0 - CAR_CLEARANCE);
    }

    // Carry ticks accumulate the carrier's speed.
    #[test]
    fn test_move_on_car_accumulates_speed() {
        let mut player = test_player();
        let mut registry = EntityRegistry::new();
        let road = RoadContext {
            top: GROUND_LEVEL,
            position_z: 3.0,
        };
        let car = registry.spawn(CarrierKind::Car, 0.2, Vec3::new(5.0, GROUND_LEVEL, 3.0));

        // Settle a hop so initial_position exists, then get bumped.
        let fired = Rc::new(Cell::new(0u32));
        let observer = fired.clone();
        player.commit_move(Vec3::new(0.0, GROUND_LEVEL, 3.0), PI, move || observer.set(1));
        run_until_complete(&mut player, &fired);
        player.transform.position.z = 3.3;
        player.get_hit_by_car(&road, car);

        let x_before = player.transform.position.x;
        for _ in 0..4 {
            registry.tick();
            player.move_on_car(&registry);
        }
        assert_relative_eq!(player.transform.position.x, x_before + 4.0 * 0.2, epsilon = 1e-5);
        assert_relative_eq!(
            player.initial_position().unwrap().x,
            registry.get(car).unwrap().position.x,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_carry_tick_without_carrier_is_noop() {
        let mut player = test_player();
        let registry = EntityRegistry::new();
        let before = player.transform.position;
        player.move_on_car(&registry);
        player.move_on_entity(&registry);
        assert_eq!(player.transform.position, before);
    }

    #[test]
    fn test_move_on_entity_tracks_own_position() {
        let mut player = test_player();
        let mut registry = EntityRegistry::new();
        let log = registry.spawn(CarrierKind::Log, -0.1, Vec3::new(0.0, GROUND_LEVEL, 2.0));

        let fired = Rc::new(Cell::new(0u32));
        let observer = fired.clone();
        player.commit_move(Vec3::new(0.0, GROUND_LEVEL, 2.0), PI, move || observer.set(1));
        run_until_complete(&mut player, &fired);

        player.set_riding_on(Some(log));
        for _ in 0..3 {
            player.move_on_entity(&registry);
        }
        assert_relative_eq!(player.transform.position.x, -0.3, epsilon = 1e-5);
        // Riding keeps the rest point on the player itself.
        assert_relative_eq!(
            player.initial_position().unwrap().x,
            player.transform.position.x,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_dangling_carrier_after_despawn_is_noop() {
        let mut player = test_player();
        let mut registry = EntityRegistry::new();
        let road = RoadContext {
            top: GROUND_LEVEL,
            position_z: 3.0,
        };
        let car = registry.spawn(CarrierKind::Car, 0.2, Vec3::new(5.0, GROUND_LEVEL, 3.0));
        player.get_hit_by_car(&road, car);
        registry.remove(car);

        let before = player.transform.position;
        player.move_on_car(&registry);
        assert_eq!(player.transform.position, before);
    }

    // Idle animations never stack.
    #[test]
    fn test_idle_is_not_duplicated() {
        let mut player = test_player();
        player.idle();
        let count = player.active_tween_count();
        player.idle();
        assert_eq!(player.active_tween_count(), count);
        assert!(player.is_idling());
    }

    #[test]
    fn test_stop_idle_resets_scale_mid_breath() {
        let mut player = test_player();
        player.idle();
        player.update(0.15); // halfway down the first breathing leg
        assert!(player.transform.scale.y < 1.0);

        player.stop_idle();
        assert!(!player.is_idling());
        assert_eq!(player.transform.scale, Vec3::ONE);
    }

    #[test]
    fn test_commit_move_stops_idle() {
        let mut player = test_player();
        player.idle();
        player.commit_move(Vec3::new(0.0, GROUND_LEVEL, STARTING_ROW - 1.0), PI, || {});
        assert!(!player.is_idling());
    }

    #[test]
    fn test_skip_pending_movement_settles_without_callback() {
        let mut player = test_player();
        let fired = Rc::new(Cell::new(0u32));
        let observer = fired.clone();
        let target = Vec3::new(0.0, GROUND_LEVEL, STARTING_ROW - 1.0);

        player.commit_move(target, 3.0 * PI, move || observer.set(observer.get() + 1));
        player.update(TICK);
        player.skip_pending_movement();

        assert!(!player.is_moving());
        assert_eq!(player.transform.position, target);
        assert_relative_eq!(player.transform.rotation.y, PI, epsilon = 1e-4);

        for _ in 0..120 {
            player.update(TICK);
        }
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_skip_pending_movement_noop_when_idle_state() {
        let mut player = test_player();
        let before = player.transform.position;
        player.skip_pending_movement();
        assert_eq!(player.transform.position, before);
    }

    // Full scenario: spawn, hop one row forward, settle.
    #[test]
    fn test_full_hop_scenario() {
        let mut player = test_player();
        let fired = Rc::new(Cell::new(0u32));
        let observer = fired.clone();
        let target = Vec3::new(0.0, GROUND_LEVEL, STARTING_ROW - 1.0);

        assert!(player.commit_move(target, PI, move || observer.set(1)));
        // Mid-hop the player leaves the ground.
        player.update(BASE_ANIMATION_TIME);
        assert!(player.transform.position.y > GROUND_LEVEL);

        run_until_complete(&mut player, &fired);
        assert_eq!(player.transform.position, target);
        assert!(!player.is_moving());
        // Game is "playing", so idle breathing resumed.
        assert!(player.is_idling());
    }

    #[test]
    fn test_idle_not_resumed_when_game_ended() {
        let mut player =
            PlayerEntity::new("bacon", &test_catalog(), Box::new(|| false)).unwrap();
        let fired = Rc::new(Cell::new(0u32));
        let observer = fired.clone();

        player.commit_move(
            Vec3::new(0.0, GROUND_LEVEL, STARTING_ROW - 1.0),
            PI,
            move || observer.set(1),
        );
        run_until_complete(&mut player, &fired);
        assert!(!player.is_idling());
    }

    #[test]
    fn test_hop_from_carried_position_uses_updated_base() {
        let mut player = test_player();
        let mut registry = EntityRegistry::new();
        let road = RoadContext {
            top: GROUND_LEVEL,
            position_z: 3.0,
        };
        let car = registry.spawn(CarrierKind::Car, 0.25, Vec3::new(1.0, GROUND_LEVEL, 3.0));

        let fired = Rc::new(Cell::new(0u32));
        let observer = fired.clone();
        player.commit_move(Vec3::new(0.0, GROUND_LEVEL, 3.0), PI, move || observer.set(1));
        run_until_complete(&mut player, &fired);

        player.transform.position.z = 3.3;
        player.get_hit_by_car(&road, car);
        registry.tick();
        player.move_on_car(&registry);
        player.clear_hit_by();

        // Next hop starts from the carried-to x, not the stale base.
        let carried_x = player.initial_position().unwrap().x;
        let fired = Rc::new(Cell::new(0u32));
        let observer = fired.clone();
        player.commit_move(
            Vec3::new(carried_x, GROUND_LEVEL, 4.0),
            PI,
            move || observer.set(1),
        );
        run_until_complete(&mut player, &fired);
        assert_relative_eq!(player.transform.position.x, carried_x, epsilon = 1e-5);
    }

    #[test]
    fn test_pose_squashes_and_stops_idle() {
        let mut player = test_player();
        player.idle();
        player.pose();
        assert!(!player.is_idling());
        for _ in 0..30 {
            player.update(TICK);
        }
        assert_relative_eq!(player.transform.scale.y, 0.75, epsilon = 1e-3);
        assert_relative_eq!(player.transform.scale.x, 1.2, epsilon = 1e-3);
    }
}
