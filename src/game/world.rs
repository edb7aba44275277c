// World-side entities the player interacts with
//
// Cars and platforms are owned by the world, not by the player. The player
// keeps non-owning `EntityId` handles (riding_on, hit_by) and resolves them
// through the registry each tick; a despawned carrier simply stops
// resolving.

use glam::Vec3;

/// Non-owning handle to a carrier entity.
pub type EntityId = u32;

/// What kind of carrier an entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierKind {
    /// Road hazard; bumps or runs over the player.
    Car,
    /// Ridable river platform.
    Log,
}

/// A moving entity that can displace the player: a car that dragged it
/// aside, or a log it is standing on.
#[derive(Debug, Clone)]
pub struct CarrierEntity {
    pub id: EntityId,
    pub kind: CarrierKind,
    /// Displacement along x applied every tick.
    pub speed: f32,
    pub position: Vec3,
}

/// The lane the player currently stands in, as seen by collision handling.
#[derive(Debug, Clone, Copy)]
pub struct RoadContext {
    /// Y level of the road surface; run-over flattening lands here.
    pub top: f32,
    /// Lane center along z; side hits snap relative to this.
    pub position_z: f32,
}

/// Owns every carrier entity in the world and hands out ids.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: Vec<CarrierEntity>,
    next_id: EntityId,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a carrier and return its handle.
    pub fn spawn(&mut self, kind: CarrierKind, speed: f32, position: Vec3) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(CarrierEntity {
            id,
            kind,
            speed,
            position,
        });
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&CarrierEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut CarrierEntity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Despawn a carrier. Player handles pointing at it become dangling
    /// and resolve to nothing from then on.
    pub fn remove(&mut self, id: EntityId) -> Option<CarrierEntity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    /// Advance every carrier by its per-tick speed.
    pub fn tick(&mut self) {
        for entity in &mut self.entities {
            entity.position.x += entity.speed;
        }
    }

    pub fn count(&self) -> usize {
        self.entities.len()
    }
}
