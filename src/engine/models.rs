// Character model catalog
//
// Provides renderable nodes for the player entity. The actual mesh data
// lives outside this core; a node here is the transform-level view the
// controller needs: bounding size, normalization scale and anchor offset.

use glam::Vec3;
use std::collections::HashMap;

/// Model lookup errors
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("No model registered for character: {0}")]
    NotFound(String),
}

/// A renderable node, normalized for attachment to an entity.
///
/// `scale` shrinks the node's longest side to the requested size and
/// `offset` shifts its anchor to horizontal-center / vertical-base, so the
/// entity's own transform can treat the node as a unit-sized prop standing
/// on the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    /// Raw bounding-box size of the source mesh.
    pub size: Vec3,
    pub scale: Vec3,
    pub offset: Vec3,
}

impl Node {
    pub fn new(name: &str, size: Vec3) -> Self {
        Self {
            name: name.to_string(),
            size,
            scale: Vec3::ONE,
            offset: Vec3::ZERO,
        }
    }

    /// Uniformly scale so the longest bounding-box side equals `size`.
    pub fn scale_longest_side_to_size(&mut self, size: f32) {
        let longest = self.size.x.max(self.size.y).max(self.size.z);
        if longest > 0.0 {
            self.scale = Vec3::splat(size / longest);
        }
    }

    /// Shift the node so the given normalized anchor sits at the origin.
    /// An anchor of 0.5 centers that axis; 1.0 rests the node's base on it.
    pub fn align(&mut self, anchor: Vec3) {
        let scaled = self.size * self.scale;
        self.offset = scaled * (anchor - Vec3::splat(0.5));
    }
}

/// Catalog of hero models keyed by character id.
#[derive(Debug, Default)]
pub struct ModelCatalog {
    nodes: HashMap<String, Node>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model for a character id, replacing any previous one.
    pub fn register(&mut self, character: &str, node: Node) {
        self.nodes.insert(character.to_string(), node);
    }

    /// Fetch the node for a character. Fails when nothing is registered;
    /// the screen layer surfaces this to the player.
    pub fn get_node(&self, character: &str) -> Result<Node, ModelError> {
        self.nodes
            .get(character)
            .cloned()
            .ok_or_else(|| ModelError::NotFound(character.to_string()))
    }

    pub fn contains(&self, character: &str) -> bool {
        self.nodes.contains_key(character)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
