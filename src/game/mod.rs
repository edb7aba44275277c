// Game modules: player entity, world entities, characters, tuning

pub mod characters;
pub mod player;
pub mod settings;
pub mod world;
