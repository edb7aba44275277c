use std::cell::Cell;
use std::f32::consts::PI;
use std::rc::Rc;

use anyhow::Result;
use glam::Vec3;
use log::info;

mod core;
mod engine;
mod game;

use engine::audio::SoundPlayer;
use engine::models::{ModelCatalog, Node};
use game::characters;
use game::player::PlayerEntity;
use game::settings::{GROUND_LEVEL, STARTING_ROW};
use game::world::{CarrierKind, EntityRegistry, RoadContext};

/// Simulation tick length (60 ticks per second).
const TICK: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Road Hopper...");

    // Register a placeholder model for every selectable character.
    let mut models = ModelCatalog::new();
    for character in &characters::CHARACTERS {
        models.register(character.id, Node::new(character.id, Vec3::new(1.0, 1.5, 1.0)));
    }

    let mut sounds = SoundPlayer::with_standard_sounds();
    let mut registry = EntityRegistry::new();

    let playing = Rc::new(Cell::new(true));
    let playing_check = playing.clone();
    let mut player = PlayerEntity::new(
        characters::default_character().id,
        &models,
        Box::new(move || playing_check.get()),
    )?;

    info!(
        "Player spawned at {:?} as {:?}",
        player.transform.position,
        player.character()
    );

    // Headless demo: hop one row forward, get bumped by a car, reset.
    let landed = Rc::new(Cell::new(false));
    let observer = landed.clone();
    player.commit_move(
        Vec3::new(0.0, GROUND_LEVEL, STARTING_ROW - 1.0),
        PI,
        move || observer.set(true),
    );
    sounds.play_move_sound();

    while !landed.get() {
        player.update(TICK);
    }
    info!("Hop landed at {:?}", player.transform.position);

    let road = RoadContext {
        top: GROUND_LEVEL,
        position_z: player.transform.position.z,
    };
    let car = registry.spawn(
        CarrierKind::Car,
        0.05,
        Vec3::new(2.0, GROUND_LEVEL, road.position_z),
    );

    player.commit_move(
        Vec3::new(0.0, GROUND_LEVEL, STARTING_ROW - 2.0),
        PI,
        || {},
    );
    player.update(TICK * 4.0); // airborne, off the lane center
    player.collide_with_car(&road, car);
    sounds.play_car_hit_sound();

    for _ in 0..30 {
        registry.tick();
        player.move_on_car(&registry);
        player.update(TICK);
    }
    info!(
        "Carried by car to x = {:.2}, hit_by = {:?}",
        player.transform.position.x,
        player.hit_by()
    );

    playing.set(false);
    player.reset();
    info!("Reset to {:?}", player.transform.position);

    Ok(())
}
