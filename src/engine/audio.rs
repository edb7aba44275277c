// Sound playback triggers
//
// Presentation-layer audio is best effort: a missing sound or a failed
// backend call is logged and swallowed, never propagated. The controller
// must keep running no matter what the audio layer does.

use log::warn;
use rand::Rng;
use std::collections::HashMap;

use crate::core::math::clamp;

/// Number of interchangeable player move-sound variants, cycled in order.
const MOVE_VARIANTS: usize = 2;
/// Number of interchangeable death/hit variants, picked at random.
const DEATH_VARIANTS: usize = 2;

#[derive(Debug, Clone)]
struct Sound {
    volume: f32,
    playing: bool,
}

impl Default for Sound {
    fn default() -> Self {
        Self {
            volume: 1.0,
            playing: false,
        }
    }
}

/// Named sound bank with fail-soft trigger operations.
#[derive(Debug, Default)]
pub struct SoundPlayer {
    sounds: HashMap<String, Sound>,
    move_variant: usize,
}

impl SoundPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sound bank preloaded with the game's standard event sounds.
    pub fn with_standard_sounds() -> Self {
        let mut player = Self::new();
        for i in 0..MOVE_VARIANTS {
            player.register(&format!("player/move/{i}"));
        }
        for i in 0..DEATH_VARIANTS {
            player.register(&format!("player/die/{i}"));
            player.register(&format!("car/hit/{i}"));
        }
        player.register("car/passive");
        player.register("music/menu");
        player.register("music/game");
        player
    }

    /// Register a sound under a name. Re-registering resets its state.
    pub fn register(&mut self, name: &str) {
        self.sounds.insert(name.to_string(), Sound::default());
    }

    /// Start a sound. Unknown names are logged and ignored.
    pub fn play(&mut self, name: &str) {
        match self.sounds.get_mut(name) {
            Some(sound) => sound.playing = true,
            None => warn!("sound does not exist: {name}"),
        }
    }

    /// Stop a sound. Unknown names are logged and ignored.
    pub fn stop(&mut self, name: &str) {
        match self.sounds.get_mut(name) {
            Some(sound) => sound.playing = false,
            None => warn!("cannot stop, sound does not exist: {name}"),
        }
    }

    /// Pause a sound. Unknown names are logged and ignored.
    pub fn pause(&mut self, name: &str) {
        match self.sounds.get_mut(name) {
            Some(sound) => sound.playing = false,
            None => warn!("cannot pause, sound does not exist: {name}"),
        }
    }

    /// Set a sound's volume, clamped to [0, 1]. Unknown names are logged
    /// and ignored.
    pub fn set_volume(&mut self, name: &str, volume: f32) {
        match self.sounds.get_mut(name) {
            Some(sound) => sound.volume = clamp(volume, 0.0, 1.0),
            None => warn!("cannot set volume, sound does not exist: {name}"),
        }
    }

    /// Play the next move-sound variant, cycling through them in order so
    /// rapid hops don't repeat the exact same sample.
    pub fn play_move_sound(&mut self) {
        let name = format!("player/move/{}", self.move_variant);
        self.move_variant = (self.move_variant + 1) % MOVE_VARIANTS;
        self.play(&name);
    }

    /// Play a random death-sound variant.
    pub fn play_death_sound(&mut self) {
        let variant = rand::rng().random_range(0..DEATH_VARIANTS);
        self.play(&format!("player/die/{variant}"));
    }

    /// Play a random car-hit variant.
    pub fn play_car_hit_sound(&mut self) {
        let variant = rand::rng().random_range(0..DEATH_VARIANTS);
        self.play(&format!("car/hit/{variant}"));
    }

    /// Whether a sound is currently marked as playing.
    pub fn is_playing(&self, name: &str) -> bool {
        self.sounds.get(name).map(|s| s.playing).unwrap_or(false)
    }

    /// A sound's current volume, if it exists.
    pub fn volume(&self, name: &str) -> Option<f32> {
        self.sounds.get(name).map(|s| s.volume)
    }
}
