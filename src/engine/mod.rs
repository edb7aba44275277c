// Engine modules: tween scheduling, audio triggers, model catalog

pub mod audio;
pub mod models;
pub mod tween;
