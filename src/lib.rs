//! Drift Rocks - a wrap-around asteroid field arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, game state)
//! - `session`: Input/scheduler facade around the simulation
//! - `tuning`: Data-driven game balance

pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{FrameClock, Rotation, Session};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one display frame at 60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum frames per update to prevent spiral of death
    pub const MAX_FRAMES_PER_UPDATE: u32 = 8;

    /// Default field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Rejection-sampling cap for obstacle placement
    pub const MAX_SPAWN_ATTEMPTS: u32 = 64;
}

/// Unit vector for a heading angle
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Wrap a single coordinate into [0, size)
#[inline]
pub fn wrap_coord(v: f32, size: f32) -> f32 {
    let wrapped = v.rem_euclid(size);
    // rem_euclid can round up to `size` for tiny negative inputs
    if wrapped >= size { 0.0 } else { wrapped }
}
