//! Per-frame motion: Euler integration and toroidal wrap
//!
//! Speeds are in field units per frame, so a step is simply `pos += vel`.

use glam::Vec2;

use super::state::Player;
use crate::tuning::Tuning;
use crate::wrap_coord;

/// Held steering inputs for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
}

/// One Euler step
#[inline]
pub fn integrate(pos: Vec2, vel: Vec2) -> Vec2 {
    pos + vel
}

/// Wrap a position onto the field torus
#[inline]
pub fn wrap_position(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_coord(pos.x, width), wrap_coord(pos.y, height))
}

/// Projectiles are dropped instead of wrapped
#[inline]
pub fn out_of_field(pos: Vec2, width: f32, height: f32) -> bool {
    pos.x < 0.0 || pos.x >= width || pos.y < 0.0 || pos.y >= height
}

/// Scale `vel` down uniformly so its length is at most `max_speed`
#[inline]
pub fn clamp_speed(vel: Vec2, max_speed: f32) -> Vec2 {
    vel.clamp_length_max(max_speed)
}

/// Rotate, thrust, clamp, integrate and wrap the craft
pub fn steer_player(player: &mut Player, controls: Controls, tuning: &Tuning) {
    if controls.rotate_left {
        player.angle -= tuning.rotation_speed;
    }
    if controls.rotate_right {
        player.angle += tuning.rotation_speed;
    }

    if controls.thrust {
        player.vel += player.forward() * tuning.thrust;
    }
    player.vel = clamp_speed(player.vel, tuning.max_speed);

    player.pos = wrap_position(
        integrate(player.pos, player.vel),
        tuning.field_width,
        tuning.field_height,
    );
}
