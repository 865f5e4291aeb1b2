//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, speeds in units per frame
//! - Seeded RNG only
//! - Back-to-front iteration whenever a pool shrinks mid-pass
//! - No rendering or platform dependencies

pub mod collision;
pub mod kinematics;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, point_in_circle, score_for};
pub use kinematics::{Controls, clamp_speed, integrate, out_of_field, steer_player, wrap_position};
pub use snapshot::{ObstacleView, PlayerView, Snapshot};
pub use spawn::{Edge, seed_initial, spawn_periodic};
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Player, Projectile};
pub use tick::{TickInput, restart, start, tick};
