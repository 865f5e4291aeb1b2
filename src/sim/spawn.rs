//! Obstacle seeding and periodic replenishment
//!
//! Placement is rejection-sampled against the safe distance around the craft.
//! Sampling is capped; when it gives up the obstacle goes to the edge midpoint
//! farthest from the craft.

use glam::Vec2;
use rand::Rng;

use super::kinematics::wrap_position;
use super::state::{GameEvent, GameState};
use crate::consts::MAX_SPAWN_ATTEMPTS;

/// The four field edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Point on this edge at fraction `t` (0..1) along it
    pub fn point(self, t: f32, width: f32, height: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(t * width, 0.0),
            Edge::Right => Vec2::new(width, t * height),
            Edge::Bottom => Vec2::new(t * width, height),
            Edge::Left => Vec2::new(0.0, t * height),
        }
    }
}

/// Random drift velocity and radius for a new obstacle
fn random_motion(state: &mut GameState) -> (Vec2, f32) {
    let vel = random_velocity(state);
    let radius = state
        .rng
        .random_range(state.tuning.min_obstacle_radius..=state.tuning.max_obstacle_radius);
    (vel, radius)
}

/// Velocity with each component uniform in [-max, max]
pub(crate) fn random_velocity(state: &mut GameState) -> Vec2 {
    let max = state.tuning.max_obstacle_speed;
    Vec2::new(
        state.rng.random_range(-max..=max),
        state.rng.random_range(-max..=max),
    )
}

/// Edge midpoint with the greatest distance to `player`
fn farthest_edge_midpoint(player: Vec2, width: f32, height: f32) -> Vec2 {
    Edge::ALL
        .iter()
        .map(|edge| wrap_position(edge.point(0.5, width, height), width, height))
        .max_by(|a, b| {
            a.distance_squared(player)
                .partial_cmp(&b.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(Vec2::ZERO)
}

/// Sample positions until one is clear of the craft, up to the attempt cap
fn place_clear_of_player(
    state: &mut GameState,
    mut sample: impl FnMut(&mut GameState) -> Vec2,
) -> Vec2 {
    let player = state.player.pos;
    let safe = state.tuning.safe_distance;
    let (width, height) = (state.tuning.field_width, state.tuning.field_height);

    // The far edges are the same lines as the near ones on the torus
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let pos = wrap_position(sample(state), width, height);
        if pos.distance(player) > safe {
            return pos;
        }
    }

    let fallback = farthest_edge_midpoint(player, width, height);
    log::warn!(
        "No clear spawn point after {} attempts, using {:?}",
        MAX_SPAWN_ATTEMPTS,
        fallback
    );
    fallback
}

fn spawn_at(state: &mut GameState, pos: Vec2) -> u32 {
    let (vel, radius) = random_motion(state);
    let id = state.add_obstacle(pos, vel, radius);
    state
        .events
        .push(GameEvent::ObstacleSpawned { id, pos, radius });
    log::debug!("Spawned obstacle {} at {:?} r={:.1}", id, pos, radius);
    id
}

/// Populate the field at session start
pub fn seed_initial(state: &mut GameState) {
    let (width, height) = (state.tuning.field_width, state.tuning.field_height);
    for _ in 0..state.tuning.initial_obstacles {
        let pos = place_clear_of_player(state, |s| {
            Vec2::new(s.rng.random_range(0.0..width), s.rng.random_range(0.0..height))
        });
        spawn_at(state, pos);
    }
}

/// Add one obstacle on a random edge unless the field is already full
///
/// Returns the new obstacle's id.
pub fn spawn_periodic(state: &mut GameState) -> Option<u32> {
    if state.obstacles.len() >= state.tuning.max_obstacles as usize {
        return None;
    }

    let (width, height) = (state.tuning.field_width, state.tuning.field_height);
    let pos = place_clear_of_player(state, |s| {
        let edge = Edge::ALL[s.rng.random_range(0..Edge::ALL.len())];
        let t = s.rng.random_range(0.0..1.0);
        edge.point(t, width, height)
    });
    Some(spawn_at(state, pos))
}
