//! Collision detection and response
//!
//! Everything is a circle-vs-point proximity test: the craft and projectiles
//! are points, obstacles are circles. Obstacles are walked back-to-front so
//! removal by index never skips an element, and fragments pushed during the
//! pass are not revisited until the next frame.

use glam::Vec2;

use super::spawn::random_velocity;
use super::state::{GameEvent, GamePhase, GameState};

/// Summary of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOutcome {
    /// Obstacles removed by projectiles
    pub obstacles_hit: u32,
    /// Fragments created by splits
    pub fragments: u32,
    pub points: u64,
    pub player_hit: bool,
    pub game_over: bool,
}

/// Whether `point` lies strictly inside a circle
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) < radius
}

/// Points awarded for destroying an obstacle of `radius`
#[inline]
pub fn score_for(radius: f32, score_per_unit: u64) -> u64 {
    (radius.max(0.0).floor() as u64).saturating_mul(score_per_unit)
}

/// Resolve player and projectile contacts for this frame
///
/// `shielded` skips the player damage check.
pub fn resolve(state: &mut GameState, shielded: bool) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    for i in (0..state.obstacles.len()).rev() {
        // Player damage is evaluated first and can end the frame
        if !shielded && !outcome.player_hit {
            let obstacle = &state.obstacles[i];
            if point_in_circle(state.player.pos, obstacle.pos, obstacle.radius) {
                outcome.player_hit = true;
                if damage_player(state) {
                    outcome.game_over = true;
                    return outcome;
                }
            }
        }

        if let Some(j) = first_projectile_inside(state, i) {
            state.projectiles.remove(j);
            let parent = state.obstacles.remove(i);

            if parent.radius > state.tuning.split_threshold {
                let child_radius = parent.radius / 2.0;
                for _ in 0..2 {
                    let vel = random_velocity(state);
                    state.add_obstacle(parent.pos, vel, child_radius);
                }
                outcome.fragments += 2;
                state.events.push(GameEvent::ObstacleSplit {
                    id: parent.id,
                    pos: parent.pos,
                    radius: parent.radius,
                });
                log::debug!("Obstacle {} split (r={:.1})", parent.id, parent.radius);
            } else {
                state.events.push(GameEvent::ObstacleDestroyed {
                    id: parent.id,
                    pos: parent.pos,
                    radius: parent.radius,
                });
            }

            let points = score_for(parent.radius, state.tuning.score_per_unit);
            state.score = state.score.saturating_add(points);
            outcome.points = outcome.points.saturating_add(points);
            outcome.obstacles_hit += 1;
        }
    }

    outcome
}

/// Back-to-front scan for the first projectile inside obstacle `i`
fn first_projectile_inside(state: &GameState, i: usize) -> Option<usize> {
    let obstacle = &state.obstacles[i];
    (0..state.projectiles.len())
        .rev()
        .find(|&j| point_in_circle(state.projectiles[j].pos, obstacle.pos, obstacle.radius))
}

/// Take a life. Returns true when that was the last one.
fn damage_player(state: &mut GameState) -> bool {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::PlayerHit {
        lives_left: state.lives,
    });

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over with score {}", state.score);
        return true;
    }

    log::info!("Player hit, {} lives left", state.lives);
    state.respawn_player();
    false
}
