//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session one frame deterministically, plus
//! the start/restart transitions of the session state machine.

use super::collision::{self, CollisionOutcome};
use super::kinematics::{Controls, integrate, out_of_field, steer_player, wrap_position};
use super::spawn;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held steering inputs
    pub controls: Controls,
    /// Fire a projectile before moving
    pub fire: bool,
}

/// Idle -> Playing. Returns false if the session was not idle.
pub fn start(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Idle {
        log::debug!("Start ignored in {:?}", state.phase);
        return false;
    }

    state.phase = GamePhase::Playing;
    state.spawn_ticks = 0;
    spawn::seed_initial(state);
    log::info!(
        "Session started (seed {}, {} obstacles)",
        state.seed,
        state.obstacles.len()
    );
    true
}

/// GameOver -> Idle. Returns false if the game was not over.
pub fn restart(state: &mut GameState) -> bool {
    if state.phase != GamePhase::GameOver {
        log::debug!("Restart ignored in {:?}", state.phase);
        return false;
    }

    state.reset();
    log::info!("Session reset");
    true
}

/// Advance the game state by one frame
///
/// Does nothing outside `Playing`, so a finished game stays frozen.
pub fn tick(state: &mut GameState, input: &TickInput) -> Option<CollisionOutcome> {
    if state.phase != GamePhase::Playing {
        return None;
    }

    state.time_ticks += 1;

    if input.fire {
        state.fire_projectile();
    }

    steer_player(&mut state.player, input.controls, &state.tuning);

    let (width, height) = (state.tuning.field_width, state.tuning.field_height);

    for i in (0..state.projectiles.len()).rev() {
        let shot = &mut state.projectiles[i];
        shot.pos = integrate(shot.pos, shot.vel);
        if out_of_field(shot.pos, width, height) {
            state.projectiles.remove(i);
        }
    }

    for obstacle in &mut state.obstacles {
        obstacle.pos = wrap_position(integrate(obstacle.pos, obstacle.vel), width, height);
    }

    // Shield state is decided at the top of the frame
    let shielded = state.invuln_ticks > 0;
    if shielded {
        state.invuln_ticks -= 1;
    }

    let outcome = collision::resolve(state, shielded);
    if outcome.game_over {
        return Some(outcome);
    }

    state.spawn_ticks += 1;
    if state.spawn_ticks >= state.tuning.spawn_interval_frames {
        state.spawn_ticks = 0;
        spawn::spawn_periodic(state);
    }

    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Projectile;
    use crate::tuning::Tuning;
    use glam::Vec2;

    /// Playing state with nothing on the field
    fn empty_playing_state(tuning: Tuning) -> GameState {
        let mut state = GameState::new(tuning, 12345);
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_start_seeds_field() {
        let mut state = GameState::new(Tuning::default(), 12345);
        assert!(start(&mut state));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.obstacles.len(), 5);

        // Second start is refused and does not reseed
        assert!(!start(&mut state));
        assert_eq!(state.obstacles.len(), 5);
    }

    #[test]
    fn test_idle_does_not_advance() {
        let mut state = GameState::new(Tuning::default(), 12345);
        assert!(tick(&mut state, &TickInput::default()).is_none());
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_fire_scenario() {
        let mut state = empty_playing_state(Tuning::default());
        state.fire_projectile();
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.projectiles[0].vel, Vec2::new(7.0, 0.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.projectiles[0].pos, Vec2::new(407.0, 300.0));
    }

    #[test]
    fn test_projectiles_leave_field() {
        let mut state = empty_playing_state(Tuning::default());
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: Vec2::new(795.0, 10.0),
            vel: Vec2::new(7.0, 0.0),
        });
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(7.0, 0.0),
        });

        tick(&mut state, &TickInput::default());
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, Vec2::new(17.0, 10.0));
    }

    #[test]
    fn test_obstacles_wrap() {
        let mut state = empty_playing_state(Tuning::default());
        state.add_obstacle(Vec2::new(799.5, 0.5), Vec2::new(1.0, -1.0), 15.0);

        tick(&mut state, &TickInput::default());
        let pos = state.obstacles[0].pos;
        assert!((pos.x - 0.5).abs() < 1e-3);
        assert!((pos.y - 599.5).abs() < 1e-3);
    }

    #[test]
    fn test_invulnerability_counts_down_exactly() {
        let tuning = Tuning {
            invulnerability_frames: 10,
            ..Tuning::default()
        };
        let mut state = empty_playing_state(tuning);
        // Obstacle parked on the respawn point
        state.add_obstacle(Vec2::new(400.0, 300.0), Vec2::ZERO, 20.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 2);
        assert!(state.is_invulnerable());
        assert_eq!(state.invuln_ticks, 10);

        for frame in 1..=10 {
            assert!(state.is_invulnerable(), "frame {}", frame);
            tick(&mut state, &TickInput::default());
            assert_eq!(state.lives, 2, "shielded on frame {}", frame);
        }
        assert!(!state.is_invulnerable());

        // Shield is gone, the parked obstacle hits again
        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 1);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = empty_playing_state(Tuning::default());
        state.lives = 1;
        state.add_obstacle(Vec2::new(400.0, 300.0), Vec2::new(1.0, 1.0), 20.0);
        state.add_obstacle(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0), 20.0);

        let outcome = tick(&mut state, &TickInput::default()).unwrap();
        assert!(outcome.game_over);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);

        let frozen_obstacles = state.obstacles.clone();
        let frozen_ticks = state.time_ticks;
        let input = TickInput {
            fire: true,
            controls: Controls {
                thrust: true,
                ..Default::default()
            },
        };
        for _ in 0..5 {
            assert!(tick(&mut state, &input).is_none());
        }
        assert_eq!(state.obstacles, frozen_obstacles);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.time_ticks, frozen_ticks);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = empty_playing_state(Tuning::default());
        assert!(!restart(&mut state));

        state.lives = 1;
        state.score = 300;
        state.add_obstacle(Vec2::new(400.0, 300.0), Vec2::ZERO, 20.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        assert!(restart(&mut state));
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert!(state.obstacles.is_empty());
        assert!(state.projectiles.is_empty());

        assert!(start(&mut state));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.obstacles.len(), 5);
    }

    #[test]
    fn test_periodic_spawn_interval() {
        let tuning = Tuning {
            spawn_interval_frames: 4,
            ..Tuning::default()
        };
        let mut state = empty_playing_state(tuning);

        for _ in 0..3 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.obstacles.is_empty());

        tick(&mut state, &TickInput::default());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.spawn_ticks, 0);

        for _ in 0..4 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(Tuning::default(), 99999);
        let mut state2 = GameState::new(Tuning::default(), 99999);
        start(&mut state1);
        start(&mut state2);

        let inputs = [
            TickInput {
                controls: Controls {
                    rotate_left: true,
                    thrust: true,
                    ..Default::default()
                },
                fire: true,
            },
            TickInput::default(),
            TickInput {
                fire: true,
                ..Default::default()
            },
        ];

        for frame in 0..600 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.projectiles, state2.projectiles);
    }

    #[test]
    fn test_long_run_invariants() {
        let mut state = GameState::new(Tuning::default(), 2024);
        start(&mut state);
        let input = TickInput {
            controls: Controls {
                rotate_right: true,
                thrust: true,
                ..Default::default()
            },
            fire: true,
        };

        let mut last_score = 0;
        for _ in 0..3000 {
            tick(&mut state, &input);
            assert!(state.player.vel.length() <= state.tuning.max_speed + 1e-4);
            assert!(state.score >= last_score);
            last_score = state.score;
            for obstacle in &state.obstacles {
                assert!(obstacle.radius > 0.0);
                assert!(obstacle.pos.x >= 0.0 && obstacle.pos.x < 800.0);
                assert!(obstacle.pos.y >= 0.0 && obstacle.pos.y < 600.0);
            }
            if state.phase == GamePhase::GameOver {
                assert_eq!(state.lives, 0);
                break;
            }
        }
    }
}
