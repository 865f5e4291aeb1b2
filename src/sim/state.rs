//! Game state and core simulation types
//!
//! One owned `GameState` holds the craft, both entity pools, the session
//! counters and the RNG. Nothing in the simulation lives outside it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::heading;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started, waiting for the start action
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended, frozen until restart
    GameOver,
}

/// Something presentation collaborators may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Fired { pos: Vec2 },
    ObstacleSpawned { id: u32, pos: Vec2, radius: f32 },
    /// Parent removed, two fragments left behind
    ObstacleSplit { id: u32, pos: Vec2, radius: f32 },
    /// Removed without fragments
    ObstacleDestroyed { id: u32, pos: Vec2, radius: f32 },
    PlayerHit { lives_left: u32 },
    GameOver { score: u64 },
}

/// The player's craft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Heading (radians, 0 = +x, grows toward +y)
    pub angle: f32,
    pub vel: Vec2,
}

impl Player {
    /// Craft parked at the field center, at rest, facing +x
    pub fn centered(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.field_width / 2.0, tuning.field_height / 2.0),
            angle: 0.0,
            vel: Vec2::ZERO,
        }
    }

    /// Unit vector the craft is facing
    pub fn forward(&self) -> Vec2 {
        heading(self.angle)
    }
}

/// A laser shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// A drifting rock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub lives: u32,
    pub score: u64,
    /// Frames left of post-hit invulnerability (0 = vulnerable)
    pub invuln_ticks: u32,
    /// Frames simulated this session
    pub time_ticks: u64,
    /// Frames since the last periodic spawn
    pub spawn_ticks: u32,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    /// Pending events, drained by the session
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle game state. `tuning` is expected to be validated.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        debug_assert!(tuning.validate().is_ok(), "unvalidated tuning");
        Self {
            seed,
            phase: GamePhase::Idle,
            lives: tuning.starting_lives,
            score: 0,
            invuln_ticks: 0,
            time_ticks: 0,
            spawn_ticks: 0,
            player: Player::centered(&tuning),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// True while post-hit invulnerability is running
    pub fn is_invulnerable(&self) -> bool {
        self.invuln_ticks > 0
    }

    /// Push an obstacle into the pool and return its id
    pub fn add_obstacle(&mut self, pos: Vec2, vel: Vec2, radius: f32) -> u32 {
        debug_assert!(radius > 0.0);
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            pos,
            vel,
            radius,
        });
        id
    }

    /// Spawn a projectile at the craft, moving along its heading
    pub fn fire_projectile(&mut self) {
        let id = self.next_entity_id();
        let pos = self.player.pos;
        let vel = self.player.forward() * self.tuning.laser_speed;
        self.projectiles.push(Projectile { id, pos, vel });
        self.events.push(GameEvent::Fired { pos });
    }

    /// Put the craft back at the center after a non-fatal hit
    pub fn respawn_player(&mut self) {
        self.player = Player::centered(&self.tuning);
        self.invuln_ticks = self.tuning.invulnerability_frames;
    }

    /// Back to initial values. Entity ids keep counting.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Idle;
        self.lives = self.tuning.starting_lives;
        self.score = 0;
        self.invuln_ticks = 0;
        self.time_ticks = 0;
        self.spawn_ticks = 0;
        self.player = Player::centered(&self.tuning);
        self.projectiles.clear();
        self.obstacles.clear();
        self.events.clear();
    }
}
