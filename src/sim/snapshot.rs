//! Read-only per-frame view for renderers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState};

/// Craft pose plus shield presentation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub angle: f32,
    pub invulnerable: bool,
    pub invuln_ticks: u32,
    /// Blink hint: false on the "off" half of each blink period while shielded
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub pos: Vec2,
    pub radius: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub field: Vec2,
    pub player: PlayerView,
    pub projectiles: Vec<Vec2>,
    pub obstacles: Vec<ObstacleView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let blink = state.tuning.blink_interval_frames.max(1);
        let visible = !state.is_invulnerable() || (state.invuln_ticks / blink) % 2 == 0;

        Self {
            phase: state.phase,
            score: state.score,
            lives: state.lives,
            field: Vec2::new(state.tuning.field_width, state.tuning.field_height),
            player: PlayerView {
                pos: state.player.pos,
                angle: state.player.angle,
                invulnerable: state.is_invulnerable(),
                invuln_ticks: state.invuln_ticks,
                visible,
            },
            projectiles: state.projectiles.iter().map(|p| p.pos).collect(),
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    pos: o.pos,
                    radius: o.radius,
                })
                .collect(),
        }
    }
}
