//! Session facade for input and scheduler collaborators
//!
//! Input arrives as flag sets and one-shot triggers; the display scheduler
//! feeds elapsed wall time, which the frame clock turns into whole simulation
//! frames. The clock only runs while the game is being played.

use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_DT, MAX_FRAMES_PER_UPDATE};
use crate::sim::{
    self, CollisionOutcome, Controls, GameEvent, GamePhase, GameState, Snapshot, TickInput,
};
use crate::tuning::{Tuning, TuningError};

/// Rotation input direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    Left,
    Right,
    /// Releases both directions
    None,
}

/// Fixed-step accumulator driven by the display refresh
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    running: bool,
}

impl FrameClock {
    /// Begin a loop. Refuses when one is already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.accumulator = 0.0;
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Add elapsed seconds and return how many frames are due (capped)
    pub fn accumulate(&mut self, elapsed: f32) -> u32 {
        if !self.running || !elapsed.is_finite() {
            return 0;
        }

        // Clamp long stalls (tab switch, debugger)
        self.accumulator += elapsed.clamp(0.0, 0.25);

        let mut frames = 0;
        while self.accumulator >= FRAME_DT && frames < MAX_FRAMES_PER_UPDATE {
            self.accumulator -= FRAME_DT;
            frames += 1;
        }
        if frames == MAX_FRAMES_PER_UPDATE {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(FRAME_DT);
        }
        frames
    }
}

/// One game session: state, held inputs and the frame clock
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    controls: Controls,
    clock: FrameClock,
}

impl Session {
    /// Validate `tuning` and create an idle session
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        log::info!(
            "New session {}x{} (seed {})",
            tuning.field_width,
            tuning.field_height,
            seed
        );
        Ok(Self {
            state: GameState::new(tuning, seed),
            controls: Controls::default(),
            clock: FrameClock::default(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    // === Input ===

    pub fn set_rotation(&mut self, direction: Rotation, active: bool) {
        match direction {
            Rotation::Left => self.controls.rotate_left = active,
            Rotation::Right => self.controls.rotate_right = active,
            Rotation::None => {
                self.controls.rotate_left = false;
                self.controls.rotate_right = false;
            }
        }
    }

    pub fn set_thrust(&mut self, active: bool) {
        self.controls.thrust = active;
    }

    /// Shoot from the craft's current pose. Only while playing.
    pub fn fire(&mut self) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        self.state.fire_projectile();
        true
    }

    /// Idle -> Playing and start the frame loop
    pub fn start(&mut self) -> bool {
        if self.clock.is_running() || !sim::start(&mut self.state) {
            return false;
        }
        self.clock.start()
    }

    /// GameOver -> Idle. Held inputs are released.
    pub fn restart(&mut self) -> bool {
        if !sim::restart(&mut self.state) {
            return false;
        }
        self.clock.stop();
        self.controls = Controls::default();
        true
    }

    // === Scheduler ===

    /// Run one frame with the held inputs
    ///
    /// Returns the frame's collision summary, or `None` if nothing ran.
    pub fn advance_frame(&mut self) -> Option<CollisionOutcome> {
        let input = TickInput {
            controls: self.controls,
            fire: false,
        };
        let outcome = sim::tick(&mut self.state, &input);

        if let Some(outcome) = &outcome {
            if outcome.obstacles_hit > 0 {
                log::debug!(
                    "Frame {}: {} hit, {} fragments, +{} points",
                    self.state.time_ticks,
                    outcome.obstacles_hit,
                    outcome.fragments,
                    outcome.points
                );
            }
        }

        if self.state.phase != GamePhase::Playing && self.clock.is_running() {
            log::info!("Frame loop stopped after {} frames", self.state.time_ticks);
            self.clock.stop();
        }
        outcome
    }

    /// Feed elapsed wall time; returns the number of frames simulated
    pub fn update(&mut self, elapsed: f32) -> u32 {
        let due = self.clock.accumulate(elapsed);
        let mut ran = 0;
        for _ in 0..due {
            if !self.clock.is_running() {
                break;
            }
            self.advance_frame();
            ran += 1;
        }
        ran
    }

    // === Output ===

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }
}
