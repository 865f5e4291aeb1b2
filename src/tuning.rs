//! Game balance and field configuration
//!
//! Every tunable has a default; overrides come from JSON where missing keys
//! keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Rejected configuration
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("field must have positive size, got {width}x{height}")]
    FieldSize { width: f32, height: f32 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be a finite non-negative number, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("{name} is too large to sample [-{value}, {value}]")]
    SampleRange { name: &'static str, value: f32 },
    #[error("obstacle radius range is empty: {min}..={max}")]
    RadiusRange { min: f32, max: f32 },
    #[error("{name} must be at least 1")]
    ZeroCount { name: &'static str },
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not read tuning file: {0}")]
    Io(#[from] std::io::Error),
}

/// All tunables for a session. Speeds are per frame, durations in frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Craft ===
    /// Radians per frame while a rotate input is held
    pub rotation_speed: f32,
    /// Velocity added per frame while thrusting
    pub thrust: f32,
    pub max_speed: f32,
    pub laser_speed: f32,

    // === Obstacles ===
    /// Minimum distance between a fresh obstacle and the player
    pub safe_distance: f32,
    pub min_obstacle_radius: f32,
    pub max_obstacle_radius: f32,
    /// Each velocity component is drawn from [-max, max]
    pub max_obstacle_speed: f32,
    pub initial_obstacles: u32,
    pub max_obstacles: u32,
    pub spawn_interval_frames: u32,
    /// Hit obstacles larger than this split in two
    pub split_threshold: f32,

    // === Session ===
    pub starting_lives: u32,
    pub invulnerability_frames: u32,
    pub score_per_unit: u64,
    /// Blink period for the shielded craft (presentation hint)
    pub blink_interval_frames: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            rotation_speed: 0.05,
            thrust: 0.1,
            max_speed: 5.0,
            laser_speed: 7.0,

            safe_distance: 100.0,
            min_obstacle_radius: 15.0,
            max_obstacle_radius: 45.0,
            max_obstacle_speed: 1.0,
            initial_obstacles: 5,
            max_obstacles: 10,
            spawn_interval_frames: 180, // 3 seconds
            split_threshold: 20.0,

            starting_lives: 3,
            invulnerability_frames: 120, // 2 seconds
            score_per_unit: 10,
            blink_interval_frames: 6,
        }
    }
}

impl Tuning {
    /// Defaults for a field of the given size
    pub fn with_field(width: f32, height: f32) -> Self {
        Self {
            field_width: width,
            field_height: height,
            ..Self::default()
        }
    }

    /// Parse overrides from JSON and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load overrides from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.field_width.is_finite() && self.field_width > 0.0)
            || !(self.field_height.is_finite() && self.field_height > 0.0)
        {
            return Err(TuningError::FieldSize {
                width: self.field_width,
                height: self.field_height,
            });
        }

        for (name, value) in [
            ("max_speed", self.max_speed),
            ("laser_speed", self.laser_speed),
            ("min_obstacle_radius", self.min_obstacle_radius),
            ("split_threshold", self.split_threshold),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NotPositive { name, value });
            }
        }

        for (name, value) in [
            ("rotation_speed", self.rotation_speed),
            ("thrust", self.thrust),
            ("safe_distance", self.safe_distance),
            ("max_obstacle_speed", self.max_obstacle_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Negative { name, value });
            }
        }

        // Symmetric sampling needs the full span to stay finite
        if !(self.max_obstacle_speed * 2.0).is_finite() {
            return Err(TuningError::SampleRange {
                name: "max_obstacle_speed",
                value: self.max_obstacle_speed,
            });
        }

        if !self.max_obstacle_radius.is_finite()
            || self.max_obstacle_radius < self.min_obstacle_radius
        {
            return Err(TuningError::RadiusRange {
                min: self.min_obstacle_radius,
                max: self.max_obstacle_radius,
            });
        }

        for (name, value) in [
            ("starting_lives", self.starting_lives),
            ("spawn_interval_frames", self.spawn_interval_frames),
            ("blink_interval_frames", self.blink_interval_frames),
        ] {
            if value == 0 {
                return Err(TuningError::ZeroCount { name });
            }
        }

        Ok(())
    }
}
