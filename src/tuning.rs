//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here. Defaults match the
//! constants in [`crate::consts`]; a JSON file can override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Rect;

/// Errors raised while loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Balance values for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Inset of the playable rectangle from the screen edge
    pub arena_margin: f32,

    // === Movement ===
    pub snake_speed: f32,
    pub boost_multiplier: f32,
    pub segment_distance: f32,
    /// Side length of every cube/segment hitbox
    pub cube_size: f32,

    // === Spawning ===
    pub spawn_interval: f32,
    /// Spawn timer value after a reset (0 spawns on the first tick)
    pub initial_spawn_delay: f32,
    pub spawn_values: Vec<u32>,
    pub max_loose_cubes: usize,

    // === Opponents ===
    pub ai_count: usize,
    pub start_value: u32,
    pub ai_cube_bias: f64,
    pub ai_retarget_min: f32,
    pub ai_retarget_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            arena_margin: ARENA_MARGIN,

            snake_speed: SNAKE_SPEED,
            boost_multiplier: BOOST_MULTIPLIER,
            segment_distance: SEGMENT_DISTANCE,
            cube_size: CUBE_SIZE,

            spawn_interval: SPAWN_INTERVAL,
            initial_spawn_delay: 0.0,
            spawn_values: SPAWN_VALUES.to_vec(),
            max_loose_cubes: MAX_LOOSE_CUBES,

            ai_count: AI_COUNT,
            start_value: START_VALUE,
            ai_cube_bias: AI_CUBE_BIAS,
            ai_retarget_min: AI_RETARGET_MIN,
            ai_retarget_max: AI_RETARGET_MAX,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Playable rectangle inside the screen
    pub fn arena_bounds(&self) -> Rect {
        Rect::new(
            self.arena_margin,
            self.arena_margin,
            self.screen_width - 2.0 * self.arena_margin,
            self.screen_height - 2.0 * self.arena_margin,
        )
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let bounds = self.arena_bounds();
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(TuningError::Invalid("arena must have positive size"));
        }
        if self.cube_size <= 0.0 || self.cube_size >= bounds.width().min(bounds.height()) {
            return Err(TuningError::Invalid("cube_size must fit inside the arena"));
        }
        if self.snake_speed <= 0.0 {
            return Err(TuningError::Invalid("snake_speed must be positive"));
        }
        if self.boost_multiplier < 1.0 {
            return Err(TuningError::Invalid("boost_multiplier must be at least 1.0"));
        }
        if self.segment_distance <= 0.0 {
            return Err(TuningError::Invalid("segment_distance must be positive"));
        }
        if self.spawn_interval <= 0.0 {
            return Err(TuningError::Invalid("spawn_interval must be positive"));
        }
        if self.spawn_values.is_empty() {
            return Err(TuningError::Invalid("spawn_values must not be empty"));
        }
        if !self.spawn_values.iter().all(|&v| crate::is_cube_value(v)) {
            return Err(TuningError::Invalid("spawn_values must be powers of two"));
        }
        if !crate::is_cube_value(self.start_value) {
            return Err(TuningError::Invalid("start_value must be a power of two"));
        }
        if !(0.0..=1.0).contains(&self.ai_cube_bias) {
            return Err(TuningError::Invalid("ai_cube_bias must be between 0.0 and 1.0"));
        }
        if self.ai_retarget_min <= 0.0 || self.ai_retarget_max <= self.ai_retarget_min {
            return Err(TuningError::Invalid(
                "ai retarget window must be positive and non-empty",
            ));
        }
        Ok(())
    }
}
