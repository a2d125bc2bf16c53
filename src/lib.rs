//! Cube Snakes - a 2048-style snake arena game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, merging, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `leaderboard`: Live in-memory ranking of the snakes in a round

pub mod leaderboard;
pub mod sim;
pub mod tuning;

pub use leaderboard::{Leaderboard, Standing};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Gap between the screen edge and the playable arena
    pub const ARENA_MARGIN: f32 = 40.0;

    /// Snake movement (pixels per second)
    pub const SNAKE_SPEED: f32 = 200.0;
    pub const BOOST_MULTIPLIER: f32 = 1.8;
    /// Max center-to-center gap between consecutive segments
    pub const SEGMENT_DISTANCE: f32 = 40.0;

    /// Side length of a cube/segment bounding box
    pub const CUBE_SIZE: f32 = 64.0;

    /// Seconds between timed cube spawns
    pub const SPAWN_INTERVAL: f32 = 1.0;
    /// Values a timed spawn picks from
    pub const SPAWN_VALUES: [u32; 2] = [2, 4];
    /// Safety cap on loose cubes produced by the spawn timer
    pub const MAX_LOOSE_CUBES: usize = 256;

    /// Number of AI snakes at the start of a round
    pub const AI_COUNT: usize = 3;
    /// Head value every snake starts with
    pub const START_VALUE: u32 = 2;

    /// Chance an AI heads for a loose cube instead of wandering
    pub const AI_CUBE_BIAS: f64 = 0.7;
    /// AI retarget window in seconds, [min, max)
    pub const AI_RETARGET_MIN: f32 = 1.0;
    pub const AI_RETARGET_MAX: f32 = 3.0;
}

/// Unit heading from `from` toward `to`, or zero if they coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// True if `value` is a positive power of two
#[inline]
pub fn is_cube_value(value: u32) -> bool {
    value.is_power_of_two()
}
