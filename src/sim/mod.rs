//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod chain;
pub mod collision;
pub mod creature;
pub mod rect;
pub mod state;
pub mod tick;

pub use chain::{Chain, Segment};
pub use collision::{Clash, clash, hitbox};
pub use creature::{Creature, Steering};
pub use rect::Rect;
pub use state::{
    EliminationCause, GameEvent, GamePhase, GameState, LooseCube, SnakeView, Snapshot,
};
pub use tick::{TickInput, tick};
