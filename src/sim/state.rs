//! Game state and core simulation types
//!
//! The arena owns every snake and loose cube, plus the single seeded RNG all
//! per-tick randomness is drawn from.

use glam::Vec2;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::chain::Segment;
use super::creature::Creature;
use super::rect::Rect;
use crate::leaderboard::{Leaderboard, Standing};
use crate::tuning::{Tuning, TuningError};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Player eliminated; only a reset leaves this phase
    GameOver,
}

/// A free-floating cube waiting to be absorbed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LooseCube {
    pub id: u32,
    pub value: u32,
    pub pos: Vec2,
}

/// Why the player's round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EliminationCause {
    /// Head hitbox left the arena
    OutOfBounds,
    /// Player head ran into an AI segment worth more than it
    RammedLargerSegment { ai_id: u32 },
    /// An AI head ran into a player segment worth no more than it
    CaughtBy { ai_id: u32 },
}

/// Things that happened during the last tick, for effects and sounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CubeSpawned { id: u32, value: u32, pos: Vec2 },
    CubeAbsorbed {
        id: u32,
        value: u32,
        /// Equal value: the head doubled instead of gaining a tail
        grew_head: bool,
        merges: usize,
    },
    AiShattered { ai_id: u32, cubes: usize },
    PlayerEliminated { cause: EliminationCause, score: u32 },
}

/// Complete arena state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Shared random source for spawns and AI decisions
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    /// Playable rectangle
    pub bounds: Rect,
    pub phase: GamePhase,
    pub player: Creature,
    /// Live AI snakes (sorted by id for determinism)
    pub ais: Vec<Creature>,
    /// Loose cubes (sorted by id for determinism)
    pub cubes: Vec<LooseCube>,
    /// Seconds until the next timed spawn
    pub spawn_timer: f32,
    /// Simulation tick counter for the current round
    pub time_ticks: u64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh round with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Fresh round with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let bounds = tuning.arena_bounds();
        let player = Creature::player(0, tuning.start_value, bounds.center(), &tuning);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bounds,
            phase: GamePhase::Running,
            player,
            ais: Vec::new(),
            cubes: Vec::new(),
            spawn_timer: tuning.initial_spawn_delay,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
            tuning,
        };
        state.reset();
        state
    }

    /// Start a new round: player at the arena center, a full set of AIs at
    /// random spots, no loose cubes
    pub fn reset(&mut self) {
        let start = self.tuning.start_value;

        let id = self.next_entity_id();
        self.player = Creature::player(id, start, self.bounds.center(), &self.tuning);

        self.ais.clear();
        for _ in 0..self.tuning.ai_count {
            let id = self.next_entity_id();
            let pos = self.bounds.random_point(&mut self.rng);
            self.ais.push(Creature::ai(id, start, pos, &self.tuning));
        }

        self.cubes.clear();
        self.spawn_timer = self.tuning.initial_spawn_delay;
        self.time_ticks = 0;
        self.events.clear();
        self.phase = GamePhase::Running;

        log::info!(
            "Round reset (seed {}): {} AI snakes",
            self.seed,
            self.ais.len()
        );
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// AI by position in the live list
    pub fn ai(&self, index: usize) -> Option<&Creature> {
        self.ais.get(index)
    }

    /// AI by entity id
    pub fn ai_by_id(&self, id: u32) -> Option<&Creature> {
        self.ais.iter().find(|ai| ai.id == id)
    }

    /// Drop a random cube somewhere in the arena
    ///
    /// Returns the new cube's id, or `None` when the loose-cube cap is hit.
    pub fn spawn_cube(&mut self) -> Option<u32> {
        if self.cubes.len() >= self.tuning.max_loose_cubes {
            log::warn!(
                "Loose cube cap ({}) reached, skipping spawn",
                self.tuning.max_loose_cubes
            );
            return None;
        }

        let value = *self.tuning.spawn_values.choose(&mut self.rng)?;
        let pos = self.bounds.random_point(&mut self.rng);
        let id = self.next_entity_id();
        self.cubes.push(LooseCube { id, value, pos });
        self.events.push(GameEvent::CubeSpawned { id, value, pos });
        log::debug!("Spawned cube {} ({}) at {:?}", id, value, pos);
        Some(id)
    }

    /// Remove an AI and scatter its body as loose cubes, one per segment,
    /// at each segment's last position
    ///
    /// Shattered cubes are not subject to the spawn cap. Returns how many
    /// cubes were produced, or `None` if no AI has that id.
    pub fn shatter_ai(&mut self, ai_id: u32) -> Option<usize> {
        let idx = self.ais.iter().position(|ai| ai.id == ai_id)?;
        let ai = self.ais.remove(idx);

        let count = ai.segments().len();
        for seg in ai.segments() {
            let id = self.next_entity_id();
            self.cubes.push(LooseCube {
                id,
                value: seg.value,
                pos: seg.pos,
            });
        }

        self.events.push(GameEvent::AiShattered {
            ai_id,
            cubes: count,
        });
        log::debug!(
            "AI {} shattered into {} cubes, {} AIs left",
            ai_id,
            count,
            self.ais.len()
        );
        Some(count)
    }

    /// End the round
    pub fn eliminate_player(&mut self, cause: EliminationCause) {
        let score = self.player.score();
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::PlayerEliminated { cause, score });
        log::info!(
            "Game over after {} ticks: {:?}, score {}",
            self.time_ticks,
            cause,
            score
        );
    }

    /// Ensure entity lists are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.ais.sort_by_key(|ai| ai.id);
        self.cubes.sort_by_key(|c| c.id);
    }

    pub fn leaderboard(&self) -> Leaderboard {
        Leaderboard::from_state(self)
    }

    /// Read-only view of everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            bounds: self.bounds,
            cube_size: self.tuning.cube_size,
            player: SnakeView::from(&self.player),
            ais: self.ais.iter().map(SnakeView::from).collect(),
            cubes: self.cubes.clone(),
            leaderboard: self.leaderboard().entries,
        }
    }
}

/// Render view of one snake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeView {
    pub id: u32,
    pub score: u32,
    pub head: Vec2,
    pub segments: Vec<Segment>,
}

impl From<&Creature> for SnakeView {
    fn from(creature: &Creature) -> Self {
        Self {
            id: creature.id,
            score: creature.score(),
            head: creature.head().pos,
            segments: creature.segments().to_vec(),
        }
    }
}

/// One frame's worth of render data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub bounds: Rect,
    pub cube_size: f32,
    pub player: SnakeView,
    pub ais: Vec<SnakeView>,
    pub cubes: Vec<LooseCube>,
    pub leaderboard: Vec<Standing>,
}
