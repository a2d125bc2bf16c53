//! Snakes: a chain plus a steering policy
//!
//! Player and AI snakes share one motion update. What differs is who picks
//! the target: the player's comes from input, an AI's from its wander timer.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::chain::{Chain, Segment};
use super::rect::Rect;
use super::state::LooseCube;
use crate::tuning::Tuning;

/// Who chooses where a snake goes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Steering {
    /// Target set from outside (pointer input)
    Manual,
    /// Periodically retargets to a loose cube or a random arena point, and
    /// is clamped inside the arena
    Wander { retarget_in: f32 },
}

impl Steering {
    pub fn is_ai(&self) -> bool {
        matches!(self, Steering::Wander { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub id: u32,
    chain: Chain,
    pub target: Vec2,
    pub boost: bool,
    pub base_speed: f32,
    pub steering: Steering,
}

impl Creature {
    /// Input-driven snake
    pub fn player(id: u32, value: u32, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            chain: Chain::new(value, pos),
            target: pos,
            boost: false,
            base_speed: tuning.snake_speed,
            steering: Steering::Manual,
        }
    }

    /// Wandering snake; picks its first target on its first update
    pub fn ai(id: u32, value: u32, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            steering: Steering::Wander { retarget_in: 0.0 },
            ..Self::player(id, value, pos, tuning)
        }
    }

    /// Snake with an existing body, aimed at its own head
    pub fn from_chain(id: u32, chain: Chain, steering: Steering, tuning: &Tuning) -> Self {
        Self {
            id,
            target: chain.head().pos,
            chain,
            boost: false,
            base_speed: tuning.snake_speed,
            steering,
        }
    }

    #[inline]
    pub fn head(&self) -> &Segment {
        self.chain.head()
    }

    #[inline]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        self.chain.segments()
    }

    /// Score is the head value
    #[inline]
    pub fn score(&self) -> u32 {
        self.chain.head().value
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Grow by a cube of `value` at the tail. Returns merges performed.
    pub fn absorb(&mut self, value: u32) -> usize {
        self.chain.append(value)
    }

    /// Double the head in place. Returns merges performed.
    pub fn grow_head(&mut self) -> usize {
        self.chain.double_head()
    }

    /// Current speed, boost included
    pub fn speed(&self, tuning: &Tuning) -> f32 {
        if self.boost {
            self.base_speed * tuning.boost_multiplier
        } else {
            self.base_speed
        }
    }

    /// Shared motion: steer the head, then drag the body along
    pub fn advance(&mut self, dt: f32, tuning: &Tuning) {
        let speed = self.speed(tuning);
        self.chain.advance_head(self.target, speed, dt);
        self.chain.follow(tuning.segment_distance);
    }

    /// Full per-tick update: let the steering policy pick a target, move,
    /// then apply the policy's bounds rule.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        cubes: &[LooseCube],
        bounds: &Rect,
        tuning: &Tuning,
        rng: &mut R,
    ) {
        if let Steering::Wander { retarget_in } = &mut self.steering {
            *retarget_in -= dt;
            if *retarget_in <= 0.0 {
                let target = if !cubes.is_empty() && rng.random_bool(tuning.ai_cube_bias) {
                    cubes.choose(rng).map(|c| c.pos)
                } else {
                    None
                };
                self.target = target.unwrap_or_else(|| bounds.random_point(rng));
                *retarget_in = rng.random_range(tuning.ai_retarget_min..tuning.ai_retarget_max);
            }
        }

        self.advance(dt, tuning);

        if self.steering.is_ai() {
            let head = self.chain.head_mut();
            head.pos = bounds.clamp_point(head.pos);
        }
    }
}
