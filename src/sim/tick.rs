//! Fixed timestep simulation tick
//!
//! Core game loop that advances the arena deterministically.

use glam::Vec2;

use super::collision::{Clash, clash, head_wins, hitbox, overlapping_cubes};
use super::rect::Rect;
use super::state::{EliminationCause, GameEvent, GamePhase, GameState};
use crate::consts::SIM_DT;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position the player steers toward (`None` keeps the last one)
    pub target: Option<Vec2>,
    /// Speed boost held
    pub boost: bool,
    /// Start a new round once the current one is over
    pub restart: bool,
    /// Demo mode - the player snake steers itself
    pub autopilot: bool,
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.reset();
        }
        return;
    }

    state.time_ticks += 1;

    // Timed spawn
    state.spawn_timer -= dt;
    if state.spawn_timer <= 0.0 {
        state.spawn_cube();
        state.spawn_timer = state.tuning.spawn_interval;
    }

    // Player
    let target = if input.autopilot {
        Some(autopilot_target(state))
    } else {
        input.target
    };
    if let Some(target) = target {
        state.player.set_target(target);
    }
    state.player.boost = input.boost;
    state.player.update(
        dt,
        &state.cubes,
        &state.bounds,
        &state.tuning,
        &mut state.rng,
    );

    // AIs
    for ai in &mut state.ais {
        ai.update(
            dt,
            &state.cubes,
            &state.bounds,
            &state.tuning,
            &mut state.rng,
        );
    }

    resolve_collisions(state);

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Apply this tick's contacts in a fixed order: loose cubes, arena bounds,
/// then each AI. At most one snake-vs-snake contact that ends the scan is
/// acted on per tick; the player's elimination stops everything.
fn resolve_collisions(state: &mut GameState) {
    let size = state.tuning.cube_size;
    let head_box = hitbox(state.player.head().pos, size);

    // Loose cubes, applied in list order against the live head value
    let hits = overlapping_cubes(&head_box, &state.cubes, size);
    for &idx in &hits {
        let cube = state.cubes[idx];
        let grew_head = cube.value == state.player.score();
        let merges = if grew_head {
            state.player.grow_head()
        } else {
            state.player.absorb(cube.value)
        };
        state.events.push(GameEvent::CubeAbsorbed {
            id: cube.id,
            value: cube.value,
            grew_head,
            merges,
        });
        log::debug!(
            "Player absorbed cube {} ({}), score now {}",
            cube.id,
            cube.value,
            state.player.score()
        );
    }
    for &idx in hits.iter().rev() {
        state.cubes.remove(idx);
    }

    // Arena bounds
    if !state.bounds.contains_rect(&head_box) {
        state.eliminate_player(EliminationCause::OutOfBounds);
        return;
    }

    // Snakes; iterate ids so shattering mid-scan is safe
    let ai_ids: Vec<u32> = state.ais.iter().map(|ai| ai.id).collect();
    for ai_id in ai_ids {
        let Some(ai) = state.ai_by_id(ai_id) else {
            continue;
        };

        match clash(&state.player, ai, size) {
            None => {}
            Some(Clash::PlayerRams { segment }) => {
                let segment_value = ai.segments()[segment].value;
                if head_wins(state.player.score(), segment_value) {
                    state.shatter_ai(ai_id);
                } else {
                    state.eliminate_player(EliminationCause::RammedLargerSegment { ai_id });
                }
                return;
            }
            Some(Clash::AiRams { segment }) => {
                let segment_value = state.player.segments()[segment].value;
                if head_wins(ai.score(), segment_value) {
                    state.eliminate_player(EliminationCause::CaughtBy { ai_id });
                    return;
                }
                state.shatter_ai(ai_id);
            }
        }
    }
}

/// Demo steering: head for the nearest loose cube, keeping the target far
/// enough from the walls that the head hitbox stays inside
fn autopilot_target(state: &GameState) -> Vec2 {
    let head = state.player.head().pos;
    // The head can overshoot its target by up to one step
    let step = state.player.speed(&state.tuning) * SIM_DT;
    let inset = Vec2::splat(state.tuning.cube_size / 2.0 + 2.0 * step);
    let safe = Rect {
        min: state.bounds.min + inset,
        max: state.bounds.max - inset,
    };
    if safe.min.cmpgt(safe.max).any() {
        return state.bounds.center();
    }

    state
        .cubes
        .iter()
        .min_by(|a, b| {
            head.distance_squared(a.pos)
                .partial_cmp(&head.distance_squared(b.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|cube| safe.clamp_point(cube.pos))
        .unwrap_or_else(|| state.bounds.center())
}
