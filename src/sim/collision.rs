//! Hitbox tests between heads, cubes and snake bodies
//!
//! Every cube and segment uses the same square hitbox centered on its
//! position. These functions only detect contact; deciding who wins lives in
//! the tick.

use glam::Vec2;

use super::chain::Segment;
use super::creature::Creature;
use super::rect::Rect;
use super::state::LooseCube;

/// Square hitbox of side `size` around `pos`
#[inline]
pub fn hitbox(pos: Vec2, size: f32) -> Rect {
    Rect::centered(pos, size)
}

/// Indices of every cube touching `head`, in list order
pub fn overlapping_cubes(head: &Rect, cubes: &[LooseCube], size: f32) -> Vec<usize> {
    cubes
        .iter()
        .enumerate()
        .filter(|(_, cube)| head.overlaps(&hitbox(cube.pos, size)))
        .map(|(i, _)| i)
        .collect()
}

/// First segment (head to tail) whose hitbox touches `probe`
pub fn first_segment_hit(probe: &Rect, segments: &[Segment], size: f32) -> Option<usize> {
    segments
        .iter()
        .position(|seg| probe.overlaps(&hitbox(seg.pos, size)))
}

/// Contact between the player and one AI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clash {
    /// Player head touched AI segment `segment`
    PlayerRams { segment: usize },
    /// AI head touched player segment `segment`
    AiRams { segment: usize },
}

/// Check player against one AI. The player's head is tested first; the AI's
/// head is only tested when the player's head touches nothing.
pub fn clash(player: &Creature, ai: &Creature, size: f32) -> Option<Clash> {
    let player_head = hitbox(player.head().pos, size);
    if let Some(segment) = first_segment_hit(&player_head, ai.segments(), size) {
        return Some(Clash::PlayerRams { segment });
    }

    let ai_head = hitbox(ai.head().pos, size);
    first_segment_hit(&ai_head, player.segments(), size).map(|segment| Clash::AiRams { segment })
}

/// A head beats a segment worth no more than itself
#[inline]
pub fn head_wins(head_value: u32, segment_value: u32) -> bool {
    head_value >= segment_value
}
