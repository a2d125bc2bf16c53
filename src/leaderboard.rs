//! Live leaderboard
//!
//! Ranks every snake still in the round by score. Rebuilt from the game state
//! on demand; nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Entries shown on the in-game board
pub const BOARD_SIZE: usize = 3;

/// Who a standing belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contender {
    Player,
    Ai { id: u32 },
}

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub contender: Contender,
    /// Display label
    pub name: String,
    /// Head value
    pub score: u32,
}

/// Snakes sorted by score, highest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<Standing>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Rank the player and all live AIs. Ties keep the player ahead, then
    /// AIs in id order.
    pub fn from_state(state: &GameState) -> Self {
        let mut board = Self::new();
        board.add(Contender::Player, "You".to_string(), state.player.score());
        for ai in &state.ais {
            board.add(Contender::Ai { id: ai.id }, format!("AI {}", ai.id), ai.score());
        }
        board
    }

    /// Insert behind every entry with an equal or higher score.
    /// Returns the rank achieved (1-indexed).
    pub fn add(&mut self, contender: Contender, name: String, score: u32) -> usize {
        let entry = Standing {
            contender,
            name,
            score,
        };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        }
    }

    /// First `n` entries
    pub fn top(&self, n: usize) -> &[Standing] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// The player's rank (1-indexed)
    pub fn player_rank(&self) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.contender == Contender::Player)
            .map(|i| i + 1)
    }

    pub fn leader(&self) -> Option<&Standing> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_descending() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add(Contender::Ai { id: 1 }, "AI 1".into(), 4), 1);
        assert_eq!(board.add(Contender::Ai { id: 2 }, "AI 2".into(), 16), 1);
        assert_eq!(board.add(Contender::Player, "You".into(), 8), 2);

        let scores: Vec<_> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![16, 8, 4]);
        assert_eq!(board.player_rank(), Some(2));
        assert_eq!(board.leader().map(|e| e.score), Some(16));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut board = Leaderboard::new();
        board.add(Contender::Player, "You".into(), 2);
        assert_eq!(board.add(Contender::Ai { id: 5 }, "AI 5".into(), 2), 2);
        assert_eq!(board.player_rank(), Some(1));
    }

    #[test]
    fn test_top_truncates() {
        let mut board = Leaderboard::new();
        assert!(board.top(BOARD_SIZE).is_empty());
        for id in 0..5 {
            board.add(Contender::Ai { id }, format!("AI {id}"), 2u32 << id);
        }
        assert_eq!(board.top(BOARD_SIZE).len(), 3);
        assert_eq!(board.top(10).len(), 5);
        assert_eq!(board.top(BOARD_SIZE)[0].score, 32);
    }

    #[test]
    fn test_from_fresh_state() {
        let state = GameState::new(1);
        let board = state.leaderboard();
        assert_eq!(board.entries.len(), 4);
        assert!(board.entries.iter().all(|e| e.score == 2));
        assert_eq!(board.player_rank(), Some(1));
        assert_eq!(board.entries[0].name, "You");
    }
}
