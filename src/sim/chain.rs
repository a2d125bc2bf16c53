//! Segment chains: the body of a snake
//!
//! A chain is an ordered head-to-tail list of value-tagged cubes. The head
//! steers; every other segment trails its leader at a fixed distance. Equal
//! neighbours merge 2048-style until no adjacent pair shares a value.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::direction_to;

/// One body cube
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Power of two
    pub value: u32,
    pub pos: Vec2,
}

impl Segment {
    pub fn new(value: u32, pos: Vec2) -> Self {
        Self { value, pos }
    }
}

/// Head-to-tail sequence of segments (index 0 is the head)
///
/// Never empty: every constructor produces at least one segment and merging
/// only ever removes a non-head segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    segments: Vec<Segment>,
}

impl Chain {
    /// Single-segment chain
    pub fn new(value: u32, pos: Vec2) -> Self {
        Self {
            segments: vec![Segment::new(value, pos)],
        }
    }

    /// Build a chain from explicit segments (head first)
    ///
    /// # Panics
    /// If `segments` is empty.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        assert!(!segments.is_empty(), "a chain needs at least one segment");
        Self { segments }
    }

    #[inline]
    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    #[inline]
    pub fn head_mut(&mut self) -> &mut Segment {
        &mut self.segments[0]
    }

    #[inline]
    pub fn tail(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Values from head to tail
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.segments.iter().map(|s| s.value)
    }

    /// Move the head toward `target` by `speed * dt`
    ///
    /// A head already sitting on its target has no heading and stays put.
    pub fn advance_head(&mut self, target: Vec2, speed: f32, dt: f32) {
        let head = &mut self.segments[0];
        head.pos += direction_to(head.pos, target) * speed * dt;
    }

    /// Pull each segment toward its leader until it is at most
    /// `fixed_distance` away. Segments are never pushed.
    pub fn follow(&mut self, fixed_distance: f32) {
        for i in 1..self.segments.len() {
            let leader = self.segments[i - 1].pos;
            let seg = &mut self.segments[i];
            let dist = leader.distance(seg.pos);
            if dist > fixed_distance {
                seg.pos += direction_to(seg.pos, leader) * (dist - fixed_distance);
            }
        }
    }

    /// Merge equal neighbours until none remain, returning how many merges
    /// happened.
    ///
    /// Each pass scans tail to head and folds the first equal pair it finds
    /// into the segment nearer the head, then starts over.
    pub fn merge(&mut self) -> usize {
        let mut merges = 0;
        loop {
            let pair = (1..self.segments.len())
                .rev()
                .find(|&i| self.segments[i].value == self.segments[i - 1].value);
            let Some(i) = pair else {
                return merges;
            };
            self.segments[i - 1].value *= 2;
            self.segments.remove(i);
            merges += 1;
        }
    }

    /// Add a tail segment at the current tail position, then merge
    pub fn append(&mut self, value: u32) -> usize {
        assert!(
            !self.segments.is_empty(),
            "append on an empty chain: snake body invariant broken"
        );
        let tail_pos = self.tail().pos;
        self.segments.push(Segment::new(value, tail_pos));
        self.merge()
    }

    /// Double the head in place, then merge
    pub fn double_head(&mut self) -> usize {
        self.segments[0].value *= 2;
        self.merge()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chain_of(values: &[u32]) -> Chain {
        Chain::from_segments(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| Segment::new(v, Vec2::new(i as f32 * 10.0, 0.0)))
                .collect(),
        )
    }

    #[test]
    fn test_advance_head_moves_by_speed() {
        let mut chain = Chain::new(2, Vec2::ZERO);
        chain.advance_head(Vec2::new(100.0, 0.0), 200.0, 0.1);
        assert!((chain.head().pos.x - 20.0).abs() < 1e-5);
        assert!(chain.head().pos.y.abs() < 1e-5);
    }

    #[test]
    fn test_advance_head_at_target_stays_put() {
        let pos = Vec2::new(50.0, 60.0);
        let mut chain = Chain::new(2, pos);
        chain.advance_head(pos, 200.0, 1.0);
        assert_eq!(chain.head().pos, pos);
    }

    #[test]
    fn test_follow_pulls_to_fixed_distance() {
        let mut chain = Chain::from_segments(vec![
            Segment::new(8, Vec2::new(100.0, 0.0)),
            Segment::new(4, Vec2::ZERO),
        ]);
        chain.follow(40.0);
        assert!((chain.segments()[1].pos.x - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_follow_never_pushes() {
        let mut chain = Chain::from_segments(vec![
            Segment::new(8, Vec2::new(10.0, 0.0)),
            Segment::new(4, Vec2::ZERO),
        ]);
        chain.follow(40.0);
        assert_eq!(chain.segments()[1].pos, Vec2::ZERO);
    }

    #[test]
    fn test_merge_runs_to_fixed_point() {
        let mut chain = chain_of(&[2, 2, 2, 2]);
        let merges = chain.merge();
        assert_eq!(merges, 3);
        assert_eq!(chain.values().collect::<Vec<_>>(), vec![8]);

        // Already merged: no-op
        assert_eq!(chain.merge(), 0);
        assert_eq!(chain.values().collect::<Vec<_>>(), vec![8]);
    }

    #[test]
    fn test_merge_prefers_tail_pair() {
        // Tail pair (2,2) merges first, producing 4 that then folds forward
        let mut chain = chain_of(&[8, 4, 2, 2]);
        chain.merge();
        assert_eq!(chain.values().collect::<Vec<_>>(), vec![16]);

        let mut chain = chain_of(&[4, 4, 8, 2, 2]);
        chain.merge();
        assert_eq!(chain.values().collect::<Vec<_>>(), vec![16, 4]);
    }

    #[test]
    fn test_append_cascades() {
        let mut chain = chain_of(&[16, 8, 4, 2]);
        let merges = chain.append(2);
        assert_eq!(merges, 4);
        assert_eq!(chain.values().collect::<Vec<_>>(), vec![32]);
    }

    #[test]
    fn test_append_places_at_tail() {
        let mut chain = chain_of(&[8, 4]);
        let tail_pos = chain.tail().pos;
        chain.append(2);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.tail().pos, tail_pos);
        assert_eq!(chain.tail().value, 2);
    }

    #[test]
    fn test_double_head_merges_with_neighbour() {
        let mut chain = chain_of(&[4, 8, 2]);
        chain.double_head();
        assert_eq!(chain.values().collect::<Vec<_>>(), vec![16, 2]);
    }

    #[test]
    #[should_panic(expected = "at least one segment")]
    fn test_empty_chain_is_fatal() {
        Chain::from_segments(Vec::new());
    }

    fn arb_positions() -> impl Strategy<Value = Vec<(f32, f32)>> {
        prop::collection::vec((-1000.0f32..1000.0, -1000.0f32..1000.0), 1..20)
    }

    proptest! {
        #[test]
        fn prop_follow_bound(points in arb_positions(), distance in 1.0f32..100.0) {
            let mut chain = Chain::from_segments(
                points.iter().map(|&(x, y)| Segment::new(2, Vec2::new(x, y))).collect(),
            );
            let before = chain.clone();
            chain.follow(distance);

            for i in 1..chain.len() {
                let leader = chain.segments()[i - 1].pos;
                let now = chain.segments()[i].pos.distance(leader);
                let was = before.segments()[i].pos.distance(leader);
                prop_assert!(now <= distance + 1e-2);
                prop_assert!(now <= was + 1e-2);
            }
        }

        #[test]
        fn prop_merge_fixed_point(exps in prop::collection::vec(1u32..6, 1..24)) {
            let values: Vec<u32> = exps.iter().map(|&e| 1u32 << e).collect();
            let total: u32 = values.iter().sum();
            let mut chain = chain_of(&values);
            chain.merge();

            let merged: Vec<u32> = chain.values().collect();
            prop_assert!(merged.windows(2).all(|w| w[0] != w[1]));
            prop_assert_eq!(merged.iter().sum::<u32>(), total);
            prop_assert_eq!(chain.merge(), 0);
            prop_assert_eq!(chain.values().collect::<Vec<_>>(), merged);
        }
    }
}
