//! History heuristic table.
//!
//! Each time a frame of the ordered search finishes, the best child found
//! there is credited with `2^depth`, so results proven closer to the root
//! weigh more. The table only influences the order in which children are
//! visited, never the value of a position.

use crate::engine::config::HistoryKeying;
use crate::engine::Move;
use crate::logic::state::{BoardState, NodeId};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryKey {
    Node(NodeId),
    Move(Move),
}

impl HistoryKey {
    /// Key for `state` under `keying`. A root state has no move, so it falls
    /// back to its identity.
    pub fn of(state: &BoardState, keying: HistoryKeying) -> Self {
        match (keying, state.last_move()) {
            (HistoryKeying::Move, Some(mv)) => Self::Move(mv),
            _ => Self::Node(state.id()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistoryTable {
    scores: HashMap<HistoryKey, u64>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `2^depth` to the score of `key`.
    pub fn record(&mut self, key: HistoryKey, depth: u8) {
        let bonus = 1u64.checked_shl(u32::from(depth)).unwrap_or(u64::MAX);
        let entry = self.scores.entry(key).or_insert(0);
        *entry = entry.saturating_add(bonus);
    }

    pub fn score(&self, key: &HistoryKey) -> u64 {
        self.scores.get(key).copied().unwrap_or(0)
    }

    /// `states` sorted ascending by score. The sort is stable, so equal
    /// scores keep their generation order.
    pub fn order_by_score<'a>(
        &self,
        states: &'a [BoardState],
        keying: HistoryKeying,
    ) -> Vec<&'a BoardState> {
        let mut ordered: Vec<&BoardState> = states.iter().collect();
        ordered.sort_by_key(|state| self.score(&HistoryKey::of(state, keying)));
        ordered
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Board, BoardCoordinate, Color, Piece};

    fn at(row: usize, col: usize) -> BoardCoordinate {
        BoardCoordinate::new(row, col).unwrap()
    }

    #[test]
    fn test_record_accumulates_powers_of_two() {
        let mut table = HistoryTable::new();
        let key = HistoryKey::Node(BoardState::initial().id());
        assert_eq!(table.score(&key), 0);

        table.record(key, 3);
        assert_eq!(table.score(&key), 8);
        table.record(key, 3);
        assert_eq!(table.score(&key), 16);
        table.record(key, 0);
        assert_eq!(table.score(&key), 17);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_deeper_records_outweigh_shallower() {
        let mut shallow = HistoryTable::new();
        let mut deep = HistoryTable::new();
        let key = HistoryKey::Move(Move::new(at(5, 0), at(4, 1)));
        for d1 in 0..10u8 {
            for d2 in (d1 + 1)..=10 {
                shallow.clear();
                deep.clear();
                shallow.record(key, d1);
                deep.record(key, d2);
                assert!(deep.score(&key) > shallow.score(&key));
            }
        }
    }

    #[test]
    fn test_record_saturates() {
        let mut table = HistoryTable::new();
        let key = HistoryKey::Move(Move::new(at(2, 1), at(3, 0)));
        table.record(key, 63);
        table.record(key, 63);
        table.record(key, 200);
        assert_eq!(table.score(&key), u64::MAX);
    }

    #[test]
    fn test_order_by_score_is_ascending_and_stable() {
        let state = BoardState::initial();
        let children = state.children();
        let mut table = HistoryTable::new();
        table.record(HistoryKey::Node(children[0].id()), 4);
        table.record(HistoryKey::Node(children[3].id()), 1);

        let ordered: Vec<_> = table
            .order_by_score(children, HistoryKeying::Node)
            .iter()
            .map(|s| s.id())
            .collect();
        let expected = vec![
            children[1].id(),
            children[2].id(),
            children[4].id(),
            children[5].id(),
            children[6].id(),
            children[3].id(),
            children[0].id(),
        ];
        assert_eq!(ordered, expected);
    }

    #[test]
    fn test_move_keying_carries_across_trees() {
        let mut table = HistoryTable::new();
        let first = BoardState::initial();
        let second = BoardState::initial();
        let a = &first.children()[1];
        let b = &second.children()[1];
        assert_ne!(a.id(), b.id());

        table.record(HistoryKey::of(a, HistoryKeying::Move), 2);
        assert_eq!(table.score(&HistoryKey::of(b, HistoryKeying::Move)), 4);
        assert_eq!(table.score(&HistoryKey::of(b, HistoryKeying::Node)), 0);
    }

    #[test]
    fn test_root_key_falls_back_to_identity() {
        let mut board = Board::empty();
        board.add_piece(at(2, 1), Piece::man(Color::Dark));
        let root = BoardState::new(board, Color::Dark);
        assert_eq!(HistoryKey::of(&root, HistoryKeying::Move), HistoryKey::Node(root.id()));
    }
}
