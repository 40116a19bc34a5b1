use crate::logic::board::BoardCoordinate;
use crate::logic::state::BoardState;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod eval;
pub mod history;
pub mod search;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: BoardCoordinate,
    pub to: BoardCoordinate,
}

impl Move {
    pub const fn new(from: BoardCoordinate, to: BoardCoordinate) -> Self {
        Self { from, to }
    }

    /// A jump covers two rows; a simple step covers one.
    pub const fn is_capture(&self) -> bool {
        self.from.row.abs_diff(self.to.row) == 2
    }

    /// Square of the jumped piece, for captures.
    pub fn captured_square(&self) -> Option<BoardCoordinate> {
        if !self.is_capture() {
            return None;
        }
        BoardCoordinate::new(
            (self.from.row + self.to.row) / 2,
            (self.from.col + self.to.col) / 2,
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{sep}{}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub cutoffs: u64,
    pub time_ms: u64,
}

pub trait Evaluator {
    /// Static score of `state`; positive favours dark, negative favours light.
    fn evaluate(&self, state: &BoardState) -> i32;
}

pub trait Searcher {
    /// Scores `state` and every state explored below it, down to `depth`
    /// plies. The caller picks the move with `BoardState::best_child_index`.
    fn search(&mut self, state: &BoardState, depth: u8) -> SearchStats;
}
