//! Checkers engine core: board model, move generation, evaluation and
//! alpha-beta search with optional history-heuristic move ordering.

pub mod engine;
pub mod logic;
