use crate::engine::Move;
use crate::logic::board::{Board, BoardCoordinate, Color, PieceCounts};
use crate::logic::generator::MoveGenerator;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, OnceCell};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one `BoardState` instance. Two states with equal boards built
/// separately have different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A position in the game tree. The board and side to move never change
/// after construction; the children are generated once on first use and the
/// score is written by the search.
#[derive(Debug)]
pub struct BoardState {
    id: NodeId,
    board: Board,
    turn: Color,
    last_move: Option<Move>,
    counts: PieceCounts,
    children: OnceCell<Vec<BoardState>>,
    score: Cell<i32>,
}

impl BoardState {
    /// Starting position with light to move.
    #[must_use]
    pub fn initial() -> Self {
        Self::new(Board::new(), Color::Light)
    }

    #[must_use]
    pub fn new(board: Board, turn: Color) -> Self {
        Self::build(board, turn, None)
    }

    fn build(board: Board, turn: Color, last_move: Option<Move>) -> Self {
        let counts = board.piece_counts();
        Self {
            id: NodeId::next(),
            board,
            turn,
            last_move,
            counts,
            children: OnceCell::new(),
            score: Cell::new(0),
        }
    }

    pub const fn id(&self) -> NodeId {
        self.id
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    pub const fn turn(&self) -> Color {
        self.turn
    }

    /// The move that produced this state from its parent.
    pub const fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub const fn piece_counts(&self) -> PieceCounts {
        self.counts
    }

    pub fn score(&self) -> i32 {
        self.score.get()
    }

    pub fn set_score(&self, score: i32) {
        self.score.set(score);
    }

    /// Legal successor states, generated on first call and cached.
    pub fn children(&self) -> &[Self] {
        self.children.get_or_init(|| {
            let generator = MoveGenerator::new();
            generator
                .generate_moves(&self.board, self.turn)
                .into_iter()
                .map(|mv| {
                    let board = generator.apply_move(&self.board, mv);
                    Self::build(board, self.turn.opposite(), Some(mv))
                })
                .collect()
        })
    }

    pub fn children_generated(&self) -> bool {
        self.children.get().is_some()
    }

    /// True when the children are already known and there are none. Does not
    /// generate them.
    pub fn is_blocked(&self) -> bool {
        self.children.get().is_some_and(Vec::is_empty)
    }

    /// Game over: a side has no pieces left, or the side to move cannot move.
    pub fn is_terminal(&self) -> bool {
        self.counts.any_side_empty() || self.children().is_empty()
    }

    /// The side that has won, if the game is over in this state.
    pub fn winner(&self) -> Option<Color> {
        if self.counts.dark == 0 {
            return Some(Color::Light);
        }
        if self.counts.light == 0 {
            return Some(Color::Dark);
        }
        if self.children().is_empty() {
            return Some(self.turn.opposite());
        }
        None
    }

    pub fn legal_destinations(&self, from: BoardCoordinate) -> Vec<BoardCoordinate> {
        MoveGenerator::new().legal_destinations(&self.board, self.turn, from)
    }

    pub fn pieces_that_can_capture(&self) -> Vec<BoardCoordinate> {
        MoveGenerator::new().pieces_that_can_capture(&self.board, self.turn)
    }

    pub fn child_index(&self, mv: Move) -> Option<usize> {
        self.children()
            .iter()
            .position(|child| child.last_move == Some(mv))
    }

    /// Index of the first child with the best score for the side to move:
    /// highest for dark, lowest for light.
    pub fn best_child_index(&self) -> Option<usize> {
        let maximize = self.turn == Color::Dark;
        let mut best: Option<(usize, i32)> = None;
        for (index, child) in self.children().iter().enumerate() {
            let score = child.score();
            let better = match best {
                None => true,
                Some((_, best_score)) if maximize => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if better {
                best = Some((index, score));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Moves out the child at `index`, keeping its explored subtree.
    pub fn into_child(mut self, index: usize) -> Option<Self> {
        self.take_child(index)
    }

    /// Like `into_child`, but leaves `self` in place with its children
    /// dropped. Returns `None` if the children were never generated.
    pub fn take_child(&mut self, index: usize) -> Option<Self> {
        let mut children = self.children.take()?;
        (index < children.len()).then(|| children.swap_remove(index))
    }
}
