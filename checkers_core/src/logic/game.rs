use crate::engine::{Move, SearchStats, Searcher};
use crate::logic::board::{Board, BoardCoordinate, Color, Piece};
use crate::logic::rules::{is_valid_move, select_piece, MoveError};
use crate::logic::state::BoardState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won(Color), // Winner
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub color: Color,
    pub captured: Option<Piece>,
    pub promoted: bool,
    pub note: Option<String>, // Search stats for engine moves
}

/// A game in progress. Owns the current node of the search tree, so a
/// subtree explored by the engine is kept when its move is played.
#[derive(Debug)]
pub struct Game {
    state: BoardState,
    status: GameStatus,
    history: Vec<MoveRecord>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    #[must_use]
    pub fn new() -> Self {
        Self::from_state(BoardState::initial())
    }

    /// Game continuing from an arbitrary position.
    #[must_use]
    pub fn from_state(state: BoardState) -> Self {
        let mut game = Self {
            state,
            status: GameStatus::Playing,
            history: Vec::new(),
        };
        game.update_status();
        game
    }

    pub const fn state(&self) -> &BoardState {
        &self.state
    }

    pub const fn board(&self) -> &Board {
        self.state.board()
    }

    pub const fn turn(&self) -> Color {
        self.state.turn()
    }

    pub const fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|record| record.mv)
    }

    /// Destinations of the piece on `from` if the side to move may pick it up.
    pub fn select(&self, from: BoardCoordinate) -> Result<Vec<BoardCoordinate>, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        select_piece(&self.state, from)
    }

    /// Pieces the side to move must choose from while a capture is pending.
    pub fn forced_pieces(&self) -> Vec<BoardCoordinate> {
        self.state.pieces_that_can_capture()
    }

    pub fn make_move(
        &mut self,
        from: BoardCoordinate,
        to: BoardCoordinate,
    ) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let mv = is_valid_move(&self.state, from, to)?;
        let index = self
            .state
            .child_index(mv)
            .ok_or(MoveError::IllegalDestination)?;
        self.advance(index, None)
            .map(|_| ())
            .ok_or(MoveError::IllegalDestination)
    }

    /// Searches the current position and plays the best move found for the
    /// side to move. Returns `None` once the game is over.
    pub fn play_engine_move(
        &mut self,
        engine: &mut dyn Searcher,
        depth: u8,
    ) -> Option<(Move, SearchStats)> {
        if self.is_over() {
            return None;
        }

        let stats = engine.search(&self.state, depth);
        let index = self.state.best_child_index()?;
        let note = format!(
            "depth {} nodes {} cutoffs {} {}ms",
            stats.depth, stats.nodes, stats.cutoffs, stats.time_ms
        );
        let mv = self.advance(index, Some(note))?;
        log::info!("{} plays {mv} ({} nodes)", self.turn().opposite(), stats.nodes);
        Some((mv, stats))
    }

    fn advance(&mut self, index: usize, note: Option<String>) -> Option<Move> {
        let color = self.state.turn();
        let mv = self.state.children().get(index)?.last_move()?;

        let before = self.state.board();
        let captured = mv.captured_square().and_then(|sq| before.get_piece(sq));
        let after = self.state.children().get(index)?.board();
        let promoted = before.get_piece(mv.from).is_some_and(|p| !p.is_king())
            && after.get_piece(mv.to).is_some_and(Piece::is_king);

        self.state = self.state.take_child(index)?;
        self.history.push(MoveRecord {
            mv,
            color,
            captured,
            promoted,
            note,
        });
        self.update_status();
        Some(mv)
    }

    fn update_status(&mut self) {
        if let Some(winner) = self.state.winner() {
            self.status = GameStatus::Won(winner);
            log::info!("game over after {} moves: {winner} wins", self.history.len());
        }
    }
}
