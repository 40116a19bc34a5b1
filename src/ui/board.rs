use checkers_core::engine::Move;
use checkers_core::logic::board::{Board, BoardCoordinate, Color, Piece, BOARD_SIZE};
use std::fmt;

const RESET: &str = "\x1b[0m";
const LIGHT_PIECE: &str = "\x1b[1;31m";
const DARK_PIECE: &str = "\x1b[1;34m";
const FORCED: &str = "\x1b[1;43m";
const SELECTED: &str = "\x1b[7m";
const DESTINATION: &str = "\x1b[1;32m";
const LAST_MOVE: &str = "\x1b[46m";

const COLUMN_LABELS: &str = "A B C D E F G H";

/// Squares to draw attention to when the board is printed.
#[derive(Debug, Clone, Default)]
pub struct Highlights {
    pub selected: Option<BoardCoordinate>,
    pub destinations: Vec<BoardCoordinate>,
    pub forced: Vec<BoardCoordinate>,
    pub last_move: Option<Move>,
}

impl Highlights {
    fn style(&self, coord: BoardCoordinate) -> Option<&'static str> {
        if self.selected == Some(coord) {
            Some(SELECTED)
        } else if self.destinations.contains(&coord) {
            Some(DESTINATION)
        } else if self.forced.contains(&coord) {
            Some(FORCED)
        } else if self
            .last_move
            .is_some_and(|mv| mv.from == coord || mv.to == coord)
        {
            Some(LAST_MOVE)
        } else {
            None
        }
    }
}

/// Text rendering of a board with row digits down the side and column
/// letters across the top, optionally coloured with ANSI escapes.
pub struct BoardView<'a> {
    board: &'a Board,
    highlights: &'a Highlights,
    color: bool,
}

impl<'a> BoardView<'a> {
    pub const fn new(board: &'a Board, highlights: &'a Highlights, color: bool) -> Self {
        Self {
            board,
            highlights,
            color,
        }
    }

    fn cell(&self, coord: BoardCoordinate) -> char {
        match self.board.get_piece(coord) {
            Some(piece) => piece.symbol(),
            None if self.highlights.destinations.contains(&coord) => '*',
            None if Board::is_playable(coord) => '.',
            None => ' ',
        }
    }

    fn write_cell(&self, f: &mut fmt::Formatter<'_>, coord: BoardCoordinate) -> fmt::Result {
        let symbol = self.cell(coord);
        if !self.color {
            return write!(f, "{symbol}");
        }

        let piece_style = self.board.get_piece(coord).map(|piece: Piece| match piece.color {
            Color::Light => LIGHT_PIECE,
            Color::Dark => DARK_PIECE,
        });
        match (self.highlights.style(coord), piece_style) {
            (Some(highlight), Some(piece)) => write!(f, "{highlight}{piece}{symbol}{RESET}"),
            (Some(style), None) | (None, Some(style)) => write!(f, "{style}{symbol}{RESET}"),
            (None, None) => write!(f, "{symbol}"),
        }
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   {COLUMN_LABELS}")?;
        for row in 0..BOARD_SIZE {
            write!(f, " {row}")?;
            for col in 0..BOARD_SIZE {
                let Some(coord) = BoardCoordinate::new(row, col) else {
                    continue;
                };
                write!(f, " ")?;
                self.write_cell(f, coord)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
