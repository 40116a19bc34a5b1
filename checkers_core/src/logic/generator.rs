use crate::engine::Move;
use crate::logic::board::{Board, BoardCoordinate, Color};

const COLUMN_STEPS: [isize; 2] = [-1, 1];

#[derive(Debug, Default, Clone, Copy)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub const fn new() -> Self {
        Self
    }

    /// Destinations for the piece on `from`. A piece that can jump is
    /// restricted to its jumps. Squares that do not hold a piece of `turn`
    /// have no destinations.
    pub fn legal_destinations(
        &self,
        board: &Board,
        turn: Color,
        from: BoardCoordinate,
    ) -> Vec<BoardCoordinate> {
        let Some(piece) = board.get_piece(from) else {
            return Vec::new();
        };
        if piece.color != turn {
            return Vec::new();
        }

        let mut steps = Vec::with_capacity(4);
        let mut captures = Vec::with_capacity(4);

        for &dr in piece.row_directions() {
            for dc in COLUMN_STEPS {
                let Some(next) = from.offset(dr, dc) else {
                    continue;
                };
                match board.get_piece(next) {
                    None => steps.push(next),
                    Some(victim) if victim.color != piece.color => {
                        if let Some(landing) = next.offset(dr, dc) {
                            if board.is_empty_at(landing) {
                                captures.push(landing);
                            }
                        }
                    }
                    Some(_) => {}
                }
            }
        }

        if captures.is_empty() {
            steps
        } else {
            captures
        }
    }

    pub fn can_capture_from(&self, board: &Board, turn: Color, from: BoardCoordinate) -> bool {
        self.legal_destinations(board, turn, from)
            .iter()
            .any(|to| from.row.abs_diff(to.row) == 2)
    }

    /// Pieces of `turn` holding at least one jump, in row-major order.
    pub fn pieces_that_can_capture(&self, board: &Board, turn: Color) -> Vec<BoardCoordinate> {
        board
            .pieces_of(turn)
            .map(|(coord, _)| coord)
            .filter(|&coord| self.can_capture_from(board, turn, coord))
            .collect()
    }

    /// All legal moves for `turn`. When any jump exists on the board only
    /// jumps are returned.
    pub fn generate_moves(&self, board: &Board, turn: Color) -> Vec<Move> {
        let mut captures = Vec::new();
        let mut quiet = Vec::with_capacity(16);

        for (from, _) in board.pieces_of(turn) {
            for to in self.legal_destinations(board, turn, from) {
                let mv = Move::new(from, to);
                if mv.is_capture() {
                    captures.push(mv);
                } else {
                    quiet.push(mv);
                }
            }
        }

        if captures.is_empty() {
            quiet
        } else {
            captures
        }
    }

    pub fn has_legal_moves(&self, board: &Board, turn: Color) -> bool {
        board
            .pieces_of(turn)
            .any(|(from, _)| !self.legal_destinations(board, turn, from).is_empty())
    }

    /// Board after `mv`: the piece moves, a man reaching its promotion row
    /// becomes a king, and a jumped piece is removed.
    pub fn apply_move(&self, board: &Board, mv: Move) -> Board {
        let mut next = board.clone();
        let Some(piece) = next.get_piece(mv.from) else {
            debug_assert!(false, "apply_move from empty square {}", mv.from);
            return next;
        };

        let moved = if mv.to.row == piece.color.promotion_row() {
            piece.promoted()
        } else {
            piece
        };

        if let Some(mid) = mv.captured_square() {
            next.set_piece(mid, None);
        }
        next.set_piece(mv.from, None);
        next.add_piece(mv.to, moved);
        next
    }
}
