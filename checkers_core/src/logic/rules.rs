use crate::engine::Move;
use crate::logic::board::BoardCoordinate;
use crate::logic::state::BoardState;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("coordinates are outside the board")]
    OutOfBounds,
    #[error("there is no piece on that square")]
    NoPieceAtSource,
    #[error("that piece belongs to the other side")]
    NotYourTurn,
    #[error("a capture is available and must be played")]
    CaptureRequired,
    #[error("that piece has no legal moves")]
    PieceCannotMove,
    #[error("the piece cannot move to that square")]
    IllegalDestination,
    #[error("the game is already over")]
    GameOver,
}

impl TryFrom<(usize, usize)> for BoardCoordinate {
    type Error = MoveError;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(row, col).ok_or(MoveError::OutOfBounds)
    }
}

/// Checks that the side to move may pick up the piece on `from`, returning
/// its destinations. While any capture exists only capturing pieces qualify.
pub fn select_piece(
    state: &BoardState,
    from: BoardCoordinate,
) -> Result<Vec<BoardCoordinate>, MoveError> {
    let piece = state
        .board()
        .get_piece(from)
        .ok_or(MoveError::NoPieceAtSource)?;
    if piece.color != state.turn() {
        return Err(MoveError::NotYourTurn);
    }

    let capturers = state.pieces_that_can_capture();
    if !capturers.is_empty() && !capturers.contains(&from) {
        return Err(MoveError::CaptureRequired);
    }

    let destinations = state.legal_destinations(from);
    if destinations.is_empty() {
        return Err(MoveError::PieceCannotMove);
    }
    Ok(destinations)
}

/// Validates a full move against the legal children of `state`.
pub fn is_valid_move(
    state: &BoardState,
    from: BoardCoordinate,
    to: BoardCoordinate,
) -> Result<Move, MoveError> {
    select_piece(state, from)?;

    let mv = Move::new(from, to);
    if state.child_index(mv).is_some() {
        Ok(mv)
    } else {
        Err(MoveError::IllegalDestination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Board, Color, Piece};

    fn at(row: usize, col: usize) -> BoardCoordinate {
        BoardCoordinate::new(row, col).unwrap()
    }

    #[test]
    fn test_try_from_out_of_bounds() {
        assert_eq!(BoardCoordinate::try_from((8, 1)), Err(MoveError::OutOfBounds));
        assert_eq!(BoardCoordinate::try_from((5, 0)), Ok(at(5, 0)));
    }

    #[test]
    fn test_select_piece_errors() {
        let state = BoardState::initial();
        assert_eq!(select_piece(&state, at(4, 1)), Err(MoveError::NoPieceAtSource));
        assert_eq!(select_piece(&state, at(2, 1)), Err(MoveError::NotYourTurn));
        assert_eq!(select_piece(&state, at(6, 1)), Err(MoveError::PieceCannotMove));
        assert_eq!(select_piece(&state, at(5, 0)), Ok(vec![at(4, 1)]));
    }

    #[test]
    fn test_capture_is_forced_on_selection_and_move() {
        let mut board = Board::empty();
        board.add_piece(at(5, 2), Piece::man(Color::Light));
        board.add_piece(at(4, 3), Piece::man(Color::Dark));
        board.add_piece(at(6, 7), Piece::man(Color::Light));
        let state = BoardState::new(board, Color::Light);

        assert_eq!(select_piece(&state, at(6, 7)), Err(MoveError::CaptureRequired));
        assert_eq!(
            is_valid_move(&state, at(5, 2), at(4, 1)),
            Err(MoveError::IllegalDestination)
        );
        assert_eq!(is_valid_move(&state, at(5, 2), at(3, 4)), Ok(Move::new(at(5, 2), at(3, 4))));
    }

    #[test]
    fn test_illegal_destination() {
        let state = BoardState::initial();
        assert_eq!(
            is_valid_move(&state, at(5, 2), at(3, 2)),
            Err(MoveError::IllegalDestination)
        );
        assert!(is_valid_move(&state, at(5, 2), at(4, 3)).is_ok());
    }
}
