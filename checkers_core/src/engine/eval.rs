use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{BoardCoordinate, Color, Piece, PieceKind};
use crate::logic::eval_constants::{CENTER_COLS, CENTER_ROWS, SCORE_INFINITY};
use crate::logic::state::BoardState;
use std::sync::Arc;

/// Centre-control evaluation: men are worth more in the middle of the board
/// and in the opponent's half, kings are worth a flat bonus.
pub struct SimpleEvaluator {
    config: Arc<EngineConfig>,
}

impl SimpleEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    fn piece_value(&self, coord: BoardCoordinate, piece: Piece) -> i32 {
        if piece.kind == PieceKind::King {
            return self.config.val_king;
        }
        if CENTER_ROWS.contains(&coord.row) && CENTER_COLS.contains(&coord.col) {
            return self.config.val_man_center;
        }
        let advanced = match piece.color {
            Color::Dark => coord.row > 3,
            Color::Light => coord.row < 4,
        };
        if advanced {
            self.config.val_man_advanced
        } else {
            self.config.val_man
        }
    }
}

/// Score of a decided position in which `side` is to move and has no legal
/// move.
pub const fn loss_score(side: Color) -> i32 {
    match side {
        Color::Dark => -SCORE_INFINITY,
        Color::Light => SCORE_INFINITY,
    }
}

impl Evaluator for SimpleEvaluator {
    fn evaluate(&self, state: &BoardState) -> i32 {
        let counts = state.piece_counts();
        if counts.light == 0 {
            return SCORE_INFINITY;
        }
        if counts.dark == 0 {
            return -SCORE_INFINITY;
        }

        let mut dark_score: i32 = 0;
        let mut light_score: i32 = 0;
        for (coord, piece) in state.board().pieces() {
            let value = self.piece_value(coord, piece);
            match piece.color {
                Color::Dark => dark_score = dark_score.saturating_add(value),
                Color::Light => light_score = light_score.saturating_add(value),
            }
        }
        dark_score
            .saturating_sub(light_score)
            .clamp(-SCORE_INFINITY, SCORE_INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::Board;

    fn at(row: usize, col: usize) -> BoardCoordinate {
        BoardCoordinate::new(row, col).unwrap()
    }

    fn evaluator() -> SimpleEvaluator {
        SimpleEvaluator::new(Arc::new(EngineConfig::default()))
    }

    #[test]
    fn test_start_position_is_balanced() {
        let state = BoardState::initial();
        assert_eq!(evaluator().evaluate(&state), 0);
    }

    #[test]
    fn test_piece_bands() {
        let eval = evaluator();
        let dark = Piece::man(Color::Dark);
        let light = Piece::man(Color::Light);
        assert_eq!(eval.piece_value(at(3, 2), dark), 50);
        assert_eq!(eval.piece_value(at(4, 5), light), 50);
        assert_eq!(eval.piece_value(at(5, 0), dark), 45);
        assert_eq!(eval.piece_value(at(1, 0), dark), 40);
        assert_eq!(eval.piece_value(at(2, 7), light), 45);
        assert_eq!(eval.piece_value(at(6, 1), light), 40);
        assert_eq!(eval.piece_value(at(3, 0), dark), 40);
        assert_eq!(eval.piece_value(at(0, 1), Piece::king(Color::Light)), 60);
        assert_eq!(eval.piece_value(at(3, 4), Piece::king(Color::Dark)), 60);
    }

    #[test]
    fn test_no_dark_pieces_favours_light() {
        let mut board = Board::empty();
        board.add_piece(at(5, 0), Piece::man(Color::Light));
        board.add_piece(at(0, 1), Piece::king(Color::Light));
        let state = BoardState::new(board, Color::Dark);
        assert_eq!(evaluator().evaluate(&state), -SCORE_INFINITY);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_no_light_pieces_favours_dark() {
        let mut board = Board::empty();
        board.add_piece(at(2, 1), Piece::man(Color::Dark));
        let state = BoardState::new(board, Color::Light);
        assert_eq!(evaluator().evaluate(&state), SCORE_INFINITY);
    }

    #[test]
    fn test_blocked_side_scored_by_material_alone() {
        let mut board = Board::empty();
        board.add_piece(at(1, 0), Piece::man(Color::Light));
        board.add_piece(at(0, 1), Piece::man(Color::Dark));
        let state = BoardState::new(board, Color::Light);
        assert_eq!(evaluator().evaluate(&state), 40 - 45);
        // Knowing the children are empty does not change the leaf value.
        assert!(state.children().is_empty());
        assert_eq!(evaluator().evaluate(&state), 40 - 45);
        assert_eq!(loss_score(state.turn()), SCORE_INFINITY);
    }

    #[test]
    fn test_huge_piece_values_saturate() {
        let config = EngineConfig {
            val_king: i32::MAX,
            ..Default::default()
        };
        let eval = SimpleEvaluator::new(Arc::new(config));

        let mut board = Board::empty();
        board.add_piece(at(0, 1), Piece::king(Color::Dark));
        board.add_piece(at(0, 3), Piece::king(Color::Dark));
        board.add_piece(at(7, 0), Piece::king(Color::Light));
        let state = BoardState::new(board, Color::Light);
        assert_eq!(eval.evaluate(&state), 0);

        let mut board = Board::empty();
        board.add_piece(at(0, 1), Piece::man(Color::Dark));
        board.add_piece(at(7, 0), Piece::king(Color::Light));
        board.add_piece(at(7, 2), Piece::king(Color::Light));
        let state = BoardState::new(board, Color::Dark);
        assert_eq!(eval.evaluate(&state), 40 - i32::MAX);
    }

    #[test]
    fn test_config_values_are_used() {
        let config = EngineConfig {
            val_king: 100,
            ..Default::default()
        };
        let eval = SimpleEvaluator::new(Arc::new(config));
        let mut board = Board::empty();
        board.add_piece(at(7, 0), Piece::king(Color::Dark));
        board.add_piece(at(6, 1), Piece::man(Color::Light));
        let state = BoardState::new(board, Color::Light);
        assert_eq!(eval.evaluate(&state), 100 - 40);
    }
}
