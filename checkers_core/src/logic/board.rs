use serde::{Deserialize, Serialize};
use std::fmt;

pub const BOARD_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// The row farthest from this colour's starting side; men promote there.
    pub const fn promotion_row(self) -> usize {
        match self {
            Self::Light => 0,
            Self::Dark => BOARD_SIZE - 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn man(color: Color) -> Self {
        Self {
            kind: PieceKind::Man,
            color,
        }
    }

    pub const fn king(color: Color) -> Self {
        Self {
            kind: PieceKind::King,
            color,
        }
    }

    pub fn is_king(self) -> bool {
        self.kind == PieceKind::King
    }

    #[must_use]
    pub const fn promoted(self) -> Self {
        Self::king(self.color)
    }

    /// Row steps this piece may take. Kings of both colours keep the
    /// single-step range of a man and look at row+1 before row-1.
    pub const fn row_directions(self) -> &'static [isize] {
        match (self.kind, self.color) {
            (PieceKind::King, _) => &[1, -1],
            (PieceKind::Man, Color::Dark) => &[1],
            (PieceKind::Man, Color::Light) => &[-1],
        }
    }

    /// Single character used by the text diagram: `x`/`X` light, `o`/`O` dark.
    pub const fn symbol(self) -> char {
        match (self.kind, self.color) {
            (PieceKind::Man, Color::Light) => 'x',
            (PieceKind::King, Color::Light) => 'X',
            (PieceKind::Man, Color::Dark) => 'o',
            (PieceKind::King, Color::Dark) => 'O',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'x' => Some(Self::man(Color::Light)),
            'X' => Some(Self::king(Color::Light)),
            'o' => Some(Self::man(Color::Dark)),
            'O' => Some(Self::king(Color::Dark)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardCoordinate {
    pub row: usize,
    pub col: usize,
}

impl BoardCoordinate {
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Coordinate `dr` rows and `dc` columns away, if it is still on the board.
    pub fn offset(self, dr: isize, dc: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Self::new(row, col)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Self { row, col }))
    }
}

impl fmt::Display for BoardCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = char::from(b'A' + self.col as u8);
        write!(f, "{}{letter}", self.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PieceCounts {
    pub light: usize,
    pub dark: usize,
}

impl PieceCounts {
    pub const fn of(self, color: Color) -> usize {
        match color {
            Color::Light => self.light,
            Color::Dark => self.dark,
        }
    }

    pub const fn any_side_empty(self) -> bool {
        self.light == 0 || self.dark == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub grid: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting position: dark men on rows 0-2, light men on rows 5-7.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        for coord in BoardCoordinate::all() {
            if !Self::is_playable(coord) {
                continue;
            }
            if coord.row < 3 {
                board.add_piece(coord, Piece::man(Color::Dark));
            } else if coord.row > 4 {
                board.add_piece(coord, Piece::man(Color::Light));
            }
        }
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            grid: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Dark squares of the board, the only ones pieces ever stand on.
    pub const fn is_playable(coord: BoardCoordinate) -> bool {
        coord.col % 2 == (coord.row + 1) % 2
    }

    #[must_use]
    pub const fn get_piece(&self, coord: BoardCoordinate) -> Option<Piece> {
        self.grid[coord.row][coord.col]
    }

    pub fn is_empty_at(&self, coord: BoardCoordinate) -> bool {
        self.get_piece(coord).is_none()
    }

    pub fn set_piece(&mut self, coord: BoardCoordinate, piece: Option<Piece>) {
        self.grid[coord.row][coord.col] = piece;
    }

    pub fn add_piece(&mut self, coord: BoardCoordinate, piece: Piece) {
        self.set_piece(coord, Some(piece));
    }

    /// Row-major iterator over occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (BoardCoordinate, Piece)> + '_ {
        BoardCoordinate::all().filter_map(|coord| self.get_piece(coord).map(|p| (coord, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (BoardCoordinate, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn piece_counts(&self) -> PieceCounts {
        let mut counts = PieceCounts::default();
        for (_, piece) in self.pieces() {
            match piece.color {
                Color::Light => counts.light += 1,
                Color::Dark => counts.dark += 1,
            }
        }
        counts
    }

    /// Parses the text diagram produced by `Display`: eight lines of eight
    /// cells, `-` or `.` for empty squares.
    pub fn from_diagram(diagram: &str) -> Option<Self> {
        let mut board = Self::empty();
        let rows: Vec<&str> = diagram
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return None;
        }
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE {
                return None;
            }
            for (col, &cell) in cells.iter().enumerate() {
                let coord = BoardCoordinate::new(row, col)?;
                match cell {
                    '-' | '.' => {}
                    other => board.add_piece(coord, Piece::from_symbol(other)?),
                }
            }
        }
        Some(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            for cell in row {
                let c = cell.map_or('-', Piece::symbol);
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: usize, col: usize) -> BoardCoordinate {
        BoardCoordinate::new(row, col).unwrap()
    }

    #[test]
    fn test_initial_position_layout() {
        let board = Board::new();
        let counts = board.piece_counts();
        assert_eq!(counts.light, 12);
        assert_eq!(counts.dark, 12);

        assert_eq!(board.get_piece(at(0, 1)), Some(Piece::man(Color::Dark)));
        assert_eq!(board.get_piece(at(0, 0)), None);
        assert_eq!(board.get_piece(at(2, 7)), Some(Piece::man(Color::Dark)));
        assert_eq!(board.get_piece(at(5, 0)), Some(Piece::man(Color::Light)));
        assert_eq!(board.get_piece(at(7, 6)), Some(Piece::man(Color::Light)));
        for col in 0..BOARD_SIZE {
            assert!(board.is_empty_at(at(3, col)));
            assert!(board.is_empty_at(at(4, col)));
        }
    }

    #[test]
    fn test_coordinate_bounds_and_offset() {
        assert!(BoardCoordinate::new(8, 0).is_none());
        assert!(BoardCoordinate::new(0, 8).is_none());
        assert_eq!(at(0, 0).offset(-1, 1), None);
        assert_eq!(at(3, 3).offset(2, -2), Some(at(5, 1)));
        assert_eq!(at(7, 7).offset(1, 1), None);
    }

    #[test]
    fn test_coordinate_display() {
        assert_eq!(at(5, 0).to_string(), "5A");
        assert_eq!(at(2, 7).to_string(), "2H");
    }

    #[test]
    fn test_diagram_round_trip() {
        let board = Board::new();
        let parsed = Board::from_diagram(&board.to_string()).unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_diagram_rejects_bad_input() {
        assert!(Board::from_diagram("--------").is_none());
        let mut rows = vec!["--------"; 7];
        rows.push("---z----");
        assert!(Board::from_diagram(&rows.join("\n")).is_none());
    }

    #[test]
    fn test_king_directions() {
        assert_eq!(Piece::man(Color::Dark).row_directions(), &[1]);
        assert_eq!(Piece::man(Color::Light).row_directions(), &[-1]);
        assert_eq!(Piece::king(Color::Light).row_directions(), &[1, -1]);
        assert_eq!(Piece::king(Color::Dark).row_directions(), &[1, -1]);
    }
}
