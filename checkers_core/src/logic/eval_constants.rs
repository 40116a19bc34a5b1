// Piece values
pub const VAL_MAN: i32 = 40;
pub const VAL_MAN_ADVANCED: i32 = 45;
pub const VAL_MAN_CENTER: i32 = 50;
pub const VAL_KING: i32 = 60;

/// Rows and columns of the centre block that men are rewarded for holding.
pub const CENTER_ROWS: std::ops::RangeInclusive<usize> = 3..=4;
pub const CENTER_COLS: std::ops::RangeInclusive<usize> = 2..=5;

/// Sentinel magnitude for decided positions. Symmetric so it negates safely.
pub const SCORE_INFINITY: i32 = i32::MAX;
