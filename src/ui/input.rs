use checkers_core::logic::board::BoardCoordinate;
use thiserror::Error;

const COLUMNS: &str = "ABCDEFGH";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Square(BoardCoordinate),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("expected a row digit and a column letter such as 5A, got '{0}'")]
    Format(String),
    #[error("row must be between 0 and 7")]
    Row,
    #[error("column must be between A and H")]
    Column,
}

/// Parses one line of player input: `quit`, or a square written as its row
/// digit followed by its column letter (`5A`, case insensitive).
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let text = line.trim();
    if text.eq_ignore_ascii_case("quit") || text.eq_ignore_ascii_case("q") {
        return Ok(Command::Quit);
    }

    let mut chars = text.chars();
    let (Some(row), Some(col), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(InputError::Format(text.to_owned()));
    };

    let row = row
        .to_digit(10)
        .and_then(|d| usize::try_from(d).ok())
        .ok_or_else(|| InputError::Format(text.to_owned()))?;
    let col = COLUMNS
        .find(col.to_ascii_uppercase())
        .ok_or(InputError::Column)?;

    BoardCoordinate::new(row, col)
        .map(Command::Square)
        .ok_or(InputError::Row)
}
