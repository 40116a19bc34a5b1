pub mod board;
pub mod input;

pub use board::{BoardView, Highlights};
pub use input::{parse_command, Command};
