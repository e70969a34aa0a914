use std::path::PathBuf;

use crate::board::{Player, BOARD_SIZE};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid cell code {code} at ({x}, {y})")]
    InvalidCell { x: usize, y: usize, code: i32 },

    #[error("invalid player id {0}: expected 1 or 2")]
    InvalidPlayer(i32),

    #[error("coordinate ({x}, {y}) is off the {n}x{n} board", n = BOARD_SIZE)]
    OutOfRange { x: i32, y: i32 },

    #[error("player {player} has {found} pieces on the board, expected {expected}")]
    PieceCount { player: Player, found: usize, expected: usize },

    #[error("board text: {0}")]
    Parse(String),

    #[error("failed to read config {}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed agent config")]
    ConfigJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
