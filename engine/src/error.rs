use thiserror::Error;

/// Why the turn controller refused a move. Refusals never change state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("Cell index {0} is out of range")]
    OutOfRange(usize),

    #[error("Cell {0} is already marked")]
    Occupied(usize),

    #[error("Round is already over")]
    GameOver,

    #[error("Not the human player's turn")]
    NotHumansTurn,

    #[error("Computer is still thinking")]
    ComputerThinking,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("Board needs 9 cells, got {0}")]
    WrongLength(usize),

    #[error("Unknown cell character {0:?}")]
    UnknownCell(char),
}
