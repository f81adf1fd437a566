use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BoardParseError;

pub const CELL_COUNT: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Mark(Player),
}

impl Cell {
    pub fn mark(&self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Mark(player) => Some(*player),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Cell::Empty
    }
}

/// 3x3 board, row-major: indices 0-2 are the top row, 6-8 the bottom row.
///
/// The board is `Copy`; search code passes snapshots by value so no caller
/// ever observes a half-applied move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Reads nine cells from `X`, `O` and `_`/`.`/`-` for empty. Whitespace
    /// and `|` separators are skipped, so `"XO_|_X_|__O"` is accepted.
    pub fn parse(text: &str) -> Result<Self, BoardParseError> {
        let mut parsed = Vec::with_capacity(CELL_COUNT);
        for ch in text.chars() {
            let cell = match ch {
                'X' | 'x' => Cell::Mark(Player::X),
                'O' | 'o' => Cell::Mark(Player::O),
                '_' | '.' | '-' => Cell::Empty,
                c if c.is_whitespace() || c == '|' => continue,
                c => return Err(BoardParseError::UnknownCell(c)),
            };
            parsed.push(cell);
        }

        let cells: [Cell; CELL_COUNT] = parsed
            .try_into()
            .map_err(|rest: Vec<Cell>| BoardParseError::WrongLength(rest.len()))?;
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// X moves on an even number of marks, O on an odd one.
    pub fn player_to_move(&self) -> Player {
        if self.occupied_count() % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    /// Returns a copy with `player` written at `index`. The caller checks
    /// legality; writing over a mark or out of range is a logic error.
    pub fn with_move(&self, index: usize, player: Player) -> Board {
        debug_assert!(self.is_empty_at(index), "cell {} is not playable", index);
        let mut next = *self;
        next.cells[index] = Cell::Mark(player);
        next
    }

    pub(crate) fn set(&mut self, index: usize, player: Player) {
        self.cells[index] = Cell::Mark(player);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                write!(f, "/")?;
            }
            for cell in chunk {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Mark(player) => player.symbol(),
                };
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

/// Every empty cell, ascending.
pub fn legal_moves(board: &Board) -> Vec<usize> {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_empty())
        .map(|(index, _)| index)
        .collect()
}
