use super::board::{Board, Player};

/// One of the eight index triples that win the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WinLine([usize; 3]);

impl WinLine {
    pub fn cells(&self) -> [usize; 3] {
        self.0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

/// Rows top to bottom, columns left to right, then the two diagonals.
/// `evaluate` reports the first full line in this order.
pub const WIN_LINES: [WinLine; 8] = [
    WinLine([0, 1, 2]),
    WinLine([3, 4, 5]),
    WinLine([6, 7, 8]),
    WinLine([0, 3, 6]),
    WinLine([1, 4, 7]),
    WinLine([2, 5, 8]),
    WinLine([0, 4, 8]),
    WinLine([2, 4, 6]),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    Draw,
    Win { winner: Player, line: WinLine },
}

impl GameResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Win { winner, .. } => Some(*winner),
            _ => None,
        }
    }
}

pub fn evaluate(board: &Board) -> GameResult {
    for line in WIN_LINES {
        let [a, b, c] = line.cells();
        let Some(mark) = board.cells()[a].mark() else {
            continue;
        };
        if board.cells()[b].mark() == Some(mark) && board.cells()[c].mark() == Some(mark) {
            return GameResult::Win { winner: mark, line };
        }
    }

    if board.is_full() {
        GameResult::Draw
    } else {
        GameResult::InProgress
    }
}
