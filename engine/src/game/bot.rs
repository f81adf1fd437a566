use std::fmt;

use serde::{Deserialize, Serialize};

use crate::session_rng::SessionRng;
use super::board::{Board, Player, legal_moves};
use super::search::SearchEngine;
use super::win_detector::evaluate;

pub const DEFAULT_MEDIUM_RANDOM_CHANCE: f64 = 0.4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

/// Everything a move decision needs besides the position itself.
pub struct BotInput<'a> {
    pub engine: &'a mut SearchEngine,
    pub rng: &'a mut SessionRng,
    pub medium_random_chance: f64,
}

impl<'a> BotInput<'a> {
    pub fn new(engine: &'a mut SearchEngine, rng: &'a mut SessionRng) -> Self {
        Self {
            engine,
            rng,
            medium_random_chance: DEFAULT_MEDIUM_RANDOM_CHANCE,
        }
    }
}

/// Picks a cell for `player`. `None` only when the board has no empty cell;
/// callers should not ask on a finished board.
pub fn select_move(
    board: &Board,
    player: Player,
    difficulty: Difficulty,
    input: &mut BotInput<'_>,
) -> Option<usize> {
    let moves = legal_moves(board);
    if moves.is_empty() {
        debug_assert!(
            evaluate(board).is_terminal(),
            "no legal moves on an unfinished board {}",
            board
        );
        return None;
    }

    match difficulty {
        Difficulty::Easy => calculate_random_move(&moves, input.rng),
        Difficulty::Medium if input.rng.chance(input.medium_random_chance) => {
            calculate_random_move(&moves, input.rng)
        }
        Difficulty::Medium | Difficulty::Hard => {
            Some(calculate_minimax_move(board, player, &moves, input.engine))
        }
    }
}

fn calculate_random_move(moves: &[usize], rng: &mut SessionRng) -> Option<usize> {
    rng.choose(moves).copied()
}

/// First move, in ascending order, with the strictly best score for
/// `player`. Equal scores keep the earlier cell.
pub fn calculate_minimax_move(
    board: &Board,
    player: Player,
    moves: &[usize],
    engine: &mut SearchEngine,
) -> usize {
    let mut best_move = moves[0];
    let mut best_score = match player {
        Player::X => i32::MIN,
        Player::O => i32::MAX,
    };

    for &index in moves {
        let score = engine.score(board.with_move(index, player), player.opponent(), 1);
        let improves = match player {
            Player::X => score > best_score,
            Player::O => score < best_score,
        };
        if improves {
            best_score = score;
            best_move = index;
        }
    }

    best_move
}
