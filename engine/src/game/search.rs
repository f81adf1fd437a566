use std::collections::HashMap;

use super::board::{Board, Player, legal_moves};
use super::win_detector::{GameResult, evaluate};

const WIN_SCORE: i32 = 10;

/// Exhaustive minimax over the 3x3 game tree. Positive scores favour X.
///
/// Each engine owns its transposition cache; two games never share one.
/// Keys are the full board plus the player to move, never the depth, so
/// entries survive across queries until [`SearchEngine::clear`]. Entries hold
/// the score as seen from depth 0 and are shifted to the caller's depth on
/// read.
pub struct SearchEngine {
    cache: Option<HashMap<(Board, Player), i32>>,
    nodes_visited: u64,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    pub fn new() -> Self {
        Self {
            cache: Some(HashMap::new()),
            nodes_visited: 0,
        }
    }

    /// An engine that recomputes every node.
    pub fn uncached() -> Self {
        Self {
            cache: None,
            nodes_visited: 0,
        }
    }

    pub fn clear(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
        self.nodes_visited = 0;
    }

    pub fn cache_len(&self) -> usize {
        self.cache.as_ref().map_or(0, HashMap::len)
    }

    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited
    }

    /// Scores `board` with `to_move` about to play, `depth` plies below the
    /// query root. Wins are worth `10 - depth` for X and `depth - 10` for O,
    /// so faster wins score further from zero.
    pub fn score(&mut self, board: Board, to_move: Player, depth: i32) -> i32 {
        self.nodes_visited += 1;

        let key = (board, to_move);
        if let Some(&cached) = self.cache.as_ref().and_then(|cache| cache.get(&key)) {
            return from_root(cached, depth);
        }

        let score = match evaluate(&board) {
            GameResult::Win { winner: Player::X, .. } => WIN_SCORE - depth,
            GameResult::Win { winner: Player::O, .. } => depth - WIN_SCORE,
            GameResult::Draw => 0,
            GameResult::InProgress => self.search_children(board, to_move, depth),
        };

        if let Some(cache) = self.cache.as_mut() {
            cache.insert(key, to_root(score, depth));
        }
        score
    }

    fn search_children(&mut self, board: Board, to_move: Player, depth: i32) -> i32 {
        let maximizing = to_move == Player::X;
        // best value reachable from here; stop once a child hits it
        let ceiling = if maximizing { WIN_SCORE - depth } else { depth - WIN_SCORE };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for index in legal_moves(&board) {
            let child = self.score(board.with_move(index, to_move), to_move.opponent(), depth + 1);

            best = if maximizing { best.max(child) } else { best.min(child) };
            if best == ceiling {
                break;
            }
        }

        best
    }
}

// Win scores lose one point per ply from the query root, so a score taken
// at `depth` differs from the depth-0 score by exactly `depth` toward zero.
fn to_root(score: i32, depth: i32) -> i32 {
    match score.signum() {
        1 => score + depth,
        -1 => score - depth,
        _ => 0,
    }
}

fn from_root(score: i32, depth: i32) -> i32 {
    match score.signum() {
        1 => score - depth,
        -1 => score + depth,
        _ => 0,
    }
}
