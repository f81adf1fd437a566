use serde::{Deserialize, Serialize};

use crate::error::MoveError;
use crate::log;
use crate::session_rng::SessionRng;
use super::board::{Board, CELL_COUNT, Player};
use super::bot::{BotInput, DEFAULT_MEDIUM_RANDOM_CHANCE, Difficulty, select_move};
use super::search::SearchEngine;
use super::win_detector::{GameResult, WinLine, evaluate};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    ComputerVsHuman,
    HumanVsHuman,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundSettings {
    pub mode: Mode,
    pub human_player: Player,
    pub difficulty: Difficulty,
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            mode: Mode::ComputerVsHuman,
            human_player: Player::X,
            difficulty: Difficulty::Easy,
        }
    }
}

impl RoundSettings {
    pub fn computer_player(&self) -> Option<Player> {
        match self.mode {
            Mode::ComputerVsHuman => Some(self.human_player.opponent()),
            Mode::HumanVsHuman => None,
        }
    }
}

/// Ticket for one scheduled computer move. It goes stale once it is spent
/// or the round it was issued in ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComputerTurn {
    round: u64,
    turn: u64,
    player: Player,
}

impl ComputerTurn {
    pub fn player(&self) -> Player {
        self.player
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    HumanTurn(Player),
    ComputerThinking,
    ComputerTurn,
    Won {
        winner: Player,
        line: WinLine,
        /// `None` when two humans play each other.
        by_human: Option<bool>,
    },
    Draw,
}

/// Owns one game: the board, the settings and the search cache. The
/// player to move is always derived from the board, never stored.
pub struct TurnController {
    board: Board,
    active: RoundSettings,
    staged: RoundSettings,
    defaults: RoundSettings,
    engine: SearchEngine,
    rng: SessionRng,
    medium_random_chance: f64,
    round: u64,
    turn_serial: u64,
    thinking: Option<ComputerTurn>,
}

impl TurnController {
    pub fn new(defaults: RoundSettings, rng: SessionRng) -> Self {
        Self {
            board: Board::new(),
            active: defaults,
            staged: defaults,
            defaults,
            engine: SearchEngine::new(),
            rng,
            medium_random_chance: DEFAULT_MEDIUM_RANDOM_CHANCE,
            round: 0,
            turn_serial: 0,
            thinking: None,
        }
    }

    pub fn with_medium_random_chance(mut self, chance: f64) -> Self {
        self.medium_random_chance = chance;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.board.player_to_move()
    }

    pub fn result(&self) -> GameResult {
        evaluate(&self.board)
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking.is_some()
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    /// Settings the current round is played with.
    pub fn settings(&self) -> RoundSettings {
        self.active
    }

    /// Settings the next round will start with.
    pub fn staged_settings(&self) -> RoundSettings {
        self.staged
    }

    pub fn computer_player(&self) -> Option<Player> {
        self.active.computer_player()
    }

    pub fn search_engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn status(&self) -> RoundStatus {
        match self.result() {
            GameResult::Win { winner, line } => RoundStatus::Won {
                winner,
                line,
                by_human: self.computer_player().map(|computer| computer != winner),
            },
            GameResult::Draw => RoundStatus::Draw,
            GameResult::InProgress => {
                let to_move = self.current_player();
                if self.is_thinking() {
                    RoundStatus::ComputerThinking
                } else if self.computer_player() == Some(to_move) {
                    RoundStatus::ComputerTurn
                } else {
                    RoundStatus::HumanTurn(to_move)
                }
            }
        }
    }

    /// Places the mark of whoever is to move. In computer mode only the
    /// human's turns are accepted here.
    pub fn apply_move(&mut self, index: usize) -> Result<GameResult, MoveError> {
        if self.result().is_terminal() {
            return Err(MoveError::GameOver);
        }
        if index >= CELL_COUNT {
            return Err(MoveError::OutOfRange(index));
        }
        if !self.board.is_empty_at(index) {
            return Err(MoveError::Occupied(index));
        }

        let to_move = self.current_player();
        if self.active.mode == Mode::ComputerVsHuman {
            if self.is_thinking() {
                return Err(MoveError::ComputerThinking);
            }
            if to_move != self.active.human_player {
                return Err(MoveError::NotHumansTurn);
            }
        }

        self.board.set(index, to_move);
        Ok(self.result())
    }

    /// Enters the thinking state if the computer is to move. Returns `None`
    /// when it is not the computer's turn or a computer move is already
    /// pending.
    pub fn begin_computer_turn(&mut self) -> Option<ComputerTurn> {
        if self.thinking.is_some() || self.result().is_terminal() {
            return None;
        }
        let computer = self.computer_player()?;
        if self.current_player() != computer {
            return None;
        }

        self.turn_serial += 1;
        let ticket = ComputerTurn {
            round: self.round,
            turn: self.turn_serial,
            player: computer,
        };
        self.thinking = Some(ticket);
        Some(ticket)
    }

    /// Plays the computer's move for `ticket`. A ticket from an earlier
    /// round, an earlier turn, or one that is no longer pending is dropped
    /// without touching the board.
    pub fn finish_computer_turn(&mut self, ticket: ComputerTurn) -> Option<usize> {
        if self.thinking != Some(ticket) {
            log!(
                "Discarding stale computer turn {} from round {} (current round {})",
                ticket.turn,
                ticket.round,
                self.round
            );
            return None;
        }
        self.thinking = None;

        let board = self.board;
        let difficulty = self.active.difficulty;
        let mut input = BotInput {
            engine: &mut self.engine,
            rng: &mut self.rng,
            medium_random_chance: self.medium_random_chance,
        };
        let Some(index) = select_move(&board, ticket.player, difficulty, &mut input) else {
            unreachable!("computer turn issued on finished board {}", board);
        };

        self.board.set(index, ticket.player);
        log!("Computer {} ({}) played {} on {}", ticket.player, difficulty, index, board);
        Some(index)
    }

    /// Clears the board and the search cache and applies any staged
    /// settings. A pending computer turn becomes stale.
    pub fn start_new_round(&mut self) {
        self.board = Board::new();
        self.thinking = None;
        self.engine.clear();
        self.active = self.staged;
        self.round += 1;
        log!("Round {} started: {:?}", self.round, self.active);
    }

    pub fn full_reset(&mut self) {
        self.staged = self.defaults;
        self.start_new_round();
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.staged.mode = mode;
    }

    pub fn set_human_player(&mut self, player: Player) {
        self.staged.human_player = player;
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.staged.difficulty = difficulty;
    }
}
