pub mod board;
pub mod bot;
pub mod controller;
pub mod search;
pub mod session;
pub mod win_detector;

pub use board::{Board, CELL_COUNT, Cell, Player, legal_moves};
pub use bot::{BotInput, DEFAULT_MEDIUM_RANDOM_CHANCE, Difficulty, calculate_minimax_move, select_move};
pub use controller::{ComputerTurn, Mode, RoundSettings, RoundStatus, TurnController};
pub use search::SearchEngine;
pub use session::{GameSession, SessionSnapshot};
pub use win_detector::{GameResult, WIN_LINES, WinLine, evaluate};
