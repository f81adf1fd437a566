use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tictactoe_engine::{Difficulty, Player};

#[derive(Parser)]
#[command(name = "tictactoe_arena", about = "Plays scripted matches against the tic-tac-toe computer")]
pub struct Args {
    /// YAML engine config; defaults apply when omitted or missing
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = 10)]
    pub games: u32,

    /// Difficulty of the controller's computer player
    #[arg(long, value_enum, default_value_t = DifficultyArg::Hard)]
    pub computer: DifficultyArg,

    /// Difficulty of the scripted player standing in for the human
    #[arg(long, value_enum, default_value_t = DifficultyArg::Easy)]
    pub opponent: DifficultyArg,

    /// Symbol the scripted player starts with
    #[arg(long, value_enum, default_value_t = PlayerArg::X)]
    pub human: PlayerArg,

    /// Swap symbols after every game
    #[arg(long)]
    pub alternate: bool,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Overrides thinking_delay_ms from the config
    #[arg(long)]
    pub delay_ms: Option<u64>,

    #[arg(long)]
    pub use_log_prefix: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PlayerArg {
    X,
    O,
}

impl From<PlayerArg> for Player {
    fn from(arg: PlayerArg) -> Self {
        match arg {
            PlayerArg::X => Player::X,
            PlayerArg::O => Player::O,
        }
    }
}
