use std::fmt;

use tictactoe_engine::{GameResult, Player};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    ComputerWon,
    OpponentWon,
    Draw,
}

impl Outcome {
    pub fn from_result(result: GameResult, opponent: Player) -> Option<Self> {
        match result {
            GameResult::InProgress => None,
            GameResult::Draw => Some(Outcome::Draw),
            GameResult::Win { winner, .. } if winner == opponent => Some(Outcome::OpponentWon),
            GameResult::Win { .. } => Some(Outcome::ComputerWon),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::ComputerWon => "computer won",
            Outcome::OpponentWon => "opponent won",
            Outcome::Draw => "draw",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub computer_wins: u32,
    pub opponent_wins: u32,
    pub draws: u32,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::ComputerWon => self.computer_wins += 1,
            Outcome::OpponentWon => self.opponent_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.computer_wins + self.opponent_wins + self.draws
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: computer {} / opponent {} / draws {}",
            self.games(),
            self.computer_wins,
            self.opponent_wins,
            self.draws
        )
    }
}
