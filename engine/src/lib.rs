pub mod config;
pub mod error;
pub mod game;
pub mod logger;
pub mod session_rng;

pub use error::{BoardParseError, MoveError};
pub use game::*;
pub use session_rng::SessionRng;
