mod args;
mod tally;

use clap::Parser;
use tictactoe_engine::config::{ConfigManager, EngineConfig, Validate};
use tictactoe_engine::{
    BotInput, Difficulty, GameSession, Mode, RoundSettings, RoundStatus, SearchEngine, SessionRng,
    SessionSnapshot, log, logger, select_move,
};

use args::Args;
use tally::{Outcome, Tally};

/// Scripted stand-in for the human side, with its own cache and dice.
struct Opponent {
    engine: SearchEngine,
    rng: SessionRng,
    difficulty: Difficulty,
    medium_random_chance: f64,
}

impl Opponent {
    fn pick(&mut self, snapshot: &SessionSnapshot) -> Option<usize> {
        let mut input = BotInput {
            engine: &mut self.engine,
            rng: &mut self.rng,
            medium_random_chance: self.medium_random_chance,
        };
        select_move(&snapshot.board, snapshot.current_player, self.difficulty, &mut input)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Arena".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let mut config = match &args.config {
        Some(path) => ConfigManager::<_, EngineConfig>::from_yaml_file(path).get_config()?,
        None => EngineConfig::default(),
    };
    if let Some(delay_ms) = args.delay_ms {
        config.thinking_delay_ms = delay_ms;
    }
    config.defaults = RoundSettings {
        mode: Mode::ComputerVsHuman,
        human_player: args.human.into(),
        difficulty: args.computer.into(),
    };
    config.validate()?;

    let seed = args.seed.unwrap_or_else(|| SessionRng::from_random().seed());
    log!(
        "Arena: {} games, computer {} vs opponent {}, seed {}",
        args.games,
        config.defaults.difficulty,
        Difficulty::from(args.opponent),
        seed
    );

    let session = GameSession::from_config(&config, SessionRng::new(seed));
    let mut opponent = Opponent {
        engine: SearchEngine::new(),
        rng: SessionRng::new(seed.wrapping_add(1)),
        difficulty: args.opponent.into(),
        medium_random_chance: config.medium_random_chance,
    };

    let mut tally = Tally::default();
    let mut human = config.defaults.human_player;
    session.start().await;

    for game in 1..=args.games {
        if game > 1 {
            if args.alternate {
                human = human.opponent();
                session.set_human_player(human).await;
            }
            session.new_round().await;
            opponent.engine.clear();
        }

        let finished = play_game(&session, &mut opponent).await?;
        let outcome = Outcome::from_result(finished.result, human)
            .ok_or("game loop returned an unfinished board")?;
        log!("Game {}: opponent as {}, {} ({})", game, human, outcome, finished.board);
        tally.record(outcome);
    }

    println!("{}", tally);
    Ok(())
}

async fn play_game(
    session: &GameSession,
    opponent: &mut Opponent,
) -> Result<SessionSnapshot, Box<dyn std::error::Error>> {
    loop {
        let snapshot = session.snapshot().await;
        match snapshot.status {
            RoundStatus::Won { .. } | RoundStatus::Draw => return Ok(snapshot),
            RoundStatus::HumanTurn(_) => {
                let index = opponent.pick(&snapshot).ok_or("opponent found no legal move")?;
                session.play(index).await?;
            }
            RoundStatus::ComputerThinking | RoundStatus::ComputerTurn => {
                session.wait_for_update().await;
            }
        }
    }
}
