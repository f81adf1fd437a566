use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;

use crate::config::EngineConfig;
use crate::error::MoveError;
use crate::log;
use crate::session_rng::SessionRng;
use super::board::{Board, Player};
use super::bot::Difficulty;
use super::controller::{Mode, RoundSettings, RoundStatus, TurnController};
use super::win_detector::GameResult;

/// Owned copy of what a front end needs to draw one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub board: Board,
    pub current_player: Player,
    pub result: GameResult,
    pub is_thinking: bool,
    pub status: RoundStatus,
    pub settings: RoundSettings,
}

impl SessionSnapshot {
    fn of(controller: &TurnController) -> Self {
        Self {
            board: *controller.board(),
            current_player: controller.current_player(),
            result: controller.result(),
            is_thinking: controller.is_thinking(),
            status: controller.status(),
            settings: controller.settings(),
        }
    }
}

/// Runs a [`TurnController`] on tokio, answering human moves with a
/// delayed computer move. Cloning shares the same game.
#[derive(Clone)]
pub struct GameSession {
    controller: Arc<Mutex<TurnController>>,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
    update_notify: Arc<Notify>,
    thinking_delay: Duration,
}

impl GameSession {
    pub fn new(controller: TurnController, thinking_delay: Duration) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            pending: Arc::new(Mutex::new(None)),
            update_notify: Arc::new(Notify::new()),
            thinking_delay,
        }
    }

    pub fn from_config(config: &EngineConfig, rng: SessionRng) -> Self {
        let controller = TurnController::new(config.defaults, rng)
            .with_medium_random_chance(config.medium_random_chance);
        Self::new(controller, config.thinking_delay())
    }

    /// Schedules the computer's opening move when it plays X. Call once
    /// after construction; round changes do this on their own.
    pub async fn start(&self) {
        self.schedule_computer_turn().await;
    }

    pub async fn play(&self, index: usize) -> Result<GameResult, MoveError> {
        let result = self.controller.lock().await.apply_move(index)?;
        self.update_notify.notify_one();
        self.schedule_computer_turn().await;
        Ok(result)
    }

    pub async fn new_round(&self) {
        self.cancel_pending().await;
        self.controller.lock().await.start_new_round();
        self.update_notify.notify_one();
        self.schedule_computer_turn().await;
    }

    pub async fn full_reset(&self) {
        self.cancel_pending().await;
        self.controller.lock().await.full_reset();
        self.update_notify.notify_one();
        self.schedule_computer_turn().await;
    }

    pub async fn set_mode(&self, mode: Mode) {
        self.controller.lock().await.set_mode(mode);
    }

    pub async fn set_human_player(&self, player: Player) {
        self.controller.lock().await.set_human_player(player);
    }

    pub async fn set_difficulty(&self, difficulty: Difficulty) {
        self.controller.lock().await.set_difficulty(difficulty);
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::of(&*self.controller.lock().await)
    }

    pub async fn is_thinking(&self) -> bool {
        self.controller.lock().await.is_thinking()
    }

    /// Resolves on the next board or round change, or at once if a change
    /// landed since the previous wait.
    pub async fn wait_for_update(&self) {
        self.update_notify.notified().await;
    }

    async fn cancel_pending(&self) {
        if let Some(handle) = self.pending.lock().await.take() {
            if !handle.is_finished() {
                log!("Cancelling pending computer move");
                handle.abort();
            }
        }
    }

    async fn schedule_computer_turn(&self) {
        let Some(ticket) = self.controller.lock().await.begin_computer_turn() else {
            return;
        };
        self.update_notify.notify_one();

        let controller = self.controller.clone();
        let update_notify = self.update_notify.clone();
        let delay = self.thinking_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let played = controller.lock().await.finish_computer_turn(ticket);
            if played.is_some() {
                update_notify.notify_one();
            }
        });

        // any earlier task has already spent its ticket by the time a new
        // one can be issued, so it is safe to detach it
        *self.pending.lock().await = Some(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(600);

    fn session(human: Player, difficulty: Difficulty) -> GameSession {
        let settings = RoundSettings { mode: Mode::ComputerVsHuman, human_player: human, difficulty };
        GameSession::new(TurnController::new(settings, SessionRng::new(8)), DELAY)
    }

    async fn past_delay() {
        tokio::time::sleep(DELAY + Duration::from_millis(50)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_computer_replies_after_delay() {
        let s = session(Player::X, Difficulty::Hard);
        s.start().await;
        assert!(!s.is_thinking().await);

        s.play(0).await.unwrap();
        let snapshot = s.snapshot().await;
        assert!(snapshot.is_thinking);
        assert_eq!(snapshot.status, RoundStatus::ComputerThinking);
        assert_eq!(snapshot.board.occupied_count(), 1);

        tokio::time::sleep(DELAY / 2).await;
        assert!(s.is_thinking().await);

        past_delay().await;
        let snapshot = s.snapshot().await;
        assert!(!snapshot.is_thinking);
        assert!(!snapshot.board.is_empty_at(4));
        assert_eq!(snapshot.current_player, Player::X);
    }

    #[tokio::test(start_paused = true)]
    async fn test_human_move_rejected_while_thinking() {
        let s = session(Player::X, Difficulty::Easy);
        s.play(4).await.unwrap();
        assert_eq!(s.play(0).await, Err(MoveError::ComputerThinking));
        past_delay().await;
        assert_eq!(s.snapshot().await.board.occupied_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_round_cancels_pending_move() {
        let s = session(Player::X, Difficulty::Hard);
        s.play(0).await.unwrap();
        assert!(s.is_thinking().await);

        s.new_round().await;
        assert!(!s.is_thinking().await);
        past_delay().await;

        let snapshot = s.snapshot().await;
        assert_eq!(snapshot.board, Board::new());
        assert_eq!(snapshot.status, RoundStatus::HumanTurn(Player::X));
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_reset_cancels_pending_move() {
        let s = session(Player::X, Difficulty::Medium);
        s.set_human_player(Player::O).await;
        s.play(8).await.unwrap();
        s.full_reset().await;
        past_delay().await;

        // back to the constructor's settings, so the human opens as X
        let snapshot = s.snapshot().await;
        assert_eq!(snapshot.board, Board::new());
        assert_eq!(
            snapshot.settings,
            RoundSettings { mode: Mode::ComputerVsHuman, human_player: Player::X, difficulty: Difficulty::Medium }
        );
        assert!(!snapshot.is_thinking);
    }

    #[tokio::test(start_paused = true)]
    async fn test_computer_opens_when_it_plays_x() {
        let s = session(Player::X, Difficulty::Hard);
        s.set_human_player(Player::O).await;
        assert_eq!(s.snapshot().await.settings.human_player, Player::X);

        s.new_round().await;
        assert!(s.is_thinking().await);
        assert_eq!(s.play(4).await, Err(MoveError::ComputerThinking));

        past_delay().await;
        let snapshot = s.snapshot().await;
        assert_eq!(snapshot.board.occupied_count(), 1);
        assert_eq!(snapshot.status, RoundStatus::HumanTurn(Player::O));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_update_sees_computer_move() {
        let s = session(Player::X, Difficulty::Easy);
        s.play(4).await.unwrap();

        let waiter = s.clone();
        let wait = tokio::spawn(async move {
            while waiter.snapshot().await.is_thinking {
                waiter.wait_for_update().await;
            }
        });
        wait.await.unwrap();
        let snapshot = s.snapshot().await;
        assert_eq!(snapshot.board.occupied_count(), 2);
        assert!(!snapshot.is_thinking);
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_between_snapshot_and_wait_is_kept() {
        let s = session(Player::X, Difficulty::Easy);
        s.play(4).await.unwrap();
        // consumes the wakeup left by the human move
        s.wait_for_update().await;
        assert!(s.snapshot().await.is_thinking);

        // the computer moves before anyone is waiting
        past_delay().await;
        assert!(!s.is_thinking().await);

        let woke = tokio::time::timeout(Duration::from_secs(5), s.wait_for_update()).await;
        assert!(woke.is_ok());
        assert_eq!(s.snapshot().await.board.occupied_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_human_vs_human_never_schedules() {
        let s = session(Player::X, Difficulty::Hard);
        s.set_mode(Mode::HumanVsHuman).await;
        s.new_round().await;
        for index in [0, 4, 8] {
            s.play(index).await.unwrap();
            assert!(!s.is_thinking().await);
        }
        past_delay().await;
        assert_eq!(s.snapshot().await.board.occupied_count(), 3);
    }
}
