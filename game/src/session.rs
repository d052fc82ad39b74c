use std::time::Duration;

use engine::timer::{Clock, InputSource, TickTimer};

use crate::controller::{GameController, GameError, Rules, TickOutcome};
use crate::input::InputAction;
use crate::leaderboard::{Leaderboard, LeaderboardStore, RankingRecord};
use crate::name_prompt::{NamePrompt, PromptResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Playing,
    /// Game over; waiting for the player's name.
    NamePrompt(NamePrompt),
    /// Game over and the prompt is resolved. Only a restart leaves this phase.
    Finished,
}

/// One game from first tick to leaderboard, driven by an injected clock and input source.
#[derive(Debug)]
pub struct GameSession {
    controller: GameController,
    timer: TickTimer,
    store: LeaderboardStore,
    rankings: Leaderboard,
    phase: SessionPhase,
}

impl GameSession {
    pub fn new(controller: GameController, store: LeaderboardStore, now: Duration) -> Self {
        let mut timer = TickTimer::new(controller.tick_interval());
        timer.start(now);
        let mut session = Self {
            controller,
            timer,
            store,
            rankings: Leaderboard::new(),
            phase: SessionPhase::Playing,
        };
        session.reload_rankings();
        session
    }

    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn rankings(&self) -> &Leaderboard {
        &self.rankings
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn prompt_mut(&mut self) -> Option<&mut NamePrompt> {
        match &mut self.phase {
            SessionPhase::NamePrompt(prompt) => Some(prompt),
            _ => None,
        }
    }

    /// Drains pending input, then runs the gravity tick if one came due. A stalled frame
    /// runs a single tick; missed ticks are dropped.
    pub fn update<C, I>(&mut self, clock: &C, input: &mut I) -> Option<TickOutcome>
    where
        C: Clock,
        I: InputSource<Action = InputAction>,
    {
        if self.phase != SessionPhase::Playing {
            return None;
        }

        while let Some(action) = input.next_action() {
            if let Err(GameError::GameOver) = self.controller.handle_input(action) {
                break;
            }
        }

        let now = clock.now();
        if !self.timer.poll(now) {
            return None;
        }
        let outcome = self.controller.tick().ok()?;
        match &outcome {
            TickOutcome::GameOver(..) => self.end_game(),
            TickOutcome::Locked(report) => {
                if let Some(interval) = report.speed_up {
                    self.timer.restart(interval, now);
                }
            }
            TickOutcome::Moved => {}
        }
        Some(outcome)
    }

    fn end_game(&mut self) {
        self.timer.cancel();
        self.phase = SessionPhase::NamePrompt(NamePrompt::new());
    }

    /// Closes the name prompt: a submitted name is stored, then the rankings are reloaded.
    pub fn resolve_prompt(&mut self, result: PromptResult) {
        if !matches!(self.phase, SessionPhase::NamePrompt(_)) {
            return;
        }
        self.phase = SessionPhase::Finished;

        let PromptResult::Submitted(name) = result else {
            self.reload_rankings();
            return;
        };
        let record = RankingRecord::new(name, self.controller.score());
        match self.store.submit(record) {
            Ok(rankings) => {
                tracing::info!(path = %self.store.path().display(), "score saved");
                self.rankings = rankings;
            }
            Err(err) => {
                tracing::warn!("score not saved: {err}");
                self.reload_rankings();
            }
        }
    }

    pub fn reload_rankings(&mut self) {
        match self.store.load() {
            Ok(rankings) => self.rankings = rankings,
            Err(err) => {
                tracing::warn!("could not load rankings: {err}");
                self.rankings = Leaderboard::new();
            }
        }
    }

    /// Starts over with a fresh controller. Only allowed once the prompt is resolved.
    pub fn restart(&mut self, seed: u64, now: Duration) {
        if self.phase != SessionPhase::Finished {
            return;
        }
        let rules: Rules = *self.controller.rules();
        self.controller = GameController::new(rules, seed);
        self.timer.restart(self.controller.tick_interval(), now);
        self.phase = SessionPhase::Playing;
    }
}
