//! Match engine: owns the active phase and performs every transition
//!
//! The engine is the only thing that swaps phases. Phases return the tag of
//! the phase they want next; the engine exits the current phase, enters the
//! requested one, and keeps going while entry actions immediately request
//! another transition. Input and update ticks only ever reach the single
//! active phase.

use crate::collab::Collaborators;
use crate::config::{ConfigurationSource, MatchConfig};
use crate::core::Difficulty;
use crate::game::phase::{InputEvent, MatchContext, PhaseTag, PointerEvent, Transition};
use crate::game::phases::PhaseTable;
use crate::game::{MatchLogger, MatchStatus};
use crate::{CurlingError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Lifecycle state of the engine as seen by the embedding application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// `start()` has not been called yet
    NotStarted,
    InProgress,
    /// Every set was played
    Completed { score_a: u32, score_b: u32 },
    /// A collaborator or invariant failure ended the match early
    Aborted(String),
    /// Torn down by `stop()`; the engine may be started again
    Stopped,
}

pub struct MatchEngine {
    ctx: MatchContext,
    config_source: Box<dyn ConfigurationSource>,
    phases: Option<PhaseTable>,
    active: Option<PhaseTag>,
    outcome: MatchOutcome,
    transitions: u64,
}

impl MatchEngine {
    pub fn new(config_source: Box<dyn ConfigurationSource>, collaborators: Collaborators) -> Self {
        Self::with_logger(config_source, collaborators, MatchLogger::new())
    }

    pub fn with_logger(
        config_source: Box<dyn ConfigurationSource>,
        collaborators: Collaborators,
        logger: MatchLogger,
    ) -> Self {
        MatchEngine {
            ctx: MatchContext::new(collaborators, logger),
            config_source,
            phases: None,
            active: None,
            outcome: MatchOutcome::NotStarted,
            transitions: 0,
        }
    }

    /// Read the configuration, build the phases and enter `Starting`
    ///
    /// Fails with `AlreadyStarted` unless the engine is fresh or was
    /// stopped; nothing is touched in that case. Configuration errors leave
    /// the engine unstarted.
    pub fn start(&mut self) -> Result<()> {
        if !matches!(self.outcome, MatchOutcome::NotStarted | MatchOutcome::Stopped) {
            return Err(CurlingError::AlreadyStarted);
        }

        let config = MatchConfig::from_source(self.config_source.as_ref())?;
        self.ctx.rng = match config.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::from_entropy(),
        };
        self.ctx.config = config;
        self.ctx.reset();
        self.phases = Some(PhaseTable::new(&config));
        self.outcome = MatchOutcome::InProgress;

        self.run_transitions(Some(PhaseTag::Starting))
    }

    /// Tear down the match: exit the active phase, record, reset
    ///
    /// In-flight rink operations are not cancelled; their results are
    /// discarded when they arrive. Stopping an engine with no active phase
    /// only resets the status.
    pub fn stop(&mut self) {
        self.exit_active();
        if self.outcome == MatchOutcome::InProgress && self.ctx.status.is_launched {
            let record = self.ctx.status.record(false);
            self.ctx.collaborators.persistence.record(&record);
        }
        self.ctx.reset();
        self.phases = None;
        if self.outcome != MatchOutcome::NotStarted {
            self.outcome = MatchOutcome::Stopped;
            self.ctx.logger.minimal("Match stopped");
        }
    }

    /// Per-frame tick
    ///
    /// Collaborators are ticked first so completions produced this frame
    /// are visible to the active phase in the same frame.
    pub fn update(&mut self, dt: f64) -> Result<()> {
        let Some(tag) = self.active else {
            return Ok(());
        };
        if self.outcome == MatchOutcome::InProgress {
            self.ctx.collaborators.rink.update(dt);
            self.ctx.collaborators.camera.update(dt);
        }
        let Some(phases) = self.phases.as_mut() else {
            return Ok(());
        };
        let requested = phases.get_mut(tag).update(&mut self.ctx, dt);
        self.settle(requested)
    }

    /// Route one input event to the active phase; dropped when none is active
    pub fn dispatch(&mut self, input: InputEvent) -> Result<()> {
        let (Some(tag), Some(phases)) = (self.active, self.phases.as_mut()) else {
            return Ok(());
        };
        let requested = phases.get_mut(tag).on_input(&mut self.ctx, &input);
        self.settle(requested)
    }

    pub fn on_pointer_move(&mut self, event: PointerEvent) -> Result<()> {
        self.dispatch(InputEvent::PointerMove(event))
    }

    pub fn on_pointer_down(&mut self, event: PointerEvent) -> Result<()> {
        self.dispatch(InputEvent::PointerDown(event))
    }

    pub fn on_pointer_up(&mut self, event: PointerEvent) -> Result<()> {
        self.dispatch(InputEvent::PointerUp(event))
    }

    pub fn on_spacebar(&mut self) -> Result<()> {
        self.dispatch(InputEvent::Spacebar)
    }

    pub fn on_spin_toggle(&mut self) -> Result<()> {
        self.dispatch(InputEvent::SpinToggle)
    }

    /// Window resize only concerns the camera
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.ctx.collaborators.camera.resize(width, height);
    }

    pub fn active_phase(&self) -> Option<PhaseTag> {
        self.active
    }

    pub fn status(&self) -> &MatchStatus {
        &self.ctx.status
    }

    pub fn outcome(&self) -> &MatchOutcome {
        &self.outcome
    }

    pub fn config(&self) -> &MatchConfig {
        &self.ctx.config
    }

    /// Number of phase activations since the engine was created
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn logger(&self) -> &MatchLogger {
        &self.ctx.logger
    }

    /// Difficulty of the strategy installed in `ComputerTurn`
    pub fn computer_strategy_kind(&self) -> Option<Difficulty> {
        self.phases
            .as_ref()
            .map(|table| table.computer_turn.strategy().difficulty())
    }

    /// Is the active phase waiting on the rink?
    pub fn is_busy(&self) -> bool {
        self.active.is_some_and(|tag| tag.is_busy())
    }

    /// Apply the outcome of a phase handler: transition, or abort on error
    fn settle(&mut self, requested: Result<Transition>) -> Result<()> {
        match requested {
            Ok(next) => self.run_transitions(next),
            Err(err) => Err(self.abort(err)),
        }
    }

    /// Swap phases until an entry action stops requesting a new one
    fn run_transitions(&mut self, mut next: Transition) -> Result<()> {
        while let Some(tag) = next.take() {
            next = match self.enter(tag) {
                Ok(next) => next,
                Err(err) => return Err(self.abort(err)),
            };
        }

        if self.ctx.concluded && self.outcome == MatchOutcome::InProgress {
            self.outcome = MatchOutcome::Completed {
                score_a: self.ctx.status.score_a,
                score_b: self.ctx.status.score_b,
            };
        }
        Ok(())
    }

    fn enter(&mut self, tag: PhaseTag) -> Result<Transition> {
        let from = self.active;
        if from.is_some_and(|current| current.is_terminal()) {
            return Ok(None);
        }
        self.exit_active();

        let Some(phases) = self.phases.as_mut() else {
            return Err(CurlingError::NotStarted);
        };
        self.ctx.logger.transition(from, tag);
        self.transitions += 1;
        self.active = Some(tag);
        phases.get_mut(tag).on_enter(&mut self.ctx)
    }

    fn exit_active(&mut self) {
        if let (Some(tag), Some(phases)) = (self.active.take(), self.phases.as_mut()) {
            phases.get_mut(tag).on_exit(&mut self.ctx);
        }
    }

    /// Move to the aborted terminal condition and hand the error back
    fn abort(&mut self, err: CurlingError) -> CurlingError {
        self.exit_active();
        if self.outcome == MatchOutcome::InProgress {
            let record = self.ctx.status.record(false);
            self.ctx.collaborators.persistence.record(&record);
            self.outcome = MatchOutcome::Aborted(err.to_string());
            self.ctx.logger.minimal(&format!("Match aborted: {err}"));
        }
        err
    }
}
