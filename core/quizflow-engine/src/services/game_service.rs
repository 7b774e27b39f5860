use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::GameConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::lifeline::{LifelineEffect, LifelineKind};
use crate::models::round::{NextStep, RoundResolution, RoundState, TimerUpdate};
use crate::models::score::ScoreState;
use crate::models::session::{SessionPlan, SessionProgress, SessionStatus, SessionSummary};
use crate::services::lifeline_service::LifelineEngine;
use crate::services::round_service::QuestionRound;
use crate::services::scoring_service::ScoringPolicy;
use crate::utils::rng::RandomSource;

/// One play-through. Owns the generated question sequence, the running
/// score, the lifeline counters and the currently active round, and applies
/// the configured continue-or-end rule when a round finishes. Exactly one
/// round is live at a time; everything here is synchronous.
pub struct GameSession {
    id: String,
    config: GameConfig,
    scoring: ScoringPolicy,
    lifelines: LifelineEngine,
    plan: SessionPlan,
    score: ScoreState,
    status: SessionStatus,
    round: Option<QuestionRound>,
    rng: Box<dyn RandomSource>,
    started_at: DateTime<Utc>,
}

impl GameSession {
    /// Opens the first round of a freshly generated plan.
    pub fn begin(
        config: GameConfig,
        plan: SessionPlan,
        mut rng: Box<dyn RandomSource>,
    ) -> EngineResult<Self> {
        if plan.is_empty() {
            return Err(EngineError::InvalidConfiguration(
                "cannot start a session without questions".to_string(),
            ));
        }

        let id = Uuid::new_v4().to_string();
        let scoring = ScoringPolicy::new(config.scoring.clone());
        let lifelines = LifelineEngine::new(config.lifeline_slots());

        let first = plan
            .current()
            .expect("non-empty plan has a first entry")
            .clone();
        let mut round = QuestionRound::new(first, config.timer_duration_seconds, rng.as_mut());
        round.begin()?;

        tracing::info!("Session {} started with {} questions", id, plan.len());

        Ok(Self {
            id,
            config,
            scoring,
            lifelines,
            plan,
            score: ScoreState::new(),
            status: SessionStatus::Active,
            round: Some(round),
            rng,
            started_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn score(&self) -> ScoreState {
        self.score
    }

    pub fn progress(&self) -> SessionProgress {
        self.plan.progress()
    }

    pub fn lifelines_remaining(&self, kind: LifelineKind) -> u32 {
        self.lifelines.remaining(kind)
    }

    pub fn current_round(&self) -> Option<&QuestionRound> {
        self.round.as_ref()
    }

    /// Changes the highlighted option on the active round.
    pub fn select_option(&mut self, index: usize) -> EngineResult<&RoundState> {
        let round = self.active_round_mut()?;
        round.select_option(index)
    }

    /// Finalizes the current selection and applies scoring.
    pub fn lock_in(&mut self) -> EngineResult<RoundResolution> {
        let round = self
            .round
            .as_mut()
            .ok_or(EngineError::InvalidTransition("no active round"))?;
        round.lock_in(&self.scoring, &mut self.score)
    }

    /// Feeds one second of countdown to the active round.
    pub fn tick_timer(&mut self) -> EngineResult<TimerUpdate> {
        let round = self
            .round
            .as_mut()
            .ok_or(EngineError::InvalidTransition("no active round"))?;
        round.tick_timer(&self.scoring, &mut self.score)
    }

    pub fn invoke_lifeline(&mut self, kind: LifelineKind) -> EngineResult<LifelineEffect> {
        let round = self
            .round
            .as_mut()
            .ok_or(EngineError::InvalidTransition("no active round"))?;
        round.invoke_lifeline(kind, &mut self.lifelines, self.rng.as_mut())
    }

    /// Consumes the finished round and either opens the next question, ends
    /// the game on the continue-or-end rule, or completes the session.
    pub fn advance(&mut self) -> EngineResult<NextStep> {
        let round = self
            .round
            .as_mut()
            .ok_or(EngineError::InvalidTransition("no active round"))?;
        let question_number = round.question_number();
        let outcome = round.finish()?;

        let continues = match outcome {
            // Skip carries no outcome and never ends the game.
            None => true,
            Some(outcome) => {
                outcome.is_correct()
                    || self
                        .config
                        .continuation
                        .continues_after_miss(question_number)
            }
        };

        if !continues {
            self.status = SessionStatus::Failed;
            self.round = None;
            let summary = self.summary();
            tracing::info!(
                "Session {} over at question {} with {} points",
                self.id,
                question_number,
                self.score.total_score
            );
            return Ok(NextStep::GameOver { summary });
        }

        self.plan.advance();
        self.round = None;

        if self.plan.is_exhausted() {
            self.status = SessionStatus::Completed;
            let summary = self.summary();
            tracing::info!(
                "Session {} completed with {} points",
                self.id,
                self.score.total_score
            );
            return Ok(NextStep::Finished { summary });
        }

        let entry = self
            .plan
            .current()
            .expect("non-exhausted plan has a current entry")
            .clone();
        let mut round = QuestionRound::new(
            entry,
            self.config.timer_duration_seconds,
            self.rng.as_mut(),
        );
        round.begin()?;
        let question_number = round.question_number();
        self.round = Some(round);

        Ok(NextStep::NextQuestion {
            question_number,
            total_questions: self.plan.len(),
        })
    }

    /// Quit-to-menu: drops the session in place, whatever state the active
    /// round is in. Always succeeds.
    pub fn abandon(&mut self) -> SessionSummary {
        self.status = SessionStatus::Abandoned;
        self.round = None;
        tracing::info!("Session {} abandoned", self.id);
        self.summary()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::build(
            &self.id,
            self.status,
            self.score.total_score,
            &self.plan,
            self.started_at,
        )
    }

    fn active_round_mut(&mut self) -> EngineResult<&mut QuestionRound> {
        self.round
            .as_mut()
            .ok_or(EngineError::InvalidTransition("no active round"))
    }
}
