use crate::error::{EngineError, EngineResult};
use crate::models::lifeline::{LifelineEffect, LifelineKind};
use crate::models::round::{RoundOutcome, RoundPhase, RoundResolution, RoundState, TimerUpdate};
use crate::models::score::ScoreState;
use crate::models::session::SessionEntry;
use crate::models::Difficulty;
use crate::services::lifeline_service::LifelineEngine;
use crate::services::scoring_service::ScoringPolicy;
use crate::utils::rng::{shuffle, RandomSource};

/// One question's lifecycle: reveal, await an answer, lock, advance. Every
/// operation is a single synchronous step, so the round can be driven from
/// timer callbacks and input handlers without extra coordination. Once a
/// round is locked it stays locked: late ticks are ignored, late selections
/// are refused, and no second scoring event can happen.
#[derive(Debug)]
pub struct QuestionRound {
    entry: SessionEntry,
    options: Vec<String>,
    correct_option: usize,
    phase: RoundPhase,
    state: RoundState,
}

impl QuestionRound {
    /// Builds the round in its reveal phase with a freshly shuffled option
    /// list. The countdown starts when [`Self::begin`] marks the round live.
    pub fn new(entry: SessionEntry, timer_seconds: u32, rng: &mut dyn RandomSource) -> Self {
        let mut options: Vec<String> = Vec::with_capacity(entry.question.option_count());
        options.push(entry.question.correct_answer.clone());
        options.extend(entry.question.incorrect_answers.iter().cloned());
        shuffle(rng, &mut options);

        let correct_option = options
            .iter()
            .position(|o| *o == entry.question.correct_answer)
            .expect("correct answer is always one of the options");

        Self {
            entry,
            options,
            correct_option,
            phase: RoundPhase::Revealing,
            state: RoundState::new(timer_seconds),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_option(&self) -> usize {
        self.correct_option
    }

    pub fn question_number(&self) -> u32 {
        self.entry.question_number
    }

    /// Difficulty this position was actually filled with; scoring uses this,
    /// not the question bank's nominal bucket.
    pub fn difficulty(&self) -> Difficulty {
        self.entry.difficulty
    }

    pub fn question_text(&self) -> &str {
        &self.entry.question.question
    }

    pub fn category(&self) -> &str {
        &self.entry.question.category
    }

    /// Marks the round live. Reveal itself is presentation-only, so this is
    /// the only transition out of `Revealing`.
    pub fn begin(&mut self) -> EngineResult<()> {
        match self.phase {
            RoundPhase::Revealing => {
                self.phase = RoundPhase::AwaitingAnswer;
                Ok(())
            }
            _ => Err(EngineError::InvalidTransition("round already began")),
        }
    }

    /// Highlights an option. Repeated calls re-select freely until lock-in;
    /// eliminated and out-of-range indices are caller errors.
    pub fn select_option(&mut self, index: usize) -> EngineResult<&RoundState> {
        if self.phase != RoundPhase::AwaitingAnswer {
            return Err(EngineError::InvalidTransition(
                "cannot select an option unless the round is awaiting an answer",
            ));
        }
        if index >= self.options.len() {
            return Err(EngineError::InvalidTransition("option index out of range"));
        }
        if self.state.eliminated_options.contains(&index) {
            return Err(EngineError::InvalidTransition(
                "cannot select an eliminated option",
            ));
        }
        self.state.selected_option = Some(index);
        Ok(&self.state)
    }

    /// Finalizes the currently selected option. Locking wins any race with
    /// timer expiry: once this succeeds, later ticks are ignored.
    pub fn lock_in(
        &mut self,
        scoring: &ScoringPolicy,
        score: &mut ScoreState,
    ) -> EngineResult<RoundResolution> {
        if self.phase != RoundPhase::AwaitingAnswer {
            return Err(EngineError::InvalidTransition(
                "cannot lock in unless the round is awaiting an answer",
            ));
        }
        let selected = self.state.selected_option.ok_or(EngineError::InvalidTransition(
            "cannot lock in without a selected option",
        ))?;

        let outcome = if selected == self.correct_option {
            RoundOutcome::Correct
        } else {
            RoundOutcome::Incorrect
        };
        Ok(self.resolve(outcome, scoring, score))
    }

    /// One second of countdown. Expiry with no lock-in resolves the round as
    /// timed out; ticks on an already resolved round report `Ignored`.
    pub fn tick_timer(
        &mut self,
        scoring: &ScoringPolicy,
        score: &mut ScoreState,
    ) -> EngineResult<TimerUpdate> {
        match self.phase {
            RoundPhase::AwaitingAnswer => {
                self.state.time_remaining_seconds =
                    self.state.time_remaining_seconds.saturating_sub(1);
                if self.state.time_remaining_seconds == 0 {
                    let resolution = self.resolve(RoundOutcome::TimedOut, scoring, score);
                    Ok(TimerUpdate::Expired { resolution })
                } else {
                    Ok(TimerUpdate::Running {
                        remaining_seconds: self.state.time_remaining_seconds,
                    })
                }
            }
            RoundPhase::Locked(_) | RoundPhase::Advancing => Ok(TimerUpdate::Ignored),
            RoundPhase::Revealing => Err(EngineError::InvalidTransition(
                "timer cannot tick before the round begins",
            )),
        }
    }

    /// Applies a lifeline to this round. Availability errors pass through
    /// untouched so the caller can tell misuse from exhaustion.
    pub fn invoke_lifeline(
        &mut self,
        kind: LifelineKind,
        lifelines: &mut LifelineEngine,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<LifelineEffect> {
        if self.phase != RoundPhase::AwaitingAnswer {
            return Err(EngineError::InvalidTransition(
                "lifelines can only be used while awaiting an answer",
            ));
        }

        match kind {
            LifelineKind::FiftyFifty => {
                let eliminated = lifelines.fifty_fifty(
                    self.correct_option,
                    self.options.len(),
                    &self.state.eliminated_options,
                    rng,
                )?;
                self.state.eliminated_options.extend(eliminated.iter().copied());
                // A selection that just got greyed out is no selection.
                if let Some(selected) = self.state.selected_option {
                    if self.state.eliminated_options.contains(&selected) {
                        self.state.selected_option = None;
                    }
                }
                Ok(LifelineEffect::OptionsEliminated { eliminated })
            }
            LifelineKind::SkipQuestion => {
                lifelines.skip()?;
                // Skip bypasses resolution entirely: no lock, no outcome.
                self.phase = RoundPhase::Advancing;
                Ok(LifelineEffect::QuestionSkipped)
            }
            LifelineKind::AskAudience => {
                let poll = lifelines.ask_audience(self.correct_option, self.options.len(), rng)?;
                Ok(LifelineEffect::AudiencePolled { poll })
            }
        }
    }

    /// Consumes a finished round, yielding its outcome (`None` for a skip).
    /// The owning loop calls this exactly once per round before advancing.
    pub fn finish(&mut self) -> EngineResult<Option<RoundOutcome>> {
        match self.phase {
            RoundPhase::Locked(outcome) => {
                self.phase = RoundPhase::Advancing;
                Ok(Some(outcome))
            }
            RoundPhase::Advancing => Ok(None),
            _ => Err(EngineError::InvalidTransition("round is not resolved yet")),
        }
    }

    fn resolve(
        &mut self,
        outcome: RoundOutcome,
        scoring: &ScoringPolicy,
        score: &mut ScoreState,
    ) -> RoundResolution {
        let points = if outcome.is_correct() {
            let points = scoring.points_for(self.entry.difficulty, score.streak);
            score.record_correct(points);
            points
        } else {
            score.record_miss();
            0
        };

        self.phase = RoundPhase::Locked(outcome);
        self.state.is_locked = true;

        tracing::info!(
            "Question {} resolved: {:?}, +{} points (total {}, streak {})",
            self.entry.question_number,
            outcome,
            points,
            score.total_score,
            score.streak
        );

        RoundResolution {
            outcome,
            points_awarded: points,
            total_score: score.total_score,
            current_streak: score.streak,
            correct_option: self.correct_option,
        }
    }
}
