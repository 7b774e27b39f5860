use serde::Serialize;
use std::collections::BTreeSet;

use crate::models::session::SessionSummary;

/// How a locked round was resolved.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    Correct,
    Incorrect,
    /// The countdown hit zero before a lock-in. Counts as incorrect for
    /// streak and continuation purposes.
    TimedOut,
}

impl RoundOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, RoundOutcome::Correct)
    }
}

/// Lifecycle of a single question. `Advancing` is terminal: the owning loop
/// consumes it to fetch the next question or end the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Revealing,
    AwaitingAnswer,
    Locked(RoundOutcome),
    Advancing,
}

/// Mutable per-question state, reset for every round.
#[derive(Debug, Clone, Serialize)]
pub struct RoundState {
    pub selected_option: Option<usize>,
    pub is_locked: bool,
    pub eliminated_options: BTreeSet<usize>,
    pub time_remaining_seconds: u32,
}

impl RoundState {
    pub fn new(timer_seconds: u32) -> Self {
        Self {
            selected_option: None,
            is_locked: false,
            eliminated_options: BTreeSet::new(),
            time_remaining_seconds: timer_seconds,
        }
    }
}

/// Result of locking in (or timing out) a round, mirrored back to the caller
/// so the presentation layer can narrate it.
#[derive(Debug, Clone, Serialize)]
pub struct RoundResolution {
    pub outcome: RoundOutcome,
    pub points_awarded: u32,
    pub total_score: u32,
    pub current_streak: u32,
    /// Index of the correct answer in the shuffled option list, for reveal.
    pub correct_option: usize,
}

/// Timer tick feedback. Ticks that arrive after a round is already resolved
/// are reported as ignored rather than failing, so an external scheduler can
/// keep firing without coordination.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum TimerUpdate {
    Running { remaining_seconds: u32 },
    Expired { resolution: RoundResolution },
    Ignored,
}

/// What the owning loop should do after consuming a finished round.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "step")]
pub enum NextStep {
    NextQuestion {
        question_number: u32,
        total_questions: usize,
    },
    Finished { summary: SessionSummary },
    GameOver { summary: SessionSummary },
}
