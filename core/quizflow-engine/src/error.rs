use crate::models::lifeline::LifelineKind;

/// Engine-level error taxonomy. Each variant maps to one failure class the
/// caller is expected to handle differently; none of them is retried
/// internally.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A raw question record failed validation. Recovered locally during bank
    /// loading (the record is dropped and counted), surfaced directly only
    /// when a single record is converted by hand.
    #[error("invalid question record: {0}")]
    InvalidRecord(String),

    /// Session generation could not fill every position. Fatal for that
    /// attempt; the session is never partially filled.
    #[error("not enough questions: filled {filled} of {requested} positions")]
    InsufficientQuestions { requested: usize, filled: usize },

    /// A lifeline was invoked with no remaining uses, or is not applicable to
    /// the current question (50:50 on a boolean question).
    #[error("lifeline {0} is unavailable")]
    LifelineUnavailable(LifelineKind),

    /// State-machine misuse by the caller (selecting while locked, locking
    /// without a selection, advancing an unresolved round). Treat as a
    /// programming error, not a runtime condition.
    #[error("invalid transition: {0}")]
    InvalidTransition(&'static str),

    /// The gameplay configuration is unusable (difficulty rules do not
    /// partition the session positions). Detected before any sampling.
    #[error("invalid game configuration: {0}")]
    InvalidConfiguration(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
