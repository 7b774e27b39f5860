use crate::config::ScoringConfig;
use crate::models::Difficulty;

/// Pure point computation. Same inputs, same output; rounding is always
/// `floor`, never banker's or half-up.
#[derive(Debug, Clone)]
pub struct ScoringPolicy {
    config: ScoringConfig,
}

impl ScoringPolicy {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Points for a correct answer at `difficulty`, given the streak as it
    /// stood *before* this answer. The streak bonus kicks in from the third
    /// consecutive correct answer (streak_before > 1).
    pub fn points_for(&self, difficulty: Difficulty, streak_before: u32) -> u32 {
        let base = self.config.points_per_correct as f64;
        let multiplier = self.config.difficulty_multipliers.for_difficulty(difficulty);
        let streak_factor = if streak_before > 1 {
            self.config.streak_multiplier
        } else {
            1.0
        };
        (base * multiplier * streak_factor).floor() as u32
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
