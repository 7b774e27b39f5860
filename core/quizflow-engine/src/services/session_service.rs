use std::collections::HashSet;

use crate::config::GameConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::session::{SessionEntry, SessionPlan};
use crate::services::question_service::QuestionBank;
use crate::utils::rng::{pick_index, RandomSource};

/// Builds the ordered question sequence for one play-through: one question
/// per position, difficulty taken from the configured progression, sampled
/// uniformly without replacement on the content hash.
pub struct SessionGenerator {
    config: GameConfig,
}

impl SessionGenerator {
    /// Rejects unusable difficulty progressions up front, before any
    /// sampling happens.
    pub fn new(config: GameConfig) -> EngineResult<Self> {
        config.validate_progression()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// All-or-nothing generation. A position that cannot be filled from the
    /// preferred difficulty falls back to any unused question; if even that
    /// pool is empty the whole attempt fails, since a short session would
    /// break the difficulty and scoring contract.
    pub fn generate(
        &self,
        bank: &QuestionBank,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<SessionPlan> {
        let total = self.config.questions_per_session;
        let mut entries: Vec<SessionEntry> = Vec::with_capacity(total as usize);
        let mut used_hashes: HashSet<String> = HashSet::new();

        for number in 1..=total {
            let preferred = self
                .config
                .difficulty_for(number)
                .expect("validated progression covers every position");

            let candidates: Vec<&_> = bank
                .all()
                .iter()
                .filter(|q| q.difficulty == preferred && !used_hashes.contains(&q.question_hash))
                .collect();

            let (question, assigned) = if !candidates.is_empty() {
                let chosen = candidates[pick_index(rng, candidates.len())];
                (chosen.clone(), preferred)
            } else {
                // Preferred pool exhausted: any unused question will do, but
                // the entry keeps the question's real difficulty so scoring
                // stays honest.
                let fallback: Vec<&_> = bank
                    .all()
                    .iter()
                    .filter(|q| !used_hashes.contains(&q.question_hash))
                    .collect();
                if fallback.is_empty() {
                    tracing::warn!(
                        "Session generation failed at position {}: bank exhausted ({} questions total)",
                        number,
                        bank.len()
                    );
                    return Err(EngineError::InsufficientQuestions {
                        requested: total as usize,
                        filled: entries.len(),
                    });
                }
                let chosen = fallback[pick_index(rng, fallback.len())];
                tracing::debug!(
                    "No unused {} question for position {}, using a {} one instead",
                    preferred,
                    number,
                    chosen.difficulty
                );
                (chosen.clone(), chosen.difficulty)
            };

            used_hashes.insert(question.question_hash.clone());
            entries.push(SessionEntry {
                question,
                question_number: number,
                difficulty: assigned,
            });
        }

        tracing::info!("Generated session with {} questions", entries.len());
        Ok(SessionPlan::new(entries, used_hashes))
    }
}
