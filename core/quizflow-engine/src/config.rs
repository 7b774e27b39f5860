use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;

use crate::error::{EngineError, EngineResult};
use crate::models::lifeline::{LifelineAllotment, LifelineKind};
use crate::models::Difficulty;

/// Gameplay configuration. Defaults reproduce the shipped deployment:
/// 15 questions, 30-second timer, 100-point base with 1/2/3 difficulty
/// multipliers and a 1.5 streak bonus, lifelines 50:50 x1 / skip x2 /
/// audience x1, game over on a miss from question 5 onwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub questions_per_session: u32,
    pub timer_duration_seconds: u32,
    pub scoring: ScoringConfig,
    pub difficulty_progression: Vec<DifficultyRule>,
    pub lifelines: LifelineConfig,
    pub continuation: ContinuationPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            questions_per_session: 15,
            timer_duration_seconds: 30,
            scoring: ScoringConfig::default(),
            difficulty_progression: vec![
                DifficultyRule::new(1, 5, Difficulty::Easy),
                DifficultyRule::new(6, 10, Difficulty::Medium),
                DifficultyRule::new(11, 15, Difficulty::Hard),
            ],
            lifelines: LifelineConfig::default(),
            continuation: ContinuationPolicy::default(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from `config/{APP_ENV}.toml` (optional) with
    /// `QUIZFLOW__`-prefixed environment overrides on top of the defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                config::Environment::with_prefix("QUIZFLOW")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut loaded: GameConfig = settings.try_deserialize()?;
        if loaded.difficulty_progression.is_empty() {
            loaded.difficulty_progression = GameConfig::default().difficulty_progression;
        }
        Ok(loaded)
    }

    /// Checks that the difficulty rules cover positions `1..=N` exactly once.
    /// Gaps, overlaps and inverted ranges are configuration bugs and fatal.
    pub fn validate_progression(&self) -> EngineResult<()> {
        let total = self.questions_per_session;
        if total == 0 {
            return Err(EngineError::InvalidConfiguration(
                "questions_per_session must be at least 1".to_string(),
            ));
        }

        let mut rules = self.difficulty_progression.clone();
        rules.sort_by_key(|rule| rule.first_question);

        let mut expected = 1;
        for rule in &rules {
            if rule.first_question > rule.last_question {
                return Err(EngineError::InvalidConfiguration(format!(
                    "difficulty rule range {}..{} is inverted",
                    rule.first_question, rule.last_question
                )));
            }
            if rule.first_question < expected {
                return Err(EngineError::InvalidConfiguration(format!(
                    "difficulty rules overlap at question {}",
                    rule.first_question
                )));
            }
            if rule.first_question > expected {
                return Err(EngineError::InvalidConfiguration(format!(
                    "difficulty rules leave a gap at question {}",
                    expected
                )));
            }
            expected = rule.last_question + 1;
        }

        if expected != total + 1 {
            return Err(EngineError::InvalidConfiguration(format!(
                "difficulty rules cover 1..{} but the session has {} questions",
                expected - 1,
                total
            )));
        }

        Ok(())
    }

    /// Difficulty required at a 1-based session position. Only meaningful
    /// after [`Self::validate_progression`] passed.
    pub fn difficulty_for(&self, question_number: u32) -> Option<Difficulty> {
        self.difficulty_progression
            .iter()
            .find(|rule| {
                question_number >= rule.first_question && question_number <= rule.last_question
            })
            .map(|rule| rule.difficulty)
    }

    pub fn lifeline_slots(&self) -> BTreeMap<LifelineKind, LifelineAllotment> {
        let mut slots = BTreeMap::new();
        slots.insert(LifelineKind::FiftyFifty, self.lifelines.fifty_fifty);
        slots.insert(LifelineKind::SkipQuestion, self.lifelines.skip_question);
        slots.insert(LifelineKind::AskAudience, self.lifelines.ask_audience);
        slots
    }
}

/// Maps an inclusive range of 1-based question numbers to a difficulty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DifficultyRule {
    pub first_question: u32,
    pub last_question: u32,
    pub difficulty: Difficulty,
}

impl DifficultyRule {
    pub fn new(first_question: u32, last_question: u32, difficulty: Difficulty) -> Self {
        Self {
            first_question,
            last_question,
            difficulty,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub points_per_correct: u32,
    pub streak_multiplier: f64,
    pub difficulty_multipliers: DifficultyMultipliers,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points_per_correct: 100,
            streak_multiplier: 1.5,
            difficulty_multipliers: DifficultyMultipliers::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DifficultyMultipliers {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
}

impl Default for DifficultyMultipliers {
    fn default() -> Self {
        Self {
            easy: 1.0,
            medium: 2.0,
            hard: 3.0,
        }
    }
}

impl DifficultyMultipliers {
    pub fn for_difficulty(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LifelineConfig {
    pub fifty_fifty: LifelineAllotment,
    pub skip_question: LifelineAllotment,
    pub ask_audience: LifelineAllotment,
}

impl Default for LifelineConfig {
    fn default() -> Self {
        Self {
            fifty_fifty: LifelineAllotment::new(1, true),
            skip_question: LifelineAllotment::new(2, true),
            ask_audience: LifelineAllotment::new(1, true),
        }
    }
}

/// Whether a miss ends the game. The shipped behavior ends the game on any
/// incorrect or timed-out answer from question 5 onwards; deployments can
/// widen the grace window or let every session run to the last question.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum ContinuationPolicy {
    AlwaysContinue,
    EndOnMiss { grace_questions: u32 },
}

impl Default for ContinuationPolicy {
    fn default() -> Self {
        ContinuationPolicy::EndOnMiss { grace_questions: 5 }
    }
}

impl ContinuationPolicy {
    /// True when the session keeps running after a miss on `question_number`.
    pub fn continues_after_miss(&self, question_number: u32) -> bool {
        match self {
            ContinuationPolicy::AlwaysContinue => true,
            ContinuationPolicy::EndOnMiss { grace_questions } => {
                question_number < *grace_questions
            }
        }
    }
}
