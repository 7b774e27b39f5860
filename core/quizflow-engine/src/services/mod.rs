use crate::config::GameConfig;
use crate::error::EngineResult;
use crate::services::game_service::GameSession;
use crate::services::question_service::QuestionBank;
use crate::services::session_service::SessionGenerator;
use crate::utils::rng::RandomSource;

pub mod game_service;
pub mod lifeline_service;
pub mod question_service;
pub mod round_service;
pub mod scoring_service;
pub mod session_service;

/// Shared, read-only root the presentation layer holds for the lifetime of
/// the process: the loaded bank plus the validated gameplay configuration.
/// Any number of sessions can be started from one context; a language switch
/// replaces the whole context with a freshly loaded one.
pub struct GameContext {
    config: GameConfig,
    bank: QuestionBank,
}

impl GameContext {
    /// Fails fast on unusable configuration, before any session is attempted.
    pub fn new(config: GameConfig, bank: QuestionBank) -> EngineResult<Self> {
        config.validate_progression()?;
        Ok(Self { config, bank })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Generates a fresh session and opens its first round.
    pub fn start_session(&self, mut rng: Box<dyn RandomSource>) -> EngineResult<GameSession> {
        let generator = SessionGenerator::new(self.config.clone())?;
        let plan = generator.generate(&self.bank, rng.as_mut())?;
        GameSession::begin(self.config.clone(), plan, rng)
    }
}
