#![allow(dead_code)]

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::GameConfig;
pub use error::{EngineError, EngineResult};
pub use services::game_service::GameSession;
pub use services::lifeline_service::LifelineEngine;
pub use services::question_service::QuestionBank;
pub use services::round_service::QuestionRound;
pub use services::scoring_service::ScoringPolicy;
pub use services::session_service::SessionGenerator;
pub use services::GameContext;
pub use utils::rng::{RandomSource, SeededRandom, ThreadRandom};
