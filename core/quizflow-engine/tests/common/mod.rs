#![allow(dead_code)]

use quizflow_engine::config::{ContinuationPolicy, DifficultyRule, GameConfig};
use quizflow_engine::models::question::QuestionRecord;
use quizflow_engine::models::{Difficulty, QuestionType};
use quizflow_engine::{GameContext, GameSession, QuestionBank, SeededRandom};

pub fn multiple_record(id: &str, category: &str, difficulty: Difficulty) -> QuestionRecord {
    QuestionRecord {
        id: id.to_string(),
        question: format!("Prompt for {}", id),
        correct_answer: format!("Right-{}", id),
        incorrect_answers: vec![
            format!("Wrong-{}-1", id),
            format!("Wrong-{}-2", id),
            format!("Wrong-{}-3", id),
        ],
        difficulty,
        question_type: QuestionType::Multiple,
        broad_category: Some(category.to_string()),
        question_hash: Some(format!("hash-{}", id)),
    }
}

pub fn boolean_record(id: &str, category: &str, difficulty: Difficulty) -> QuestionRecord {
    QuestionRecord {
        id: id.to_string(),
        question: format!("True or false: {}", id),
        correct_answer: "True".to_string(),
        incorrect_answers: vec!["False".to_string()],
        difficulty,
        question_type: QuestionType::Boolean,
        broad_category: Some(category.to_string()),
        question_hash: Some(format!("hash-{}", id)),
    }
}

/// Bank with `easy`/`medium`/`hard` multiple-choice questions per difficulty.
pub fn standard_bank(easy: usize, medium: usize, hard: usize) -> QuestionBank {
    let mut records = Vec::new();
    for i in 0..easy {
        records.push(multiple_record(
            &format!("easy-{}", i),
            "Science",
            Difficulty::Easy,
        ));
    }
    for i in 0..medium {
        records.push(multiple_record(
            &format!("medium-{}", i),
            "Sports",
            Difficulty::Medium,
        ));
    }
    for i in 0..hard {
        records.push(multiple_record(
            &format!("hard-{}", i),
            "Mythology",
            Difficulty::Hard,
        ));
    }
    let (bank, rejected) = QuestionBank::load(records);
    assert_eq!(rejected, 0, "test records must all validate");
    bank
}

/// Short all-easy configuration so flow tests stay compact.
pub fn flat_config(total: u32, continuation: ContinuationPolicy) -> GameConfig {
    GameConfig {
        questions_per_session: total,
        difficulty_progression: vec![DifficultyRule::new(1, total, Difficulty::Easy)],
        continuation,
        ..GameConfig::default()
    }
}

pub fn start_flat_session(
    total: u32,
    continuation: ContinuationPolicy,
    seed: u64,
) -> GameSession {
    let bank = standard_bank(total as usize + 2, 0, 0);
    let context =
        GameContext::new(flat_config(total, continuation), bank).expect("config is valid");
    context
        .start_session(Box::new(SeededRandom::new(seed)))
        .expect("session should start")
}

/// Index of some option that is neither correct nor eliminated.
pub fn wrong_option(session: &GameSession) -> usize {
    let round = session.current_round().expect("active round");
    (0..round.options().len())
        .find(|&i| {
            i != round.correct_option() && !round.state().eliminated_options.contains(&i)
        })
        .expect("at least one selectable wrong option")
}
