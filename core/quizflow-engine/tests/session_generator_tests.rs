use std::collections::HashSet;

use quizflow_engine::config::{DifficultyRule, GameConfig};
use quizflow_engine::models::Difficulty;
use quizflow_engine::{EngineError, QuestionBank, SeededRandom, SessionGenerator};

mod common;

#[test]
fn tight_bank_fills_the_standard_progression_exactly() {
    // 5 easy + 5 medium + 5 hard questions for the standard 15-question
    // session: every question is used and lands in its difficulty band.
    let bank = common::standard_bank(5, 5, 5);
    let generator = SessionGenerator::new(GameConfig::default()).expect("default config is valid");
    assert_eq!(generator.config().questions_per_session, 15);

    for seed in 0..8 {
        let mut rng = SeededRandom::new(seed);
        let plan = generator.generate(&bank, &mut rng).expect("generation succeeds");

        assert_eq!(plan.len(), 15);
        for entry in plan.entries() {
            let expected = match entry.question_number {
                1..=5 => Difficulty::Easy,
                6..=10 => Difficulty::Medium,
                _ => Difficulty::Hard,
            };
            assert_eq!(entry.difficulty, expected);
            assert_eq!(entry.question.difficulty, expected);
        }
    }
}

#[test]
fn generated_sessions_never_repeat_a_hash() {
    let bank = common::standard_bank(10, 10, 10);
    let generator = SessionGenerator::new(GameConfig::default()).expect("default config is valid");

    for seed in 0..16 {
        let mut rng = SeededRandom::new(seed);
        let plan = generator.generate(&bank, &mut rng).expect("generation succeeds");
        let hashes: HashSet<&str> = plan
            .entries()
            .iter()
            .map(|e| e.question.question_hash.as_str())
            .collect();
        assert_eq!(hashes.len(), plan.len());
        assert_eq!(plan.used_hashes().len(), plan.len());
    }
}

#[test]
fn exhausted_difficulty_falls_back_and_keeps_real_difficulty() {
    // Only 2 hard questions exist; positions 13..15 must borrow from the
    // remaining pool and record what they actually got.
    let bank = common::standard_bank(10, 5, 2);
    let generator = SessionGenerator::new(GameConfig::default()).expect("default config is valid");
    let mut rng = SeededRandom::new(21);

    let plan = generator.generate(&bank, &mut rng).expect("generation succeeds");
    assert_eq!(plan.len(), 15);

    let hard_positions: Vec<_> = plan
        .entries()
        .iter()
        .filter(|e| e.question_number >= 11)
        .collect();
    let borrowed = hard_positions
        .iter()
        .filter(|e| e.difficulty != Difficulty::Hard)
        .count();
    assert_eq!(borrowed, 3);
    for entry in hard_positions {
        // Recorded difficulty always matches the question itself.
        assert_eq!(entry.difficulty, entry.question.difficulty);
    }
}

#[test]
fn too_small_bank_fails_without_a_partial_session() {
    let bank = common::standard_bank(4, 4, 4);
    let generator = SessionGenerator::new(GameConfig::default()).expect("default config is valid");
    let mut rng = SeededRandom::new(3);

    match generator.generate(&bank, &mut rng) {
        Err(EngineError::InsufficientQuestions { requested, filled }) => {
            assert_eq!(requested, 15);
            assert_eq!(filled, 12);
        }
        Ok(_) => panic!("12 questions cannot fill 15 positions"),
        Err(other) => panic!("unexpected error: {}", other),
    }
}

#[test]
fn progression_must_partition_the_session() {
    let gap = GameConfig {
        questions_per_session: 10,
        difficulty_progression: vec![
            DifficultyRule::new(1, 4, Difficulty::Easy),
            DifficultyRule::new(6, 10, Difficulty::Hard),
        ],
        ..GameConfig::default()
    };
    assert!(matches!(
        SessionGenerator::new(gap),
        Err(EngineError::InvalidConfiguration(_))
    ));

    let overlap = GameConfig {
        questions_per_session: 10,
        difficulty_progression: vec![
            DifficultyRule::new(1, 6, Difficulty::Easy),
            DifficultyRule::new(5, 10, Difficulty::Hard),
        ],
        ..GameConfig::default()
    };
    assert!(matches!(
        SessionGenerator::new(overlap),
        Err(EngineError::InvalidConfiguration(_))
    ));
}

#[test]
fn single_difficulty_bank_with_boolean_questions_generates() {
    // Boolean questions are first-class citizens of the pool.
    let records = (0..6)
        .map(|i| common::boolean_record(&format!("b-{}", i), "Science", Difficulty::Easy))
        .collect::<Vec<_>>();
    let (bank, rejected) = QuestionBank::load(records);
    assert_eq!(rejected, 0);

    let config = GameConfig {
        questions_per_session: 5,
        difficulty_progression: vec![DifficultyRule::new(1, 5, Difficulty::Easy)],
        ..GameConfig::default()
    };
    let generator = SessionGenerator::new(config).expect("config is valid");
    let mut rng = SeededRandom::new(8);
    let plan = generator.generate(&bank, &mut rng).expect("generation succeeds");
    assert_eq!(plan.len(), 5);
    assert!(plan.entries().iter().all(|e| e.question.option_count() == 2));
}
