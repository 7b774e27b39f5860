use quizflow_engine::config::{ContinuationPolicy, DifficultyRule, GameConfig, LifelineConfig};
use quizflow_engine::models::lifeline::{LifelineAllotment, LifelineEffect, LifelineKind};
use quizflow_engine::models::round::NextStep;
use quizflow_engine::models::Difficulty;
use quizflow_engine::{EngineError, GameContext, QuestionBank, SeededRandom};

mod common;

#[test]
fn fifty_fifty_thins_the_round_and_clears_a_doomed_selection() {
    for seed in 0..12 {
        let mut session = common::start_flat_session(3, ContinuationPolicy::AlwaysContinue, seed);

        // Select an option that the elimination might take away.
        let wrong = common::wrong_option(&session);
        session.select_option(wrong).expect("selection is legal");

        let effect = session
            .invoke_lifeline(LifelineKind::FiftyFifty)
            .expect("first 50:50 succeeds");
        let eliminated = match effect {
            LifelineEffect::OptionsEliminated { eliminated } => eliminated,
            other => panic!("unexpected effect: {:?}", other),
        };

        let round = session.current_round().expect("round is live");
        assert_eq!(eliminated.len(), 2);
        assert!(!eliminated.contains(&round.correct_option()));
        assert_eq!(round.state().eliminated_options.len(), 2);

        if eliminated.contains(&wrong) {
            assert_eq!(round.state().selected_option, None);
        } else {
            assert_eq!(round.state().selected_option, Some(wrong));
        }

        // Eliminated options can no longer be selected.
        let gone = eliminated[0];
        assert!(matches!(
            session.select_option(gone),
            Err(EngineError::InvalidTransition(_))
        ));
    }
}

#[test]
fn exhausted_lifeline_reports_unavailable_and_changes_nothing() {
    let mut session = common::start_flat_session(3, ContinuationPolicy::AlwaysContinue, 5);

    session
        .invoke_lifeline(LifelineKind::FiftyFifty)
        .expect("one use is allotted");
    assert_eq!(session.lifelines_remaining(LifelineKind::FiftyFifty), 0);

    let score_before = session.score();
    let state_before = session.current_round().unwrap().state().clone();

    let second = session.invoke_lifeline(LifelineKind::FiftyFifty);
    assert!(matches!(
        second,
        Err(EngineError::LifelineUnavailable(LifelineKind::FiftyFifty))
    ));

    let state_after = session.current_round().unwrap().state();
    assert_eq!(session.score(), score_before);
    assert_eq!(state_after.is_locked, state_before.is_locked);
    assert_eq!(
        state_after.eliminated_options,
        state_before.eliminated_options
    );
}

#[test]
fn fifty_fifty_is_refused_on_boolean_questions_without_cost() {
    let records = (0..4)
        .map(|i| common::boolean_record(&format!("b-{}", i), "Science", Difficulty::Easy))
        .collect::<Vec<_>>();
    let (bank, _) = QuestionBank::load(records);
    let config = GameConfig {
        questions_per_session: 3,
        difficulty_progression: vec![DifficultyRule::new(1, 3, Difficulty::Easy)],
        continuation: ContinuationPolicy::AlwaysContinue,
        ..GameConfig::default()
    };
    let context = GameContext::new(config, bank).expect("config is valid");
    assert_eq!(context.bank().len(), 4);
    assert_eq!(context.config().questions_per_session, 3);
    let mut session = context
        .start_session(Box::new(SeededRandom::new(2)))
        .expect("session starts");

    let round = session.current_round().expect("round is live");
    assert_eq!(round.category(), "Science");
    let result = session.invoke_lifeline(LifelineKind::FiftyFifty);
    assert!(matches!(result, Err(EngineError::LifelineUnavailable(_))));
    // The refusal must not burn the allotted use.
    assert_eq!(session.lifelines_remaining(LifelineKind::FiftyFifty), 1);
}

#[test]
fn skip_advances_without_scoring() {
    let mut session = common::start_flat_session(3, ContinuationPolicy::AlwaysContinue, 7);
    assert_eq!(session.lifelines_remaining(LifelineKind::SkipQuestion), 2);

    let effect = session
        .invoke_lifeline(LifelineKind::SkipQuestion)
        .expect("skip succeeds");
    assert!(matches!(effect, LifelineEffect::QuestionSkipped));
    assert_eq!(session.lifelines_remaining(LifelineKind::SkipQuestion), 1);

    // The round resolved nothing, so the score is untouched and the session
    // simply moves on.
    match session.advance().expect("advance succeeds") {
        NextStep::NextQuestion {
            question_number, ..
        } => assert_eq!(question_number, 2),
        other => panic!("unexpected step: {:?}", other),
    }
    assert_eq!(session.score().total_score, 0);
    assert_eq!(session.score().streak, 0);
}

#[test]
fn skip_still_works_after_the_grace_window() {
    // A skip is not a miss: even with the strictest continue-or-end rule the
    // session survives it.
    let mut session = common::start_flat_session(
        3,
        ContinuationPolicy::EndOnMiss { grace_questions: 1 },
        9,
    );
    session
        .invoke_lifeline(LifelineKind::SkipQuestion)
        .expect("skip succeeds");
    assert!(matches!(
        session.advance().expect("advance succeeds"),
        NextStep::NextQuestion { .. }
    ));
}

#[test]
fn audience_poll_favors_the_correct_option() {
    for seed in 0..12 {
        let mut session = common::start_flat_session(3, ContinuationPolicy::AlwaysContinue, seed);
        let effect = session
            .invoke_lifeline(LifelineKind::AskAudience)
            .expect("audience poll succeeds");
        let poll = match effect {
            LifelineEffect::AudiencePolled { poll } => poll,
            other => panic!("unexpected effect: {:?}", other),
        };

        let round = session.current_round().expect("round is live");
        assert_eq!(poll.percentages.len(), round.options().len());
        assert_eq!(poll.total(), 100);
        let correct_share = poll.percentages[round.correct_option()];
        assert!((40..=70).contains(&correct_share));
    }
}

#[test]
fn disabled_lifeline_is_never_available() {
    let bank = common::standard_bank(5, 0, 0);
    let config = GameConfig {
        questions_per_session: 3,
        difficulty_progression: vec![DifficultyRule::new(1, 3, Difficulty::Easy)],
        continuation: ContinuationPolicy::AlwaysContinue,
        lifelines: LifelineConfig {
            ask_audience: LifelineAllotment::new(1, false),
            ..LifelineConfig::default()
        },
        ..GameConfig::default()
    };
    let context = GameContext::new(config, bank).expect("config is valid");
    let mut session = context
        .start_session(Box::new(SeededRandom::new(4)))
        .expect("session starts");

    assert_eq!(session.lifelines_remaining(LifelineKind::AskAudience), 0);
    assert!(matches!(
        session.invoke_lifeline(LifelineKind::AskAudience),
        Err(EngineError::LifelineUnavailable(_))
    ));
}
