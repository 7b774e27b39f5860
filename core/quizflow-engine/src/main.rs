#![allow(dead_code)]

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quizflow_engine::models::lifeline::LifelineKind;
use quizflow_engine::models::question::QuestionRecord;
use quizflow_engine::models::round::{NextStep, RoundOutcome, TimerUpdate};
use quizflow_engine::utils::rng::pick_index;
use quizflow_engine::{GameConfig, GameContext, QuestionBank, RandomSource, SeededRandom, ThreadRandom};

/// Headless driver standing in for the browser UI: loads a record file,
/// builds the bank and auto-plays one session with random answers.
fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quizflow_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting QuizFlow engine demo");

    let config = GameConfig::load().expect("Failed to load configuration");

    if let Err(error) = run(config) {
        tracing::error!("Demo run failed: {:#}", error);
        std::process::exit(1);
    }
}

fn run(config: GameConfig) -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "core/quizflow-engine/data/questions.json".to_string());

    let records = load_records(&path)?;
    let (bank, rejected) = QuestionBank::load(records);
    let stats = bank.statistics();
    tracing::info!(
        "Bank ready: {} questions, {} categories, {} rejected",
        stats.total_questions,
        stats.per_category.len(),
        rejected
    );

    let context = GameContext::new(config, bank)?;

    // QUIZFLOW_SEED makes a demo run reproducible end to end.
    let rng: Box<dyn RandomSource> = match std::env::var("QUIZFLOW_SEED") {
        Ok(seed) => Box::new(SeededRandom::new(
            seed.parse().context("QUIZFLOW_SEED must be an integer")?,
        )),
        Err(_) => Box::new(ThreadRandom::new()),
    };

    let mut session = context.start_session(rng)?;
    let mut answer_rng = ThreadRandom::new();
    tracing::info!("Session {} underway", session.id());

    loop {
        let (options_len, question_number, question_text) = {
            let round = session
                .current_round()
                .expect("active session has a round");
            (
                round.options().len(),
                round.question_number(),
                round.question_text().to_string(),
            )
        };
        tracing::info!("Q{}: {}", question_number, question_text);

        // Spend the audience poll early, just to show the lifeline flow.
        if question_number == 1 && session.lifelines_remaining(LifelineKind::AskAudience) > 0 {
            let effect = session.invoke_lifeline(LifelineKind::AskAudience)?;
            tracing::info!("Lifeline effect: {:?}", effect);
        }

        // Pretend to think for a few seconds before answering.
        for _ in 0..3 {
            if let TimerUpdate::Expired { resolution } = session.tick_timer()? {
                tracing::info!("Timed out: {:?}", resolution.outcome);
            }
        }

        session.select_option(pick_index(&mut answer_rng, options_len))?;
        let resolution = session.lock_in()?;
        match resolution.outcome {
            RoundOutcome::Correct => tracing::info!(
                "Correct! +{} (total {})",
                resolution.points_awarded,
                resolution.total_score
            ),
            outcome => tracing::info!("Missed ({:?})", outcome),
        }

        match session.advance()? {
            NextStep::NextQuestion {
                question_number, ..
            } => {
                tracing::debug!("Moving on to question {}", question_number);
            }
            NextStep::Finished { summary } => {
                tracing::info!(
                    "Quiz completed: {} points, rating {:?}",
                    summary.final_score,
                    summary.rating
                );
                break;
            }
            NextStep::GameOver { summary } => {
                tracing::info!(
                    "Game over at question {}/{}: {} points, rating {:?}",
                    summary.questions_answered + 1,
                    summary.total_questions,
                    summary.final_score,
                    summary.rating
                );
                break;
            }
        }
    }

    Ok(())
}

fn load_records(path: &str) -> Result<Vec<QuestionRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read question file {}", path))?;
    let records: Vec<QuestionRecord> =
        serde_json::from_str(&raw).context("Failed to parse question records")?;
    tracing::info!("Loaded {} raw records from {}", records.len(), path);
    Ok(records)
}
