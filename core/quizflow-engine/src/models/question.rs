use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use validator::Validate;

use crate::error::EngineError;
use crate::models::{Difficulty, QuestionType};

const DEFAULT_CATEGORY: &str = "General";

/// Raw question record as delivered by the data files. Field names follow the
/// camelCase convention of the source data; `question_hash` and
/// `broad_category` are optional there and defaulted here.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    #[validate(length(min = 1, message = "id must not be empty"))]
    pub id: String,

    #[serde(alias = "questionText")]
    #[validate(length(min = 1, message = "question text must not be empty"))]
    pub question: String,

    #[validate(length(min = 1, message = "correct answer must not be empty"))]
    pub correct_answer: String,

    #[serde(default)]
    pub incorrect_answers: Vec<String>,

    pub difficulty: Difficulty,

    #[serde(rename = "type")]
    pub question_type: QuestionType,

    #[serde(default)]
    pub broad_category: Option<String>,

    #[serde(default)]
    pub question_hash: Option<String>,
}

/// Validated, immutable question. Only ever constructed through
/// [`Question::from_record`], so every instance satisfies the per-type answer
/// count rules.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    pub category: String,
    /// Content-identity key used for without-replacement sampling. Distinct
    /// from `id`: two records describing the same fact share a hash.
    pub question_hash: String,
}

impl Question {
    pub fn from_record(record: QuestionRecord) -> Result<Self, EngineError> {
        record
            .validate()
            .map_err(|e| EngineError::InvalidRecord(e.to_string()))?;

        match record.question_type {
            QuestionType::Multiple if record.incorrect_answers.len() < 3 => {
                return Err(EngineError::InvalidRecord(format!(
                    "multiple-choice question {} has {} incorrect answers, needs at least 3",
                    record.id,
                    record.incorrect_answers.len()
                )));
            }
            QuestionType::Boolean if record.incorrect_answers.len() != 1 => {
                return Err(EngineError::InvalidRecord(format!(
                    "boolean question {} has {} incorrect answers, needs exactly 1",
                    record.id,
                    record.incorrect_answers.len()
                )));
            }
            _ => {}
        }

        if record.incorrect_answers.iter().any(|a| a.trim().is_empty()) {
            return Err(EngineError::InvalidRecord(format!(
                "question {} has an empty incorrect answer",
                record.id
            )));
        }

        if record
            .incorrect_answers
            .iter()
            .any(|a| a == &record.correct_answer)
        {
            return Err(EngineError::InvalidRecord(format!(
                "question {} lists its correct answer as an incorrect option",
                record.id
            )));
        }

        let question_hash = record
            .question_hash
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| content_hash(&record.question, &record.correct_answer));

        Ok(Question {
            id: record.id,
            question: record.question,
            correct_answer: record.correct_answer,
            incorrect_answers: record.incorrect_answers,
            difficulty: record.difficulty,
            question_type: record.question_type,
            category: record
                .broad_category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            question_hash,
        })
    }

    /// Number of answer options this question presents.
    pub fn option_count(&self) -> usize {
        self.incorrect_answers.len() + 1
    }
}

/// Records without a precomputed hash fall back to hashing their content, so
/// duplicate facts still collapse during sampling.
fn content_hash(question: &str, correct_answer: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(question.as_bytes());
    hasher.update(b"\x1f");
    hasher.update(correct_answer.as_bytes());
    hex::encode(hasher.finalize())
}

/// Aggregate counts over a loaded bank.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BankStatistics {
    pub total_questions: usize,
    pub rejected_records: usize,
    pub per_category: BTreeMap<String, usize>,
    pub per_difficulty: BTreeMap<Difficulty, usize>,
}
