use std::collections::BTreeMap;

use crate::models::question::{BankStatistics, Question, QuestionRecord};
use crate::models::Difficulty;

/// Validated question pool, indexed by category and difficulty. Built once at
/// load time and never mutated afterwards; a reload (e.g. on language change)
/// replaces the whole bank.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
    by_category: BTreeMap<String, BTreeMap<Difficulty, Vec<usize>>>,
    rejected_records: usize,
}

impl QuestionBank {
    /// Validates every record and builds the index. Malformed records are
    /// dropped and counted, never fatal: an empty bank is a valid bank that
    /// simply cannot fill sessions later.
    pub fn load<I>(records: I) -> (Self, usize)
    where
        I: IntoIterator<Item = QuestionRecord>,
    {
        let mut questions = Vec::new();
        let mut rejected = 0usize;

        for record in records {
            let id = record.id.clone();
            match Question::from_record(record) {
                Ok(question) => questions.push(question),
                Err(error) => {
                    rejected += 1;
                    tracing::debug!("Dropping question record {}: {}", id, error);
                }
            }
        }

        let mut by_category: BTreeMap<String, BTreeMap<Difficulty, Vec<usize>>> = BTreeMap::new();
        for (index, question) in questions.iter().enumerate() {
            by_category
                .entry(question.category.clone())
                .or_default()
                .entry(question.difficulty)
                .or_default()
                .push(index);
        }

        tracing::info!(
            "Question bank loaded: {} questions across {} categories ({} records rejected)",
            questions.len(),
            by_category.len(),
            rejected
        );

        (
            Self {
                questions,
                by_category,
                rejected_records: rejected,
            },
            rejected,
        )
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    /// Questions of one difficulty, optionally restricted to a category, in
    /// insertion order.
    pub fn questions_of(&self, category: Option<&str>, difficulty: Difficulty) -> Vec<&Question> {
        match category {
            Some(category) => self
                .by_category
                .get(category)
                .and_then(|buckets| buckets.get(&difficulty))
                .map(|indices| indices.iter().map(|&i| &self.questions[i]).collect())
                .unwrap_or_default(),
            None => self
                .questions
                .iter()
                .filter(|q| q.difficulty == difficulty)
                .collect(),
        }
    }

    pub fn categories(&self) -> Vec<&str> {
        self.by_category.keys().map(String::as_str).collect()
    }

    pub fn statistics(&self) -> BankStatistics {
        let mut per_category = BTreeMap::new();
        let mut per_difficulty = BTreeMap::new();

        for question in &self.questions {
            *per_category.entry(question.category.clone()).or_insert(0) += 1;
            *per_difficulty.entry(question.difficulty).or_insert(0) += 1;
        }

        BankStatistics {
            total_questions: self.questions.len(),
            rejected_records: self.rejected_records,
            per_category,
            per_difficulty,
        }
    }
}
