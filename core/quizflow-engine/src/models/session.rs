use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::models::question::Question;
use crate::models::{Difficulty, PerformanceRating};

/// One slot in a generated session: the question, its 1-based position and
/// the difficulty it was actually filled with. When the preferred pool was
/// exhausted the recorded difficulty is the question's own, which is what
/// scoring must use.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEntry {
    pub question: Question,
    pub question_number: u32,
    pub difficulty: Difficulty,
}

/// Fixed, ordered question sequence for one play-through. The cursor only
/// ever moves forward; the entry list is never reordered after generation.
#[derive(Debug, Clone)]
pub struct SessionPlan {
    entries: Vec<SessionEntry>,
    cursor: usize,
    used_hashes: HashSet<String>,
}

impl SessionPlan {
    pub fn new(entries: Vec<SessionEntry>, used_hashes: HashSet<String>) -> Self {
        Self {
            entries,
            cursor: 0,
            used_hashes,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current(&self) -> Option<&SessionEntry> {
        self.entries.get(self.cursor)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.entries.len()
    }

    /// Moves the cursor one step forward. Saturates at one past the final
    /// entry, where the session counts as exhausted.
    pub fn advance(&mut self) {
        if self.cursor < self.entries.len() {
            self.cursor += 1;
        }
    }

    /// Number of entries the cursor has moved past.
    pub fn answered(&self) -> usize {
        self.cursor
    }

    pub fn entries(&self) -> &[SessionEntry] {
        &self.entries
    }

    pub fn used_hashes(&self) -> &HashSet<String> {
        &self.used_hashes
    }

    pub fn progress(&self) -> SessionProgress {
        let total = self.entries.len();
        let current = (self.cursor + 1).min(total.max(1));
        SessionProgress {
            current,
            total,
            percentage: if total == 0 {
                0.0
            } else {
                (current as f64 / total as f64) * 100.0
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SessionProgress {
    /// 1-based number of the question currently in play.
    pub current: usize,
    pub total: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    /// Every question was played to the end.
    Completed,
    /// Ended early by the continue-or-end rule after a miss.
    Failed,
    /// Discarded by the player (quit to menu).
    Abandoned,
}

/// End-of-game report handed to the results screen.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub status: SessionStatus,
    pub final_score: u32,
    pub questions_answered: usize,
    pub total_questions: usize,
    pub completion_percent: f64,
    pub rating: PerformanceRating,
    pub categories_used: Vec<String>,
    pub difficulty_counts: BTreeMap<Difficulty, usize>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn build(
        session_id: &str,
        status: SessionStatus,
        final_score: u32,
        plan: &SessionPlan,
        started_at: DateTime<Utc>,
    ) -> Self {
        let total = plan.len();
        let answered = plan.answered();
        let completion_percent = if total == 0 {
            0.0
        } else {
            (answered as f64 / total as f64) * 100.0
        };

        let categories: BTreeSet<String> = plan
            .entries()
            .iter()
            .map(|e| e.question.category.clone())
            .collect();

        let mut difficulty_counts = BTreeMap::new();
        for entry in plan.entries() {
            *difficulty_counts.entry(entry.difficulty).or_insert(0) += 1;
        }

        SessionSummary {
            session_id: session_id.to_string(),
            status,
            final_score,
            questions_answered: answered,
            total_questions: total,
            completion_percent,
            rating: PerformanceRating::from_completion_percent(completion_percent),
            categories_used: categories.into_iter().collect(),
            difficulty_counts,
            started_at,
            finished_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionType;

    fn entry(number: u32, difficulty: Difficulty) -> SessionEntry {
        SessionEntry {
            question: Question {
                id: format!("q-{}", number),
                question: format!("Question {}", number),
                correct_answer: "A".to_string(),
                incorrect_answers: vec!["B".to_string(), "C".to_string(), "D".to_string()],
                difficulty,
                question_type: QuestionType::Multiple,
                category: "General".to_string(),
                question_hash: format!("hash-{}", number),
            },
            question_number: number,
            difficulty,
        }
    }

    #[test]
    fn cursor_saturates_at_exhaustion() {
        let mut plan = SessionPlan::new(
            vec![entry(1, Difficulty::Easy), entry(2, Difficulty::Easy)],
            HashSet::new(),
        );
        assert!(!plan.is_exhausted());
        plan.advance();
        plan.advance();
        assert!(plan.is_exhausted());
        plan.advance();
        assert_eq!(plan.answered(), 2);
        assert!(plan.current().is_none());
    }

    #[test]
    fn progress_reports_one_based_position() {
        let mut plan = SessionPlan::new(
            vec![
                entry(1, Difficulty::Easy),
                entry(2, Difficulty::Medium),
                entry(3, Difficulty::Hard),
                entry(4, Difficulty::Hard),
            ],
            HashSet::new(),
        );
        assert_eq!(plan.progress().current, 1);
        plan.advance();
        let progress = plan.progress();
        assert_eq!(progress.current, 2);
        assert_eq!(progress.total, 4);
        assert!((progress.percentage - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_collects_categories_and_difficulties() {
        let mut plan = SessionPlan::new(
            vec![
                entry(1, Difficulty::Easy),
                entry(2, Difficulty::Easy),
                entry(3, Difficulty::Hard),
            ],
            HashSet::new(),
        );
        plan.advance();
        plan.advance();
        plan.advance();

        let summary =
            SessionSummary::build("s-1", SessionStatus::Completed, 700, &plan, Utc::now());
        assert_eq!(summary.questions_answered, 3);
        assert_eq!(summary.rating, PerformanceRating::Excellent);
        assert_eq!(summary.difficulty_counts[&Difficulty::Easy], 2);
        assert_eq!(summary.difficulty_counts[&Difficulty::Hard], 1);
        assert_eq!(summary.categories_used, vec!["General".to_string()]);
    }
}
