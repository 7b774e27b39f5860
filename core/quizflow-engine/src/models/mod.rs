use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod lifeline;
pub mod question;
pub mod round;
pub mod score;
pub mod session;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Invalid difficulty: {}", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// One correct answer plus at least three incorrect ones.
    Multiple,
    /// True/false: exactly one incorrect answer.
    Boolean,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Multiple => "multiple",
            QuestionType::Boolean => "boolean",
        }
    }
}

/// Five-tier rating shown on the results screen, derived from how much of the
/// session was completed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceRating {
    Excellent,
    Great,
    Good,
    KeepTrying,
    PracticeMore,
}

impl PerformanceRating {
    pub fn from_completion_percent(percent: f64) -> Self {
        if percent >= 90.0 {
            PerformanceRating::Excellent
        } else if percent >= 75.0 {
            PerformanceRating::Great
        } else if percent >= 50.0 {
            PerformanceRating::Good
        } else if percent >= 25.0 {
            PerformanceRating::KeepTrying
        } else {
            PerformanceRating::PracticeMore
        }
    }
}
