use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::Generation;

/// Gender value used when the platform supplies none.
pub const UNKNOWN_GENDER: &str = "Unknown";

/// Joins the values of a multi-answer cell.
pub const ANSWER_SEPARATOR: &str = "; ";

/// Report columns filled from the submission itself. Question ids must not
/// reuse them.
pub const RESERVED_FIELDS: [&str; 5] = [
    "participant_id",
    "generation",
    "gender",
    "age",
    "completed_at",
];

/// One participant's completed response set plus demographics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub participant_id: String,
    /// Answers in question order.
    pub answers: Vec<Answer>,
    pub generation: Generation,
    pub gender: String,
    pub age: Option<u32>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Answer to one question. Multiple-choice questions carry several values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub values: Vec<String>,
}

impl Answer {
    /// Values joined for a single table cell.
    #[must_use]
    pub fn text(&self) -> String {
        self.values.join(ANSWER_SEPARATOR)
    }
}

impl Submission {
    /// The answer given to `question_id`, if any.
    #[must_use]
    pub fn answer(&self, question_id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }
}
