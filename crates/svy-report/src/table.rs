//! Submissions flattened into rows and columns.

use std::collections::BTreeMap;

use chrono::SecondsFormat;
use serde::Serialize;
use svy_core::Submission;

use crate::error::ReportError;

pub const PARTICIPANT_COLUMN: &str = "participant_id";
pub const GENERATION_COLUMN: &str = "generation";
pub const GENDER_COLUMN: &str = "gender";
pub const AGE_COLUMN: &str = "age";
pub const COMPLETED_AT_COLUMN: &str = "completed_at";

/// Demographic columns appended after the question columns.
pub const DEMOGRAPHIC_COLUMNS: [&str; 4] = [
    GENERATION_COLUMN,
    GENDER_COLUMN,
    AGE_COLUMN,
    COMPLETED_AT_COLUMN,
];

/// Rows = participants, columns = participant id, question ids, demographics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Individual values behind cells that hold several answers, keyed by
    /// `(row, column)`. Joined cell text alone cannot be split back safely.
    #[serde(skip)]
    multi: BTreeMap<(usize, usize), Vec<String>>,
}

impl Table {
    #[must_use]
    pub const fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            columns,
            rows,
            multi: BTreeMap::new(),
        }
    }

    /// Position of `field` among the columns.
    #[must_use]
    pub fn column_index(&self, field: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == field)
    }

    /// Every cell of one column, in row order.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::UnknownField`] if the column does not exist.
    pub fn column(&self, field: &str) -> Result<Vec<&str>, ReportError> {
        let index = self
            .column_index(field)
            .ok_or_else(|| ReportError::UnknownField(field.to_string()))?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(index).map_or("", String::as_str))
            .collect())
    }

    /// The answers of one column per row. A multi-answer cell yields each
    /// value on its own; any other cell yields its text unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::UnknownField`] if the column does not exist.
    pub fn answers(&self, field: &str) -> Result<Vec<Vec<&str>>, ReportError> {
        let index = self
            .column_index(field)
            .ok_or_else(|| ReportError::UnknownField(field.to_string()))?;
        Ok(self
            .rows
            .iter()
            .enumerate()
            .map(|(r, row)| match self.multi.get(&(r, index)) {
                Some(values) => values.iter().map(String::as_str).collect(),
                None => vec![row.get(index).map_or("", String::as_str)],
            })
            .collect())
    }

    /// Question columns, i.e. everything between the participant id and the
    /// demographic columns.
    #[must_use]
    pub fn question_columns(&self) -> &[String] {
        let end = self.columns.len().saturating_sub(DEMOGRAPHIC_COLUMNS.len());
        self.columns.get(1..end).unwrap_or(&[])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Flatten submissions into a [`Table`], one row per submission in input
/// order. Question columns appear in first-seen order; unanswered cells are
/// empty and multi-answer cells are joined with [`svy_core::ANSWER_SEPARATOR`].
#[must_use]
pub fn to_table(submissions: &[Submission]) -> Table {
    let mut question_ids: Vec<&str> = Vec::new();
    for submission in submissions {
        for answer in &submission.answers {
            if !question_ids.contains(&answer.question_id.as_str()) {
                question_ids.push(&answer.question_id);
            }
        }
    }

    let mut columns = Vec::with_capacity(question_ids.len() + 1 + DEMOGRAPHIC_COLUMNS.len());
    columns.push(PARTICIPANT_COLUMN.to_string());
    columns.extend(question_ids.iter().map(ToString::to_string));
    columns.extend(DEMOGRAPHIC_COLUMNS.iter().map(ToString::to_string));

    let mut multi = BTreeMap::new();
    let rows = submissions
        .iter()
        .enumerate()
        .map(|(r, submission)| {
            let mut row = Vec::with_capacity(columns.len());
            row.push(submission.participant_id.clone());
            for (q, id) in question_ids.iter().enumerate() {
                let answer = submission.answer(id);
                if let Some(answer) = answer.filter(|a| a.values.len() > 1) {
                    multi.insert((r, q + 1), answer.values.clone());
                }
                row.push(answer.map(svy_core::Answer::text).unwrap_or_default());
            }
            row.push(submission.generation.label().to_string());
            row.push(submission.gender.clone());
            row.push(submission.age.map(|a| a.to_string()).unwrap_or_default());
            row.push(
                submission
                    .completed_at
                    .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
                    .unwrap_or_default(),
            );
            row
        })
        .collect();

    Table {
        columns,
        rows,
        multi,
    }
}
