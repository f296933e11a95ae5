//! Value counts and cross-tabulations over table columns.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use svy_core::Generation;

use crate::error::ReportError;
use crate::table::{GENERATION_COLUMN, Table};

/// Label used for empty cells.
pub const MISSING_VALUE: &str = "(no answer)";

/// Counts of each distinct value in one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grouping {
    pub field: String,
    pub total: usize,
    pub counts: BTreeMap<String, usize>,
}

/// One row of a [`Grouping`] in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupEntry {
    pub value: String,
    pub count: usize,
    pub percentage: f64,
}

impl Grouping {
    /// Share of `value` in percent; `0.0` for an empty grouping.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self, value: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count = self.counts.get(value).copied().unwrap_or(0);
        count as f64 * 100.0 / self.total as f64
    }

    /// Entries in display order: age order for generations, otherwise most
    /// frequent first with ties broken alphabetically.
    #[must_use]
    pub fn entries(&self) -> Vec<GroupEntry> {
        let mut values: Vec<&String> = self.counts.keys().collect();
        values.sort_by(|a, b| compare_values(&self.field, a, b, &self.counts));
        values
            .into_iter()
            .map(|value| GroupEntry {
                value: value.clone(),
                count: self.counts[value],
                percentage: self.percentage(value),
            })
            .collect()
    }
}

/// Count each distinct value of `field`. Empty cells count as
/// [`MISSING_VALUE`], so counts always sum to the row count.
///
/// # Errors
///
/// Returns [`ReportError::UnknownField`] if `field` is not a column.
pub fn group_by(table: &Table, field: &str) -> Result<Grouping, ReportError> {
    let mut counts = BTreeMap::new();
    for value in table.column(field)? {
        *counts.entry(cell_label(value)).or_insert(0) += 1;
    }
    Ok(Grouping {
        field: field.to_string(),
        total: table.len(),
        counts,
    })
}

/// Counts for every (row value, column value) pair of two fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    pub row_field: String,
    pub column_field: String,
    /// Row values in display order.
    pub row_values: Vec<String>,
    /// Column values in display order.
    pub column_values: Vec<String>,
    /// `counts[r][c]` pairs `row_values[r]` with `column_values[c]`.
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    /// Count for one pair, `0` if either value is absent.
    #[must_use]
    pub fn count(&self, row_value: &str, column_value: &str) -> usize {
        let row = self.row_values.iter().position(|v| v == row_value);
        let column = self.column_values.iter().position(|v| v == column_value);
        match (row, column) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    /// Sum of all cells: one per (row, answer) pair. Exceeds the table's row
    /// count when column cells hold several answers.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    #[must_use]
    pub fn max_count(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Cross-tabulate two columns, e.g. answers by generation.
///
/// Multi-answer cells are counted once per listed answer when they sit in
/// the column field, so a participant choosing two options contributes to
/// both.
///
/// # Errors
///
/// Returns [`ReportError::UnknownField`] if either field is not a column.
pub fn cross_tab(table: &Table, row_field: &str, column_field: &str) -> Result<CrossTab, ReportError> {
    let rows = table.column(row_field)?;
    let columns = table.answers(column_field)?;

    let mut pairs: BTreeMap<(String, String), usize> = BTreeMap::new();
    let mut row_totals: BTreeMap<String, usize> = BTreeMap::new();
    let mut column_totals: BTreeMap<String, usize> = BTreeMap::new();
    for (row, column) in rows.into_iter().zip(columns) {
        let row = cell_label(row);
        for column in column.into_iter().map(cell_label) {
            *pairs.entry((row.clone(), column.clone())).or_insert(0) += 1;
            *row_totals.entry(row.clone()).or_insert(0) += 1;
            *column_totals.entry(column).or_insert(0) += 1;
        }
    }

    let row_values = ordered(row_field, &row_totals);
    let column_values = ordered(column_field, &column_totals);
    let counts = row_values
        .iter()
        .map(|r| {
            column_values
                .iter()
                .map(|c| pairs.get(&(r.clone(), c.clone())).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    Ok(CrossTab {
        row_field: row_field.to_string(),
        column_field: column_field.to_string(),
        row_values,
        column_values,
        counts,
    })
}

fn cell_label(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        MISSING_VALUE.to_string()
    } else {
        trimmed.to_string()
    }
}

fn ordered(field: &str, totals: &BTreeMap<String, usize>) -> Vec<String> {
    let mut values: Vec<&String> = totals.keys().collect();
    values.sort_by(|a, b| compare_values(field, a, b, totals));
    values.into_iter().cloned().collect()
}

fn compare_values(field: &str, a: &str, b: &str, counts: &BTreeMap<String, usize>) -> Ordering {
    if field == GENERATION_COLUMN {
        let rank = |label: &str| Generation::from_label(label).unwrap_or(Generation::Unknown);
        return rank(a).cmp(&rank(b)).then_with(|| a.cmp(b));
    }
    let count = |value: &str| counts.get(value).copied().unwrap_or(0);
    count(b).cmp(&count(a)).then_with(|| a.cmp(b))
}
