//! # svy-report
//!
//! Turns fetched submissions into artifacts:
//! - a flat [`Table`] (one row per participant) and its CSV export
//! - value counts ([`Grouping`]) and cross-tabulations ([`CrossTab`])
//! - SVG bar charts per field and grouped charts per question
//! - a [`StudySummary`] with times in a display timezone
//!
//! All files go through an [`ArtifactSink`], so tests can capture output in
//! memory with [`MemorySink`].

pub mod chart;
mod error;
mod export;
pub mod group;
pub mod sink;
mod summary;
pub mod table;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use svy_core::Submission;

pub use error::ReportError;
pub use export::{export_csv, to_csv_bytes, write_csv};
pub use group::{CrossTab, GroupEntry, Grouping, cross_tab, group_by};
pub use sink::{ArtifactSink, DirectorySink, MemorySink};
pub use summary::{StudySummary, display_time, parse_timezone};
pub use table::{GENDER_COLUMN, GENERATION_COLUMN, Table, to_table};

/// Default CSV artifact name.
pub const DEFAULT_CSV_FILE: &str = "submissions.csv";
/// Default label wrap width for chart labels.
pub const DEFAULT_LABEL_WRAP: usize = 32;

/// Demographic fields that get a chart of their own and split each question.
pub const CHART_FIELDS: [&str; 2] = [GENERATION_COLUMN, GENDER_COLUMN];

/// What [`Reporter::write_report`] produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportOutput {
    pub rows: usize,
    pub artifacts: Vec<PathBuf>,
}

/// Writes tables and charts to an [`ArtifactSink`].
#[derive(Debug, Clone)]
pub struct Reporter<S> {
    sink: S,
    csv_file: String,
    label_wrap: usize,
    titles: BTreeMap<String, String>,
}

impl<S: ArtifactSink> Reporter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            csv_file: DEFAULT_CSV_FILE.to_string(),
            label_wrap: DEFAULT_LABEL_WRAP,
            titles: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_csv_file(mut self, name: impl Into<String>) -> Self {
        self.csv_file = name.into();
        self
    }

    #[must_use]
    pub fn with_label_wrap(mut self, width: usize) -> Self {
        self.label_wrap = width.max(1);
        self
    }

    /// Chart titles per field, e.g. question id → prompt. Fields without a
    /// title use their own name.
    #[must_use]
    pub fn with_titles(mut self, titles: BTreeMap<String, String>) -> Self {
        self.titles = titles;
        self
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn title(&self, field: &str) -> String {
        self.titles
            .get(field)
            .cloned()
            .unwrap_or_else(|| field.to_string())
    }

    /// Write the table as CSV under the configured file name.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Csv`] or [`ReportError::Io`].
    pub fn export_csv(&mut self, table: &Table) -> Result<PathBuf, ReportError> {
        let bytes = to_csv_bytes(table)?;
        let path = self.sink.write(&self.csv_file, &bytes)?;
        tracing::info!(path = %path.display(), rows = table.len(), "csv exported");
        Ok(path)
    }

    /// Write a bar chart of one grouping as `chart-<field>.svg`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the sink cannot store the chart.
    pub fn render_chart(&mut self, grouping: &Grouping) -> Result<PathBuf, ReportError> {
        let svg = chart::bar_chart(grouping, &self.title(&grouping.field), self.label_wrap);
        let name = format!("chart-{}.svg", file_stem(&grouping.field));
        self.sink.write(&name, svg.as_bytes())
    }

    /// Write a grouped chart of a cross tab as
    /// `chart-<column field>-by-<row field>.svg`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the sink cannot store the chart.
    pub fn render_cross_tab(&mut self, tab: &CrossTab) -> Result<PathBuf, ReportError> {
        let title = format!("{}\nby {}", self.title(&tab.column_field), tab.row_field);
        let svg = chart::grouped_bar_chart(tab, &title, self.label_wrap);
        let name = format!(
            "chart-{}-by-{}.svg",
            file_stem(&tab.column_field),
            file_stem(&tab.row_field)
        );
        self.sink.write(&name, svg.as_bytes())
    }

    /// Full report: CSV, one chart per demographic field and per question,
    /// and each question split by every demographic field.
    ///
    /// # Errors
    ///
    /// Returns the first [`ReportError`] encountered; artifacts written
    /// before the failure stay in the sink.
    pub fn write_report(&mut self, submissions: &[Submission]) -> Result<ReportOutput, ReportError> {
        let table = to_table(submissions);
        let mut artifacts = vec![self.export_csv(&table)?];

        for field in CHART_FIELDS {
            artifacts.push(self.render_chart(&group_by(&table, field)?)?);
        }
        for question in table.question_columns() {
            artifacts.push(self.render_chart(&group_by(&table, question)?)?);
            for field in CHART_FIELDS {
                artifacts.push(self.render_cross_tab(&cross_tab(&table, field, question)?)?);
            }
        }

        tracing::info!(rows = table.len(), artifacts = artifacts.len(), "report written");
        Ok(ReportOutput {
            rows: table.len(),
            artifacts,
        })
    }
}

/// File-name-safe form of a field name. Safe names pass through unchanged;
/// anything else is percent-encoded, so distinct fields never share a file.
fn file_stem(field: &str) -> String {
    if field.is_empty() {
        return "field".to_string();
    }
    urlencoding::encode(field).into_owned()
}
