//! Parsing of the study demographic export (CSV).

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::ClientError;

const PARTICIPANT: &str = "Participant id";
const AGE: &str = "Age";
const SEX: &str = "Sex";
const COMPLETED_AT: &str = "Completed at";

/// Demographics of one participant as exported by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Demographics {
    pub age: Option<String>,
    pub sex: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Parse the export into demographics keyed by participant id.
///
/// Only the participant column is required. Missing optional columns and
/// empty cells become `None`. When a participant appears twice the first row
/// wins.
pub fn parse_export(body: &str) -> Result<HashMap<String, Demographics>, ClientError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ClientError::Parse(format!("export header: {e}")))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);
    let participant_col = column(PARTICIPANT)
        .ok_or_else(|| ClientError::Parse(format!("export has no '{PARTICIPANT}' column")))?;
    let age_col = column(AGE);
    let sex_col = column(SEX);
    let completed_col = column(COMPLETED_AT);

    let mut out = HashMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| ClientError::Parse(format!("export row: {e}")))?;
        let cell = |index: Option<usize>| {
            index
                .and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
        };

        let Some(participant) = cell(Some(participant_col)) else {
            continue;
        };
        out.entry(participant).or_insert_with(|| Demographics {
            age: cell(age_col),
            sex: cell(sex_col),
            completed_at: cell(completed_col).as_deref().and_then(parse_timestamp),
        });
    }
    Ok(out)
}

/// Accept RFC 3339 or the naive `YYYY-MM-DD HH:MM:SS[.ffffff]` form (UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}
