//! Headline numbers for a study, with times in a display timezone.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use svy_core::{Study, Submission};

use crate::error::ReportError;

const DISPLAY_FORMAT: &str = "%d %b %Y, %I:%M %p %Z";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudySummary {
    pub id: String,
    pub name: String,
    pub status: String,
    pub total_places: u32,
    pub places_taken: u32,
    pub submissions: usize,
    pub timezone: String,
    /// Publication time in the display timezone.
    pub published_at: Option<String>,
    /// Most recent completion in the display timezone.
    pub last_completion: Option<String>,
    /// Whole minutes from publication to the last completion.
    pub elapsed_minutes: Option<i64>,
}

/// Parse an IANA zone name such as `America/Los_Angeles`.
///
/// # Errors
///
/// Returns [`ReportError::InvalidTimezone`] for unknown names.
pub fn parse_timezone(name: &str) -> Result<Tz, ReportError> {
    name.parse::<Tz>()
        .map_err(|_| ReportError::InvalidTimezone(name.to_string()))
}

/// Format a UTC instant in `tz`, e.g. `29 Sep 2025, 06:08 AM PDT`.
#[must_use]
pub fn display_time(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format(DISPLAY_FORMAT).to_string()
}

impl StudySummary {
    /// Summarize `study` and the submissions fetched for it.
    ///
    /// Elapsed time is measured in UTC so daylight-saving shifts in the
    /// display zone do not skew it.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidTimezone`] if `timezone` is not a known
    /// zone.
    pub fn build(study: &Study, submissions: &[Submission], timezone: &str) -> Result<Self, ReportError> {
        let tz = parse_timezone(timezone)?;
        let last = submissions.iter().filter_map(|s| s.completed_at).max();
        let elapsed_minutes = match (study.published_at, last) {
            (Some(start), Some(end)) => Some(round_minutes(end - start)),
            _ => None,
        };

        Ok(Self {
            id: study.id.clone(),
            name: study.name.clone(),
            status: study.status.as_platform_str().to_string(),
            total_places: study.total_available_places,
            places_taken: study.places_taken,
            submissions: submissions.len(),
            timezone: tz.name().to_string(),
            published_at: study.published_at.map(|t| display_time(t, tz)),
            last_completion: last.map(|t| display_time(t, tz)),
            elapsed_minutes,
        })
    }

    /// Label/value pairs in display order.
    #[must_use]
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        vec![
            ("Study", self.name.clone()),
            ("ID", self.id.clone()),
            ("Status", self.status.clone()),
            ("Total places", self.total_places.to_string()),
            ("Places taken", self.places_taken.to_string()),
            ("Submissions", self.submissions.to_string()),
            ("Published at", or_dash(&self.published_at)),
            ("Last response at", or_dash(&self.last_completion)),
            (
                "Time elapsed",
                self.elapsed_minutes
                    .map_or_else(|| "-".to_string(), |m| format!("{m} minutes")),
            ),
        ]
    }
}

fn round_minutes(duration: chrono::Duration) -> i64 {
    let seconds = duration.num_seconds();
    (seconds + 30).div_euclid(60)
}
