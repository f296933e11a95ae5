use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::StudyStatus;
use crate::errors::CoreError;

/// Local handle on a study that exists on the survey platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Study {
    /// Platform-assigned identifier. Never empty once created.
    pub id: String,
    pub name: String,
    pub status: StudyStatus,
    /// Survey that holds the questions, if the study was created by us.
    pub survey_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub total_available_places: u32,
    pub places_taken: u32,
    /// Remote question UUID → local question id.
    #[serde(default)]
    pub question_ids: BTreeMap<String, String>,
}

impl Study {
    /// Fail unless the study is still a draft.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] when the study has already
    /// left the draft state.
    pub fn ensure_publishable(&self) -> Result<(), CoreError> {
        if self.status.is_published() {
            return Err(self.transition_error(StudyStatus::Publishing));
        }
        Ok(())
    }

    /// Fail unless the state machine allows moving to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] for a disallowed move.
    pub fn ensure_transition(&self, next: StudyStatus) -> Result<(), CoreError> {
        if self.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(self.transition_error(next))
        }
    }

    fn transition_error(&self, next: StudyStatus) -> CoreError {
        CoreError::InvalidTransition {
            id: self.id.clone(),
            from: self.status.to_string(),
            to: next.to_string(),
        }
    }

    /// Local question id for a remote question UUID.
    #[must_use]
    pub fn local_question_id(&self, remote_id: &str) -> Option<&str> {
        self.question_ids.get(remote_id).map(String::as_str)
    }

    /// Fraction of places filled, `0.0..=1.0`.
    #[must_use]
    pub fn fill_ratio(&self) -> f64 {
        if self.total_available_places == 0 {
            return 0.0;
        }
        (f64::from(self.places_taken) / f64::from(self.total_available_places)).min(1.0)
    }
}
