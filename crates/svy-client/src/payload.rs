//! Request bodies and response shapes of the platform API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use svy_core::{EligibilityFilter, Study, StudyConfig, StudyStatus};
use uuid::Uuid;

use crate::error::ClientError;

/// Participants land on the survey through this URL.
const SURVEY_URL_BASE: &str = "https://prolific.com/surveys";

// ── Requests ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SurveyBody {
    pub researcher_id: String,
    pub title: String,
    pub sections: Vec<SurveySection>,
    pub questions: Vec<SurveyQuestion>,
}

#[derive(Debug, Serialize)]
pub struct SurveySection {
    pub id: String,
    pub title: String,
    pub questions: Vec<SurveyQuestion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SurveyQuestion {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub answers: Vec<SurveyAnswer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SurveyAnswer {
    pub id: String,
    pub value: String,
}

/// Survey body plus the remote → local question id map it implies.
pub struct PreparedSurvey {
    pub body: SurveyBody,
    pub question_ids: BTreeMap<String, String>,
}

/// Build the survey body, minting fresh UUIDs for the section, every
/// question, and every answer option.
#[must_use]
pub fn survey_body(researcher_id: &str, config: &StudyConfig) -> PreparedSurvey {
    let mut question_ids = BTreeMap::new();
    let questions: Vec<SurveyQuestion> = config
        .questions
        .iter()
        .map(|q| {
            let remote_id = Uuid::new_v4().to_string();
            question_ids.insert(remote_id.clone(), q.id.clone());
            SurveyQuestion {
                id: remote_id,
                title: q.prompt.clone(),
                kind: q.kind.as_str(),
                answers: q
                    .options
                    .iter()
                    .map(|option| SurveyAnswer {
                        id: Uuid::new_v4().to_string(),
                        value: option.clone(),
                    })
                    .collect(),
            }
        })
        .collect();

    PreparedSurvey {
        body: SurveyBody {
            researcher_id: researcher_id.to_string(),
            title: config.title.clone(),
            sections: vec![SurveySection {
                id: Uuid::new_v4().to_string(),
                title: config.title.clone(),
                questions: questions.clone(),
            }],
            questions,
        },
        question_ids,
    }
}

#[derive(Debug, Serialize)]
pub struct StudyBody {
    pub name: String,
    pub internal_name: String,
    pub description: String,
    pub external_study_url: String,
    pub completion_codes: Vec<CompletionCode>,
    pub estimated_completion_time: u32,
    pub max_time: u32,
    pub reward: u32,
    pub total_available_places: u32,
    pub device_compatibility: Vec<String>,
    pub peripheral_requirements: Vec<String>,
    pub privacy_notice: String,
    pub filters: Vec<EligibilityFilter>,
    pub project: String,
}

#[derive(Debug, Serialize)]
pub struct CompletionCode {
    pub code: String,
    pub code_type: &'static str,
    pub actions: Vec<CodeAction>,
}

#[derive(Debug, Serialize)]
pub struct CodeAction {
    pub action: &'static str,
}

/// Build the draft-study body linked to `survey_id`.
#[must_use]
pub fn study_body(
    config: &StudyConfig,
    survey_id: &str,
    project_id: &str,
    now: DateTime<Utc>,
) -> StudyBody {
    StudyBody {
        name: config.title.clone(),
        internal_name: config.internal_name(now),
        description: config.description.clone(),
        external_study_url: format!("{SURVEY_URL_BASE}/{survey_id}"),
        completion_codes: vec![CompletionCode {
            code: config.completion_code(now),
            code_type: "COMPLETED",
            actions: vec![CodeAction {
                action: "AUTOMATICALLY_APPROVE",
            }],
        }],
        estimated_completion_time: config.estimated_minutes,
        max_time: config.max_minutes,
        reward: config.reward_cents(),
        total_available_places: config.participants,
        device_compatibility: config.device_compatibility.clone(),
        peripheral_requirements: Vec::new(),
        privacy_notice: config.privacy_notice.clone(),
        filters: config.filters.clone(),
        project: project_id.to_string(),
    }
}

// ── Responses ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct Researcher {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatedSurvey {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ProjectPage {
    #[serde(default)]
    pub results: Vec<Project>,
}

#[derive(Debug, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// Study record as the platform returns it.
#[derive(Debug, Deserialize)]
pub struct PlatformStudy {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_available_places: Option<u32>,
    #[serde(default)]
    pub places_taken: Option<u32>,
}

impl PlatformStudy {
    fn parsed_status(&self) -> Result<StudyStatus, ClientError> {
        StudyStatus::from_platform(&self.status).ok_or_else(|| {
            ClientError::Parse(format!(
                "study {} has unknown status '{}'",
                self.id, self.status
            ))
        })
    }

    /// Turn a freshly created record into a local [`Study`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Parse`] if the id is empty or the status is
    /// unknown.
    pub fn into_new_study(
        self,
        survey_id: String,
        question_ids: BTreeMap<String, String>,
        now: DateTime<Utc>,
    ) -> Result<Study, ClientError> {
        if self.id.trim().is_empty() {
            return Err(ClientError::Parse(
                "platform returned a study without an id".to_string(),
            ));
        }
        let status = self.parsed_status()?;
        Ok(Study {
            id: self.id,
            name: self.name,
            status,
            survey_id: Some(survey_id),
            created_at: self.date_created.unwrap_or(now),
            published_at: self.published_at,
            total_available_places: self.total_available_places.unwrap_or_default(),
            places_taken: self.places_taken.unwrap_or_default(),
            question_ids,
        })
    }

    /// Overlay this record's mutable fields onto `base`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Parse`] for an unknown status, or if the
    /// record belongs to another study.
    pub fn merge_into(self, base: &Study) -> Result<Study, ClientError> {
        if self.id != base.id {
            return Err(ClientError::Parse(format!(
                "asked for study {} but received {}",
                base.id, self.id
            )));
        }
        let status = self.parsed_status()?;
        let mut study = base.clone();
        study.status = status;
        if !self.name.is_empty() {
            study.name = self.name;
        }
        study.published_at = self.published_at.or(base.published_at);
        if let Some(places) = self.total_available_places {
            study.total_available_places = places;
        }
        if let Some(taken) = self.places_taken {
            study.places_taken = taken;
        }
        Ok(study)
    }
}
