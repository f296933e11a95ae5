//! Submission retrieval: paginated survey responses + demographic export.

use std::collections::HashSet;

use serde::Deserialize;
use svy_core::{
    Answer, Generation, RESERVED_FIELDS, Study, Submission, UNKNOWN_GENDER, parse_age,
};

use crate::error::ClientError;
use crate::export::{Demographics, parse_export};
use crate::transport::{ApiRequest, Transport};
use crate::{SurveyClient, segment};

/// Upper bound on pages fetched for one study.
const MAX_PAGES: u32 = 1_000;

#[derive(Debug, Deserialize)]
struct ResponsePage {
    #[serde(default)]
    results: Vec<SurveyResponse>,
    #[serde(rename = "_links", default)]
    links: Links,
}

#[derive(Debug, Default, Deserialize)]
struct Links {
    #[serde(default)]
    next: Option<Link>,
}

#[derive(Debug, Deserialize)]
struct Link {
    #[serde(default)]
    href: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SurveyResponse {
    participant_id: String,
    #[serde(default)]
    sections: Vec<ResponseSection>,
}

#[derive(Debug, Deserialize)]
struct ResponseSection {
    #[serde(default)]
    questions: Vec<ResponseQuestion>,
}

#[derive(Debug, Deserialize)]
struct ResponseQuestion {
    question_id: String,
    #[serde(default)]
    answers: Vec<ResponseAnswer>,
}

#[derive(Debug, Deserialize)]
struct ResponseAnswer {
    value: String,
}

impl ResponsePage {
    fn has_next(&self) -> bool {
        self.links
            .next
            .as_ref()
            .and_then(|link| link.href.as_deref())
            .is_some_and(|href| !href.is_empty())
    }
}

impl<T: Transport> SurveyClient<T> {
    /// Fetch every submission of `study`.
    ///
    /// Pages through the survey responses until the platform reports no next
    /// page, then joins the demographic export by participant id.
    /// Participants missing from the export get `Unknown` demographics.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the study has no linked survey
    /// or a response answers a question the study never asked, and other
    /// [`ClientError`] variants for transport or parse failures.
    pub async fn get_submissions(&self, study: &Study) -> Result<Vec<Submission>, ClientError> {
        let survey_id = study.survey_id.as_deref().ok_or_else(|| {
            ClientError::Validation(format!("study {} has no linked survey", study.id))
        })?;

        let responses = self.fetch_responses(survey_id).await?;
        let export_path = format!("studies/{}/export/", segment(&study.id));
        let demographics = parse_export(&self.call(ApiRequest::get(export_path)).await?.body)?;

        let mut seen = HashSet::new();
        let mut submissions = Vec::with_capacity(responses.len());
        for response in responses {
            if !seen.insert(response.participant_id.clone()) {
                tracing::warn!(participant = %response.participant_id, "duplicate response ignored");
                continue;
            }
            let answers = map_answers(study, &response)?;
            let demo = demographics
                .get(&response.participant_id)
                .cloned()
                .unwrap_or_else(|| {
                    tracing::warn!(participant = %response.participant_id, "no demographics in export");
                    Demographics::default()
                });
            submissions.push(build_submission(response.participant_id, answers, demo));
        }

        tracing::info!(study = %study.id, count = submissions.len(), "submissions fetched");
        Ok(submissions)
    }

    async fn fetch_responses(&self, survey_id: &str) -> Result<Vec<SurveyResponse>, ClientError> {
        let mut responses = Vec::new();
        for page in 1..=MAX_PAGES {
            let path = format!(
                "surveys/{}/responses/?page={page}&page_size={}",
                segment(survey_id),
                self.page_size
            );
            let data: ResponsePage = self.call(ApiRequest::get(path)).await?.json("responses")?;
            let more = data.has_next() && !data.results.is_empty();
            responses.extend(data.results);
            if !more {
                return Ok(responses);
            }
        }
        tracing::warn!(survey = survey_id, pages = MAX_PAGES, "page limit reached");
        Ok(responses)
    }
}

fn map_answers(study: &Study, response: &SurveyResponse) -> Result<Vec<Answer>, ClientError> {
    response
        .sections
        .iter()
        .flat_map(|section| &section.questions)
        .map(|question| {
            Ok(Answer {
                question_id: local_id(study, response, &question.question_id)?,
                values: question.answers.iter().map(|a| a.value.clone()).collect(),
            })
        })
        .collect()
}

/// Local id for a remote question. Without a mapping the remote id is kept,
/// unless it would shadow a report column.
fn local_id(study: &Study, response: &SurveyResponse, remote: &str) -> Result<String, ClientError> {
    let local = if study.question_ids.is_empty() {
        Some(remote).filter(|id| !RESERVED_FIELDS.contains(id))
    } else {
        study.local_question_id(remote)
    };
    local.map(ToString::to_string).ok_or_else(|| {
        ClientError::Validation(format!(
            "response from {} answers unknown question {remote}",
            response.participant_id
        ))
    })
}

fn build_submission(participant_id: String, answers: Vec<Answer>, demo: Demographics) -> Submission {
    let age = demo.age.as_deref().and_then(parse_age);
    Submission {
        participant_id,
        answers,
        generation: demo
            .age
            .as_deref()
            .map_or(Generation::Unknown, Generation::from_age_text),
        gender: demo.sex.unwrap_or_else(|| UNKNOWN_GENDER.to_string()),
        age,
        completed_at: demo.completed_at,
    }
}
