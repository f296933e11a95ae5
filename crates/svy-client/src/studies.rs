//! Study lifecycle endpoints: create, publish, status.

use chrono::Utc;
use serde_json::json;
use svy_core::{Study, StudyConfig, StudyStatus};

use crate::error::ClientError;
use crate::payload::{
    CreatedSurvey, PlatformStudy, ProjectPage, Researcher, study_body, survey_body,
};
use crate::transport::{ApiRequest, Transport};
use crate::{SurveyClient, segment};

impl<T: Transport> SurveyClient<T> {
    /// Id of the researcher that owns the credential.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the response has no id.
    pub async fn researcher_id(&self) -> Result<String, ClientError> {
        let resp = self.call(ApiRequest::get("users/me/")).await?;
        let researcher: Researcher = resp.json("researcher")?;
        Ok(researcher.id)
    }

    /// Project new studies are filed under.
    ///
    /// Uses the configured project id; otherwise the first project of the
    /// configured workspace.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if neither is configured or the
    /// workspace has no projects.
    pub async fn resolve_project(&self) -> Result<String, ClientError> {
        if !self.project_id.is_empty() {
            return Ok(self.project_id.clone());
        }
        if self.workspace_id.is_empty() {
            return Err(ClientError::Validation(
                "a project id or workspace id is required to create a study".to_string(),
            ));
        }

        let path = format!("workspaces/{}/projects/", segment(&self.workspace_id));
        let page: ProjectPage = self.call(ApiRequest::get(path)).await?.json("projects")?;
        let project = page.results.into_iter().next().ok_or_else(|| {
            ClientError::Validation(format!(
                "workspace {} has no projects",
                self.workspace_id
            ))
        })?;
        tracing::info!(project = %project.id, title = %project.title, "using first workspace project");
        Ok(project.id)
    }

    /// Create a draft study from a study definition.
    ///
    /// Creates the survey holding the questions first, then the study that
    /// links to it. Not idempotent: every call creates a new study.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for an invalid definition (before
    /// any request), [`ClientError::Auth`] for a rejected credential, and
    /// other [`ClientError`] variants for transport or platform failures.
    pub async fn create(&self, config: &StudyConfig) -> Result<Study, ClientError> {
        config.validate()?;
        let project_id = self.resolve_project().await?;
        let researcher_id = self.researcher_id().await?;

        let prepared = survey_body(&researcher_id, config);
        let body = serde_json::to_value(&prepared.body)
            .map_err(|e| ClientError::Validation(format!("survey body: {e}")))?;
        let survey: CreatedSurvey = self
            .call(ApiRequest::post("surveys/", body))
            .await?
            .json("survey")?;
        tracing::info!(survey = %survey.id, "survey created");

        let now = Utc::now();
        let body = serde_json::to_value(study_body(config, &survey.id, &project_id, now))
            .map_err(|e| ClientError::Validation(format!("study body: {e}")))?;
        let created: PlatformStudy = self
            .call(ApiRequest::post("studies/", body))
            .await?
            .json("study")?;

        let study = created.into_new_study(survey.id, prepared.question_ids, now)?;
        if study.status != StudyStatus::Draft {
            tracing::warn!(study = %study.id, status = %study.status, "new study is not a draft");
        }
        tracing::info!(study = %study.id, "draft study created");
        Ok(study)
    }

    /// Publish a draft study.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Conflict`] if `study` is not a draft (no
    /// request is sent), if the platform refuses the transition, or if it
    /// reports a status a draft cannot move to.
    pub async fn publish(&self, study: &Study) -> Result<Study, ClientError> {
        study.ensure_publishable()?;

        let path = format!("studies/{}/transition/", segment(&study.id));
        let resp = self
            .call(ApiRequest::post(path, json!({ "action": "PUBLISH" })))
            .await?;
        let published = resp.json::<PlatformStudy>("study")?.merge_into(study)?;
        study.ensure_transition(published.status)?;
        tracing::info!(study = %published.id, status = %published.status, "study published");
        Ok(published)
    }

    /// Fetch the latest state of `study`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the response is not
    /// this study.
    pub async fn refresh(&self, study: &Study) -> Result<Study, ClientError> {
        let path = format!("studies/{}/", segment(&study.id));
        let resp = self.call(ApiRequest::get(path)).await?;
        resp.json::<PlatformStudy>("study")?.merge_into(study)
    }

    /// Current status of `study`.
    ///
    /// # Errors
    ///
    /// As [`Self::refresh`].
    pub async fn get_status(&self, study: &Study) -> Result<StudyStatus, ClientError> {
        Ok(self.refresh(study).await?.status)
    }
}
