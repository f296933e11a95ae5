#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::{Value, json};
use svy_client::SurveyClient;
use svy_client::mock::MockTransport;
use svy_config::ApiConfig;
use svy_core::{Study, StudyConfig, StudyStatus};

pub fn api_config() -> ApiConfig {
    ApiConfig {
        token: "test-token".into(),
        project_id: "proj-1".into(),
        ..Default::default()
    }
}

pub fn client(transport: MockTransport) -> SurveyClient<MockTransport> {
    SurveyClient::with_transport(transport, &api_config())
}

pub fn study_config() -> StudyConfig {
    serde_json::from_value(json!({
        "title": "AI in daily life",
        "description": "One quick question about AI tools",
        "reward": 0.8,
        "participants": 3,
        "questions": [
            {"id": "usage", "prompt": "How often do you use AI tools?", "type": "single",
             "options": ["Daily", "Weekly", "Never"]}
        ]
    }))
    .expect("valid fixture")
}

pub fn study_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": "AI in daily life",
        "status": status,
        "total_available_places": 3,
        "places_taken": 0
    })
}

pub fn study(status: StudyStatus) -> Study {
    Study {
        id: "st-1".into(),
        name: "AI in daily life".into(),
        status,
        survey_id: Some("sv-1".into()),
        created_at: Utc::now(),
        published_at: None,
        total_available_places: 3,
        places_taken: 0,
        question_ids: BTreeMap::from([("q-remote-1".into(), "usage".into())]),
    }
}
