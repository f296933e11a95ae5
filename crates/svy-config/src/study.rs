//! Study definition loading.

use std::path::Path;

use figment::{
    Figment,
    providers::{Format, Json, Toml, Yaml},
};
use svy_core::StudyConfig;

use crate::ConfigError;

/// Load and validate a study definition.
///
/// The format follows the file extension: `.toml`, `.yaml`/`.yml`, or
/// `.json`.
///
/// # Errors
///
/// Returns [`ConfigError::Missing`] if the file does not exist,
/// [`ConfigError::InvalidValue`] for an unsupported extension,
/// [`ConfigError::Figment`] if parsing fails, and
/// [`ConfigError::InvalidStudy`] if the definition breaks validation rules.
pub fn load_study_definition(path: &Path) -> Result<StudyConfig, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::Missing {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let figment = match extension.as_str() {
        "toml" => Figment::from(Toml::file(path)),
        "yaml" | "yml" => Figment::from(Yaml::file(path)),
        "json" => Figment::from(Json::file(path)),
        other => {
            return Err(ConfigError::InvalidValue {
                field: path.display().to_string(),
                reason: format!("unsupported study definition format '{other}'"),
            });
        }
    };

    let study: StudyConfig = figment.extract()?;
    study.validate()?;
    tracing::debug!(
        title = %study.title,
        questions = study.questions.len(),
        "loaded study definition"
    );
    Ok(study)
}
