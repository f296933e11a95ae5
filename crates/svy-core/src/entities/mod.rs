mod study;
mod study_config;
mod submission;

pub use study::Study;
pub use study_config::{EligibilityFilter, FilterRange, FilterSelection, Question, StudyConfig};
pub use submission::{ANSWER_SEPARATOR, Answer, RESERVED_FIELDS, Submission, UNKNOWN_GENDER};
