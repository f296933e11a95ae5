//! # svy-core
//!
//! Core types and error types for Surveyor.
//!
//! This crate provides the foundational types shared across all Surveyor crates:
//! - The study definition (`StudyConfig`, `Question`, eligibility filters) and
//!   its validation rules
//! - The remote `Study` handle and its status state machine
//! - `Submission` records with participant demographics
//! - Generation buckets derived from participant age
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;

pub use entities::{
    ANSWER_SEPARATOR, Answer, EligibilityFilter, FilterRange, FilterSelection, Question,
    RESERVED_FIELDS, Study, StudyConfig, Submission, UNKNOWN_GENDER,
};
pub use enums::{Generation, QuestionKind, StudyStatus, parse_age};
pub use errors::CoreError;
