//! Status enums and classification types for Surveyor.
//!
//! Local serialization is `snake_case`. The survey platform speaks its own
//! upper-case vocabulary, so [`StudyStatus`] carries explicit conversions to
//! and from the wire strings.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// StudyStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a study on the survey platform.
///
/// ```text
/// draft → scheduled → publishing → active → awaiting_review → completed
///       → publishing             ↘ paused ↗                 ↘ active
///       → active                          → stopped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyStatus {
    Draft,
    Scheduled,
    Publishing,
    Active,
    Paused,
    AwaitingReview,
    Completed,
    Stopped,
}

impl StudyStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Scheduled, Self::Publishing, Self::Active],
            Self::Scheduled => &[Self::Publishing, Self::Active],
            Self::Publishing => &[Self::Active],
            Self::Active => &[
                Self::Paused,
                Self::AwaitingReview,
                Self::Completed,
                Self::Stopped,
            ],
            Self::Paused => &[Self::Active, Self::Stopped],
            Self::AwaitingReview => &[Self::Active, Self::Completed],
            Self::Completed | Self::Stopped => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether polling can stop: no further submissions will arrive.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Stopped)
    }

    /// Whether the study has left the draft state.
    #[must_use]
    pub const fn is_published(self) -> bool {
        !matches!(self, Self::Draft)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Publishing => "publishing",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::AwaitingReview => "awaiting_review",
            Self::Completed => "completed",
            Self::Stopped => "stopped",
        }
    }

    /// The status string used by the platform API.
    #[must_use]
    pub const fn as_platform_str(self) -> &'static str {
        match self {
            Self::Draft => "UNPUBLISHED",
            Self::Scheduled => "SCHEDULED",
            Self::Publishing => "PUBLISHING",
            Self::Active => "ACTIVE",
            Self::Paused => "PAUSED",
            Self::AwaitingReview => "AWAITING REVIEW",
            Self::Completed => "COMPLETED",
            Self::Stopped => "STOPPED",
        }
    }

    /// Parse a platform status string. Case-insensitive; `_` and space are
    /// treated alike (`AWAITING_REVIEW` and `AWAITING REVIEW` both match).
    #[must_use]
    pub fn from_platform(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_uppercase().replace('_', " ");
        let status = match normalized.as_str() {
            "UNPUBLISHED" | "DRAFT" => Self::Draft,
            "SCHEDULED" => Self::Scheduled,
            "PUBLISHING" => Self::Publishing,
            "ACTIVE" => Self::Active,
            "PAUSED" => Self::Paused,
            "AWAITING REVIEW" => Self::AwaitingReview,
            "COMPLETED" => Self::Completed,
            "STOPPED" => Self::Stopped,
            _ => return None,
        };
        Some(status)
    }
}

impl fmt::Display for StudyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// QuestionKind
// ---------------------------------------------------------------------------

/// Answer type of a survey question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[serde(alias = "single_choice", alias = "single-choice")]
    Single,
    #[serde(alias = "multi", alias = "multi_choice", alias = "multi-choice")]
    Multiple,
    #[serde(alias = "free_text", alias = "free-text")]
    Text,
}

impl QuestionKind {
    /// Whether answers are picked from a fixed option list.
    #[must_use]
    pub const fn has_options(self) -> bool {
        matches!(self, Self::Single | Self::Multiple)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generation bucket derived from a participant's age.
///
/// Variants are declared in age order so `Ord` sorts youngest first, with
/// `Unknown` last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Generation {
    GenAlpha,
    GenZ,
    Millennial,
    GenX,
    BabyBoomer,
    Silent,
    Unknown,
}

impl Generation {
    /// All buckets in display order.
    pub const ALL: [Self; 7] = [
        Self::GenAlpha,
        Self::GenZ,
        Self::Millennial,
        Self::GenX,
        Self::BabyBoomer,
        Self::Silent,
        Self::Unknown,
    ];

    /// Bucket for an age in whole years.
    #[must_use]
    pub const fn from_age(age: u32) -> Self {
        match age {
            0..=17 => Self::GenAlpha,
            18..=27 => Self::GenZ,
            28..=43 => Self::Millennial,
            44..=59 => Self::GenX,
            60..=78 => Self::BabyBoomer,
            _ => Self::Silent,
        }
    }

    /// Bucket for a raw age cell such as `"34"` or `"34.0"`.
    ///
    /// Fractional ages are truncated. Anything that is not a finite,
    /// non-negative number maps to [`Generation::Unknown`].
    #[must_use]
    pub fn from_age_text(raw: &str) -> Self {
        parse_age(raw).map_or(Self::Unknown, Self::from_age)
    }

    /// Human-readable label with the age range.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GenAlpha => "Gen Alpha (under 18)",
            Self::GenZ => "Gen Z (18-27)",
            Self::Millennial => "Millennial (28-43)",
            Self::GenX => "Gen X (44-59)",
            Self::BabyBoomer => "Baby Boomer (60-78)",
            Self::Silent => "Silent Generation (79+)",
            Self::Unknown => "Unknown",
        }
    }

    /// Inverse of [`Generation::label`].
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.label() == label)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse an age cell into whole years.
#[must_use]
pub fn parse_age(raw: &str) -> Option<u32> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(value.trunc() as u32)
}
