use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance applied before rounding class counts up, so that float noise such
/// as `0.07 * 100.0 == 7.000000000000001` never demands a phantom class.
const CEIL_TOLERANCE: f64 = 1e-9;

/// How the student feels about a subject, as resolved by an upstream
/// preference-analysis collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceTag {
    Liked,
    Disliked,
    #[default]
    Neutral,
}

impl PreferenceTag {
    pub const fn ordered() -> [Self; 3] {
        [Self::Liked, Self::Disliked, Self::Neutral]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Liked => "Liked",
            Self::Disliked => "Disliked",
            Self::Neutral => "Neutral",
        }
    }

    /// Parses loose labels such as `"Liked"` or `" disliked "`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "liked" | "like" => Some(Self::Liked),
            "disliked" | "dislike" => Some(Self::Disliked),
            "neutral" | "mixed" => Some(Self::Neutral),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectCategory {
    #[default]
    Core,
    Elective,
}

impl SubjectCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Core => "Core",
            Self::Elective => "Elective",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "core" => Some(Self::Core),
            "elective" => Some(Self::Elective),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attendance history and outlook for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub id: SubjectId,
    pub name: String,
    #[serde(default)]
    pub category: SubjectCategory,
    #[serde(default)]
    pub weekly_classes: u32,
    /// Classes held so far.
    pub total: u32,
    /// Classes attended so far.
    pub attended: u32,
    /// Classes still scheduled this semester.
    pub remaining: u32,
    #[serde(default)]
    pub preference: PreferenceTag,
}

impl SubjectRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        total: u32,
        attended: u32,
        remaining: u32,
    ) -> Self {
        Self {
            id: SubjectId(id.into()),
            name: name.into(),
            category: SubjectCategory::default(),
            weekly_classes: 0,
            total,
            attended,
            remaining,
            preference: PreferenceTag::default(),
        }
    }

    pub fn with_preference(mut self, preference: PreferenceTag) -> Self {
        self.preference = preference;
        self
    }

    pub fn with_category(mut self, category: SubjectCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_weekly_classes(mut self, weekly_classes: u32) -> Self {
        self.weekly_classes = weekly_classes;
        self
    }

    pub fn current_percentage(&self) -> f64 {
        percentage(self.attended, self.total)
    }

    /// Classes in the subject once the semester ends.
    pub fn semester_total(&self) -> u32 {
        self.total.saturating_add(self.remaining)
    }

    pub fn validate(&self) -> Result<(), PlanningError> {
        if self.attended > self.total {
            return Err(PlanningError::SubjectAttendedExceedsTotal {
                subject: self.id.clone(),
                attended: self.attended,
                total: self.total,
            });
        }
        Ok(())
    }
}

/// Aggregate attendance counts across every subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSnapshot {
    pub total_classes: u32,
    pub attended_classes: u32,
}

impl AttendanceSnapshot {
    pub fn new(total_classes: u32, attended_classes: u32) -> Result<Self, PlanningError> {
        let snapshot = Self {
            total_classes,
            attended_classes,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Sums the per-subject counts.
    pub fn from_subjects(subjects: &[SubjectRecord]) -> Self {
        subjects.iter().fold(
            Self {
                total_classes: 0,
                attended_classes: 0,
            },
            |acc, subject| Self {
                total_classes: acc.total_classes.saturating_add(subject.total),
                attended_classes: acc.attended_classes.saturating_add(subject.attended),
            },
        )
    }

    /// Attended share of classes held, `0.0` before any class has been held.
    pub fn percentage(&self) -> f64 {
        percentage(self.attended_classes, self.total_classes)
    }

    pub fn validate(&self) -> Result<(), PlanningError> {
        if self.attended_classes > self.total_classes {
            return Err(PlanningError::AttendedExceedsTotal {
                attended: self.attended_classes,
                total: self.total_classes,
            });
        }
        Ok(())
    }
}

/// Input validation failures. Every variant aborts the request without a
/// partial result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanningError {
    #[error("attendance percentage {value} must lie between 0 and 100")]
    PercentageOutOfRange { value: f64 },
    #[error("target percentage {value} must lie between 0 and 100")]
    TargetOutOfRange { value: f64 },
    #[error("attended classes ({attended}) exceed total classes ({total})")]
    AttendedExceedsTotal { attended: u32, total: u32 },
    #[error("subject {subject}: attended classes ({attended}) exceed total classes ({total})")]
    SubjectAttendedExceedsTotal {
        subject: SubjectId,
        attended: u32,
        total: u32,
    },
}

pub(crate) fn percentage(attended: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        attended as f64 / total as f64 * 100.0
    }
}

pub(crate) fn ensure_percentage(value: f64) -> Result<f64, PlanningError> {
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(PlanningError::PercentageOutOfRange { value })
    }
}

pub(crate) fn ensure_target(value: f64) -> Result<f64, PlanningError> {
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(PlanningError::TargetOutOfRange { value })
    }
}

/// Rounds a fractional class requirement up to whole classes, never below 0.
pub(crate) fn ceil_classes(value: f64) -> u32 {
    let rounded = (value - CEIL_TOLERANCE).ceil();
    if rounded <= 0.0 {
        0
    } else if rounded >= u32::MAX as f64 {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// Classes that must be attended out of `total + remaining` to finish at
/// `floor_pct`, before clamping to what is still scheduled.
pub(crate) fn classes_to_reach(floor_pct: f64, total: u32, attended: u32, remaining: u32) -> u32 {
    let semester_total = total as f64 + remaining as f64;
    ceil_classes(floor_pct / 100.0 * semester_total - attended as f64)
}
