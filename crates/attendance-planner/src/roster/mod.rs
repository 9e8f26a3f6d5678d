//! CSV roster import.
//!
//! Attendance trackers export one row per subject with the columns
//! `Subject ID, Subject, Category, Weekly Classes, Total, Attended, Remaining,
//! Preference`. Blank category and preference cells fall back to the record
//! defaults. A blank remaining cell is projected from the weekly class count,
//! which requires a [`SemesterWindow`].

mod parser;

use crate::planning::{
    PlanningError, PreferenceTag, SemesterWindow, SubjectCategory, SubjectRecord,
};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use parser::RosterRow;

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("subject {subject}: unknown preference '{value}'")]
    UnknownPreference { subject: String, value: String },
    #[error("subject {subject}: unknown category '{value}'")]
    UnknownCategory { subject: String, value: String },
    #[error("subject {subject}: remaining classes missing and no semester window supplied")]
    MissingRemaining { subject: String },
    #[error(transparent)]
    Planning(#[from] PlanningError),
}

/// Turns roster exports into validated [`SubjectRecord`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct RosterImporter {
    window: Option<SemesterWindow>,
}

impl RosterImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Projects blank remaining cells across the weeks left in `window`.
    pub fn with_window(mut self, window: SemesterWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn import_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<SubjectRecord>, RosterImportError> {
        let file = File::open(path.as_ref())?;
        self.import_reader(file)
    }

    pub fn import_reader<R: Read>(
        &self,
        reader: R,
    ) -> Result<Vec<SubjectRecord>, RosterImportError> {
        let rows = parser::parse_rows(reader)?;
        let mut subjects = Vec::with_capacity(rows.len());

        for row in rows {
            let subject = self.to_record(row)?;
            subject.validate()?;
            subjects.push(subject);
        }

        debug!(subjects = subjects.len(), "imported roster");
        Ok(subjects)
    }

    fn to_record(&self, row: RosterRow) -> Result<SubjectRecord, RosterImportError> {
        let preference = match row.preference.as_deref() {
            Some(raw) => PreferenceTag::parse(raw).ok_or_else(|| {
                RosterImportError::UnknownPreference {
                    subject: row.subject_id.clone(),
                    value: raw.to_string(),
                }
            })?,
            None => PreferenceTag::default(),
        };

        let category = match row.category.as_deref() {
            Some(raw) => SubjectCategory::parse(raw).ok_or_else(|| {
                RosterImportError::UnknownCategory {
                    subject: row.subject_id.clone(),
                    value: raw.to_string(),
                }
            })?,
            None => SubjectCategory::default(),
        };

        let weekly_classes = row.weekly_classes.unwrap_or(0);
        let remaining = match (row.remaining, self.window) {
            (Some(remaining), _) => remaining,
            (None, Some(window)) => window.projected_remaining(weekly_classes),
            (None, None) => {
                return Err(RosterImportError::MissingRemaining {
                    subject: row.subject_id,
                })
            }
        };

        Ok(
            SubjectRecord::new(row.subject_id, row.subject, row.total, row.attended, remaining)
                .with_category(category)
                .with_weekly_classes(weekly_classes)
                .with_preference(preference),
        )
    }
}
