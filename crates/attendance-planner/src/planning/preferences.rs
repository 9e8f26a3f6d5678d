use super::domain::{PreferenceTag, SubjectRecord};
use serde::{Deserialize, Serialize};

/// Liked and disliked subjects for one planning session.
///
/// Entries match a subject's id or display name, ignoring case. A subject
/// named in both lists counts as liked; subjects named in neither keep the tag
/// they arrived with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    #[serde(default)]
    pub liked: Vec<String>,
    #[serde(default)]
    pub disliked: Vec<String>,
}

impl PreferenceProfile {
    pub fn is_empty(&self) -> bool {
        self.liked.is_empty() && self.disliked.is_empty()
    }

    pub fn resolve(&self, subject: &SubjectRecord) -> Option<PreferenceTag> {
        if matches_any(&self.liked, subject) {
            Some(PreferenceTag::Liked)
        } else if matches_any(&self.disliked, subject) {
            Some(PreferenceTag::Disliked)
        } else {
            None
        }
    }

    /// Returns copies of `subjects` with this profile's tags applied.
    pub fn apply(&self, subjects: &[SubjectRecord]) -> Vec<SubjectRecord> {
        subjects
            .iter()
            .map(|subject| match self.resolve(subject) {
                Some(tag) => subject.clone().with_preference(tag),
                None => subject.clone(),
            })
            .collect()
    }
}

fn matches_any(entries: &[String], subject: &SubjectRecord) -> bool {
    entries.iter().any(|entry| {
        let entry = entry.trim();
        entry.eq_ignore_ascii_case(&subject.id.0) || entry.eq_ignore_ascii_case(&subject.name)
    })
}
