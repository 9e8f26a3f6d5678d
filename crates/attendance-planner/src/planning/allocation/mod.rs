//! Preference-aware attend/skip allocation under a semester-wide budget.
//!
//! Liked subjects are attended in full. Whatever the overall target still
//! needs after that becomes a budget spent on disliked subjects, lowest
//! attendance first. Each disliked subject attends its fixed-floor minimum
//! plus as much of the outstanding budget as its remaining classes allow.
//! Neutral subjects sit outside the budget and aim for a fixed floor of their
//! own.

mod floors;

use super::domain::{
    classes_to_reach, ensure_target, percentage, AttendanceSnapshot, PlanningError,
    PreferenceTag, SubjectCategory, SubjectId, SubjectRecord,
};
use super::policy::PolicyConstants;
use floors::{build_plan, subject_minimum};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubjectAction {
    /// Nothing further to attend.
    Maintain,
    AttendMore { classes: u32 },
    AttendAll,
}

impl SubjectAction {
    pub fn summary(&self) -> String {
        match self {
            SubjectAction::Maintain => "maintain".to_string(),
            SubjectAction::AttendMore { classes } => format!("attend {classes} more"),
            SubjectAction::AttendAll => "attend all".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectAllocationPlan {
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub category: SubjectCategory,
    pub preference: PreferenceTag,
    pub current_percentage: f64,
    /// Percentage the subject is planned to finish at or above.
    pub floor_percentage: f64,
    pub minimum_to_attend: u32,
    pub action: SubjectAction,
    pub attend: u32,
    pub skip: u32,
    pub remaining: u32,
    pub projected_percentage: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PreferenceCounts {
    pub liked: usize,
    pub disliked: usize,
    pub neutral: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationPlan {
    pub target_percentage: f64,
    /// Additional classes the aggregate needs to reach the target.
    pub classes_needed_total: u32,
    pub counts: PreferenceCounts,
    pub subjects: Vec<SubjectAllocationPlan>,
    pub total_remaining: u32,
    pub total_attend: u32,
    pub total_skip: u32,
    pub final_percentage: f64,
    pub success: bool,
    /// Budget the disliked subjects could not absorb.
    pub unmet_budget: u32,
    pub hours_saved: f64,
}

impl AllocationPlan {
    pub fn plan_for(&self, id: &str) -> Option<&SubjectAllocationPlan> {
        self.subjects.iter().find(|plan| plan.subject_id.0 == id)
    }

    /// Positive when the plan clears the target, negative when it falls short.
    pub fn margin(&self) -> f64 {
        self.final_percentage - self.target_percentage
    }
}

/// Stateless allocator; every call works only from the records it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectAllocator {
    policy: PolicyConstants,
}

impl SubjectAllocator {
    pub fn new(policy: PolicyConstants) -> Self {
        Self { policy }
    }

    /// Allocates against the aggregate summed from `subjects`.
    pub fn allocate(
        &self,
        subjects: &[SubjectRecord],
        target_percentage: f64,
    ) -> Result<AllocationPlan, PlanningError> {
        let snapshot = AttendanceSnapshot::from_subjects(subjects);
        self.allocate_against(&snapshot, subjects, target_percentage)
    }

    /// Allocates against an externally tracked aggregate, which may count
    /// classes the subject records do not break down.
    pub fn allocate_against(
        &self,
        snapshot: &AttendanceSnapshot,
        subjects: &[SubjectRecord],
        target_percentage: f64,
    ) -> Result<AllocationPlan, PlanningError> {
        let target_percentage = ensure_target(target_percentage)?;
        snapshot.validate()?;
        for subject in subjects {
            subject.validate()?;
        }

        let total_remaining = subjects
            .iter()
            .fold(0u32, |acc, subject| acc.saturating_add(subject.remaining));
        let classes_needed_total = classes_to_reach(
            target_percentage,
            snapshot.total_classes,
            snapshot.attended_classes,
            total_remaining,
        );

        let mut liked = Vec::new();
        let mut disliked = Vec::new();
        let mut neutral = Vec::new();
        for subject in subjects {
            match subject.preference {
                PreferenceTag::Liked => liked.push(subject),
                PreferenceTag::Disliked => disliked.push(subject),
                PreferenceTag::Neutral => neutral.push(subject),
            }
        }

        let counts = PreferenceCounts {
            liked: liked.len(),
            disliked: disliked.len(),
            neutral: neutral.len(),
        };

        let mut plans = Vec::with_capacity(subjects.len());

        let mut liked_attend = 0u32;
        for subject in &liked {
            liked_attend = liked_attend.saturating_add(subject.remaining);
            plans.push(build_plan(subject, 100.0, subject.remaining, subject.remaining));
        }

        let mut budget = classes_needed_total.saturating_sub(liked_attend);
        debug!(
            classes_needed_total,
            liked_attend, budget, "budget left for disliked subjects"
        );

        // Stable sort: equal percentages keep record order.
        disliked.sort_by(|a, b| a.current_percentage().total_cmp(&b.current_percentage()));
        let disliked_floor = self.policy.disliked_subject_floor;
        for subject in &disliked {
            let minimum = subject_minimum(subject, disliked_floor);
            let attend = minimum.saturating_add(budget).min(subject.remaining);
            budget = budget.saturating_sub(attend);
            debug!(
                subject = %subject.id,
                minimum, attend, budget, "allocated disliked subject"
            );
            plans.push(build_plan(subject, disliked_floor, minimum, attend));
        }

        let neutral_floor = self.policy.neutral_subject_floor;
        for subject in &neutral {
            let minimum = subject_minimum(subject, neutral_floor);
            plans.push(build_plan(subject, neutral_floor, minimum, minimum));
        }

        let total_attend = plans
            .iter()
            .fold(0u32, |acc, plan| acc.saturating_add(plan.attend));
        let total_skip = total_remaining.saturating_sub(total_attend);
        let final_percentage = percentage(
            snapshot.attended_classes.saturating_add(total_attend),
            snapshot.total_classes.saturating_add(total_remaining),
        );

        Ok(AllocationPlan {
            target_percentage,
            classes_needed_total,
            counts,
            subjects: plans,
            total_remaining,
            total_attend,
            total_skip,
            final_percentage,
            success: final_percentage >= target_percentage,
            unmet_budget: budget,
            hours_saved: total_skip as f64 * self.policy.hours_per_class,
        })
    }
}
