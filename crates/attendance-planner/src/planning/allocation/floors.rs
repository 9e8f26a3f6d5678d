use super::super::domain::{classes_to_reach, percentage, SubjectRecord};
use super::{SubjectAction, SubjectAllocationPlan};

/// Classes a subject needs to finish at `floor_pct`, clamped to what remains.
pub(crate) fn subject_minimum(subject: &SubjectRecord, floor_pct: f64) -> u32 {
    classes_to_reach(
        floor_pct,
        subject.total,
        subject.attended,
        subject.remaining,
    )
    .min(subject.remaining)
}

pub(crate) fn action_for(attend: u32, remaining: u32) -> SubjectAction {
    if remaining == 0 || attend == 0 {
        SubjectAction::Maintain
    } else if attend >= remaining {
        SubjectAction::AttendAll
    } else {
        SubjectAction::AttendMore { classes: attend }
    }
}

pub(crate) fn build_plan(
    subject: &SubjectRecord,
    floor_percentage: f64,
    minimum_to_attend: u32,
    attend: u32,
) -> SubjectAllocationPlan {
    let attend = attend.min(subject.remaining);
    let skip = subject.remaining - attend;

    SubjectAllocationPlan {
        subject_id: subject.id.clone(),
        subject_name: subject.name.clone(),
        category: subject.category,
        preference: subject.preference,
        current_percentage: subject.current_percentage(),
        floor_percentage,
        minimum_to_attend,
        action: action_for(attend, subject.remaining),
        attend,
        skip,
        remaining: subject.remaining,
        projected_percentage: percentage(
            subject.attended.saturating_add(attend),
            subject.semester_total(),
        ),
    }
}
