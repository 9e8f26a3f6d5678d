use axum::response::Response;
use serde_json::Value;
use std::sync::Arc;

use crate::planning::domain::{AttendanceSnapshot, PreferenceTag, SubjectRecord};
use crate::planning::report::StrategyReportBuilder;
use crate::planning::{planning_router, PolicyConstants};

pub(super) const TOLERANCE: f64 = 1e-6;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn policy() -> PolicyConstants {
    PolicyConstants::STANDARD
}

pub(super) fn builder() -> StrategyReportBuilder {
    StrategyReportBuilder::new(policy())
}

pub(super) fn router() -> axum::Router {
    planning_router(Arc::new(builder()))
}

pub(super) fn liked(id: &str, total: u32, attended: u32, remaining: u32) -> SubjectRecord {
    SubjectRecord::new(id, id, total, attended, remaining).with_preference(PreferenceTag::Liked)
}

pub(super) fn disliked(id: &str, total: u32, attended: u32, remaining: u32) -> SubjectRecord {
    SubjectRecord::new(id, id, total, attended, remaining)
        .with_preference(PreferenceTag::Disliked)
}

pub(super) fn neutral(id: &str, total: u32, attended: u32, remaining: u32) -> SubjectRecord {
    SubjectRecord::new(id, id, total, attended, remaining)
}

/// A semester with every preference represented and a budget the disliked
/// subjects can absorb.
pub(super) fn semester_subjects() -> Vec<SubjectRecord> {
    vec![
        liked("MATH", 20, 18, 33),
        liked("NET", 18, 16, 30),
        disliked("HIST", 18, 8, 30),
        disliked("SEM", 12, 4, 20),
        disliked("PHY", 18, 12, 30),
        neutral("SE", 18, 15, 30),
    ]
}

pub(super) fn snapshot(total: u32, attended: u32) -> AttendanceSnapshot {
    AttendanceSnapshot::new(total, attended).expect("valid snapshot")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
