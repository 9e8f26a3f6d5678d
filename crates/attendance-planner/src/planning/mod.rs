//! Attendance policy core: status evaluation, scenario projection, subject
//! allocation, and the strategy report that composes them.
//!
//! Everything here is synchronous and pure. Inputs arrive whole with each
//! call and nothing is cached between calls, so a builder can be shared
//! freely across concurrent requests.

pub mod allocation;
pub mod domain;
pub mod policy;
pub mod preferences;
pub mod report;
pub mod router;
pub mod scenario;
pub mod semester;
pub mod status;

#[cfg(test)]
mod tests;

pub use allocation::{
    AllocationPlan, PreferenceCounts, SubjectAction, SubjectAllocationPlan, SubjectAllocator,
};
pub use domain::{
    AttendanceSnapshot, PlanningError, PreferenceTag, SubjectCategory, SubjectId, SubjectRecord,
};
pub use policy::{PolicyConstants, PolicyNote};
pub use preferences::PreferenceProfile;
pub use report::{StrategyReport, StrategyReportBuilder, StrategyRequest, Warning, WarningLevel};
pub use router::planning_router;
pub use scenario::{ScenarioKind, ScenarioProjector, ScenarioResult, ScenarioTarget};
pub use semester::SemesterWindow;
pub use status::{AttendanceStatus, AttendanceStatusEvaluator, BonusBreakdown, BonusClaims};
