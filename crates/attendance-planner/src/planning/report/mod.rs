mod builder;
mod warnings;

pub use builder::{StrategyReportBuilder, StrategyRequest};
pub use warnings::{Warning, WarningLevel};

pub(crate) use warnings::dispatch_warnings;

use super::allocation::AllocationPlan;
use super::policy::PolicyNote;
use super::scenario::ScenarioResult;
use super::status::{AttendanceStatus, BonusBreakdown};
use serde::Serialize;

/// Everything a student needs to plan the rest of the semester.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyReport {
    pub status: AttendanceStatus,
    pub bonus: BonusBreakdown,
    pub scenarios: Vec<ScenarioResult>,
    pub allocation: AllocationPlan,
    pub warnings: Vec<Warning>,
    pub policy_summary: Vec<PolicyNote>,
}

impl StrategyReport {
    pub fn infeasible_scenarios(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.scenarios.iter().filter(|scenario| !scenario.feasible)
    }
}
