use super::super::allocation::{AllocationPlan, SubjectAllocator};
use super::super::domain::{ensure_target, AttendanceSnapshot, PlanningError, SubjectRecord};
use super::super::policy::PolicyConstants;
use super::super::preferences::PreferenceProfile;
use super::super::scenario::{ScenarioProjector, ScenarioResult, ScenarioTarget};
use super::super::status::{AttendanceStatus, AttendanceStatusEvaluator, BonusClaims};
use super::{dispatch_warnings, StrategyReport};
use serde::Deserialize;
use tracing::info;

/// Full set of inputs for one report. Optional fields fall back to policy
/// defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StrategyRequest {
    pub snapshot: AttendanceSnapshot,
    pub subjects: Vec<SubjectRecord>,
    /// Scenario targets; the four named scenarios when absent or empty.
    #[serde(default)]
    pub targets: Vec<ScenarioTarget>,
    #[serde(default)]
    pub allocation_target: Option<f64>,
    /// Overrides the sum of the subjects' remaining classes for projections.
    #[serde(default)]
    pub remaining_classes: Option<u32>,
    #[serde(default)]
    pub preferences: PreferenceProfile,
    #[serde(default)]
    pub bonus_claims: BonusClaims,
}

impl StrategyRequest {
    pub fn new(snapshot: AttendanceSnapshot, subjects: Vec<SubjectRecord>) -> Self {
        Self {
            snapshot,
            subjects,
            targets: Vec::new(),
            allocation_target: None,
            remaining_classes: None,
            preferences: PreferenceProfile::default(),
            bonus_claims: BonusClaims::default(),
        }
    }
}

/// Composes the status evaluator, scenario projector, and subject allocator
/// into a single report. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct StrategyReportBuilder {
    policy: PolicyConstants,
    evaluator: AttendanceStatusEvaluator,
    projector: ScenarioProjector,
    allocator: SubjectAllocator,
    default_target: f64,
}

impl StrategyReportBuilder {
    pub fn new(policy: PolicyConstants) -> Self {
        Self {
            policy,
            evaluator: AttendanceStatusEvaluator::new(policy),
            projector: ScenarioProjector::new(policy),
            allocator: SubjectAllocator::new(policy),
            default_target: policy.default_allocation_target,
        }
    }

    pub fn with_default_target(mut self, target: f64) -> Result<Self, PlanningError> {
        self.default_target = ensure_target(target)?;
        Ok(self)
    }

    pub fn policy(&self) -> &PolicyConstants {
        &self.policy
    }

    pub fn default_target(&self) -> f64 {
        self.default_target
    }

    pub fn evaluate_status(
        &self,
        snapshot: &AttendanceSnapshot,
    ) -> Result<AttendanceStatus, PlanningError> {
        self.evaluator.evaluate_snapshot(snapshot)
    }

    /// Evaluates a percentage reported alongside the counts it came from.
    pub fn evaluate_reported(
        &self,
        current_percentage: f64,
        total_classes: u32,
        attended_classes: u32,
    ) -> Result<AttendanceStatus, PlanningError> {
        self.evaluator
            .evaluate(current_percentage, total_classes, attended_classes)
    }

    pub fn project_scenarios(
        &self,
        current_attended: f64,
        remaining_classes: u32,
        targets: &[ScenarioTarget],
    ) -> Result<Vec<ScenarioResult>, PlanningError> {
        self.projector
            .project_all(current_attended, remaining_classes, targets)
    }

    pub fn allocate(
        &self,
        subjects: &[SubjectRecord],
        target_percentage: Option<f64>,
    ) -> Result<AllocationPlan, PlanningError> {
        self.allocator
            .allocate(subjects, target_percentage.unwrap_or(self.default_target))
    }

    pub fn allocate_against(
        &self,
        snapshot: &AttendanceSnapshot,
        subjects: &[SubjectRecord],
        target_percentage: Option<f64>,
    ) -> Result<AllocationPlan, PlanningError> {
        self.allocator.allocate_against(
            snapshot,
            subjects,
            target_percentage.unwrap_or(self.default_target),
        )
    }

    /// Report with default allocation target and full bonus potential. An
    /// empty `targets` slice selects the four named scenarios.
    pub fn build_report(
        &self,
        snapshot: &AttendanceSnapshot,
        subjects: &[SubjectRecord],
        targets: &[ScenarioTarget],
    ) -> Result<StrategyReport, PlanningError> {
        let mut request = StrategyRequest::new(*snapshot, subjects.to_vec());
        request.targets = targets.to_vec();
        self.build(&request)
    }

    pub fn build(&self, request: &StrategyRequest) -> Result<StrategyReport, PlanningError> {
        let status = self.evaluator.evaluate_snapshot(&request.snapshot)?;
        let current_percentage = status.current_percentage;

        let subjects = if request.preferences.is_empty() {
            request.subjects.clone()
        } else {
            request.preferences.apply(&request.subjects)
        };

        let remaining_classes = request.remaining_classes.unwrap_or_else(|| {
            subjects
                .iter()
                .fold(0u32, |acc, subject| acc.saturating_add(subject.remaining))
        });

        let targets = if request.targets.is_empty() {
            ScenarioTarget::standard(current_percentage, &self.policy).to_vec()
        } else {
            request.targets.clone()
        };
        let scenarios =
            self.projector
                .project_all(current_percentage, remaining_classes, &targets)?;

        let allocation_target = request.allocation_target.unwrap_or(self.default_target);
        let allocation =
            self.allocator
                .allocate_against(&request.snapshot, &subjects, allocation_target)?;

        let bonus = self
            .evaluator
            .bonus_breakdown(current_percentage, request.bonus_claims)?;
        let warnings = dispatch_warnings(current_percentage, &self.policy);

        info!(
            current_percentage,
            subjects = subjects.len(),
            scenarios = scenarios.len(),
            final_percentage = allocation.final_percentage,
            success = allocation.success,
            "strategy report assembled"
        );

        Ok(StrategyReport {
            status,
            bonus,
            scenarios,
            allocation,
            warnings,
            policy_summary: self.policy.summary(),
        })
    }
}

impl Default for StrategyReportBuilder {
    fn default() -> Self {
        Self::new(PolicyConstants::STANDARD)
    }
}
