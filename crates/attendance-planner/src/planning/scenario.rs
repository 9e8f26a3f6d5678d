use super::domain::{ceil_classes, ensure_target, PlanningError};
use super::policy::PolicyConstants;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    MaintainCurrent,
    SafeBuffer,
    BonusOptimization,
    MinimumSafe,
    Custom,
}

impl ScenarioKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MaintainCurrent => "Maintain Current",
            Self::SafeBuffer => "Safe Buffer",
            Self::BonusOptimization => "Bonus Optimization",
            Self::MinimumSafe => "Minimum Safe",
            Self::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTarget {
    pub kind: ScenarioKind,
    pub target_percentage: f64,
}

impl ScenarioTarget {
    pub fn custom(target_percentage: f64) -> Self {
        Self {
            kind: ScenarioKind::Custom,
            target_percentage,
        }
    }

    /// The four named scenarios, in report order.
    pub fn standard(current_percentage: f64, policy: &PolicyConstants) -> [Self; 4] {
        [
            Self {
                kind: ScenarioKind::MaintainCurrent,
                target_percentage: current_percentage,
            },
            Self {
                kind: ScenarioKind::SafeBuffer,
                target_percentage: policy.safe_buffer_target,
            },
            Self {
                kind: ScenarioKind::BonusOptimization,
                target_percentage: policy.bonus_optimization_target,
            },
            Self {
                kind: ScenarioKind::MinimumSafe,
                target_percentage: policy.minimum_safe_target,
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub kind: ScenarioKind,
    pub label: &'static str,
    pub target_percentage: f64,
    pub remaining_classes: u32,
    pub required_to_attend: u32,
    pub can_skip: u32,
    pub final_percentage: f64,
    /// False when more classes are required than remain.
    pub feasible: bool,
}

/// Projects required attendance against a fixed baseline of classes held.
///
/// The current attended figure is read as a count out of
/// [`PolicyConstants::projection_baseline_total`] classes, so passing the
/// current percentage projects as if exactly that many classes had been held.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioProjector {
    policy: PolicyConstants,
}

impl ScenarioProjector {
    pub fn new(policy: PolicyConstants) -> Self {
        Self { policy }
    }

    pub fn project(
        &self,
        current_attended: f64,
        remaining_classes: u32,
        target: ScenarioTarget,
    ) -> Result<ScenarioResult, PlanningError> {
        let baseline = self.policy.projection_baseline_total as f64;
        if !(0.0..=baseline).contains(&current_attended) {
            return Err(PlanningError::PercentageOutOfRange {
                value: current_attended,
            });
        }
        let target_percentage = ensure_target(target.target_percentage)?;

        let total_after = baseline + remaining_classes as f64;
        let required_additional =
            (target_percentage / 100.0 * total_after - current_attended).max(0.0);
        let required_to_attend = ceil_classes(required_additional);
        let can_skip = remaining_classes.saturating_sub(required_to_attend);
        let final_percentage = (current_attended + required_additional) / total_after * 100.0;
        let feasible = required_to_attend <= remaining_classes;

        if !feasible {
            debug!(
                scenario = target.kind.label(),
                required_to_attend, remaining_classes, "scenario target is out of reach"
            );
        }

        Ok(ScenarioResult {
            kind: target.kind,
            label: target.kind.label(),
            target_percentage,
            remaining_classes,
            required_to_attend,
            can_skip,
            final_percentage,
            feasible,
        })
    }

    /// Runs each target independently; the first invalid target aborts.
    pub fn project_all(
        &self,
        current_attended: f64,
        remaining_classes: u32,
        targets: &[ScenarioTarget],
    ) -> Result<Vec<ScenarioResult>, PlanningError> {
        targets
            .iter()
            .map(|target| self.project(current_attended, remaining_classes, *target))
            .collect()
    }
}
