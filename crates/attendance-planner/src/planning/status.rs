use super::domain::{ensure_percentage, AttendanceSnapshot, PlanningError};
use super::policy::PolicyConstants;
use serde::{Deserialize, Serialize};

/// Eligibility picture for one attendance snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceStatus {
    pub current_percentage: f64,
    pub total_classes: u32,
    pub attended_classes: u32,
    pub exam_eligible: bool,
    pub bonus_eligible: bool,
    pub medical_certificate_required: bool,
    pub critical_below_floor: bool,
    pub attendance_bonus: u8,
}

/// Bonus conditions that attendance counts alone cannot reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusClaims {
    #[serde(default)]
    pub attended_first_four_days: bool,
    #[serde(default)]
    pub all_subjects_clear: bool,
}

impl BonusClaims {
    /// Both claims granted, i.e. the most a student could still earn.
    pub const fn potential() -> Self {
        Self {
            attended_first_four_days: true,
            all_subjects_clear: true,
        }
    }
}

impl Default for BonusClaims {
    fn default() -> Self {
        Self::potential()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BonusBreakdown {
    pub attendance_bonus: u8,
    pub first_four_days_bonus: u8,
    pub all_clear_bonus: u8,
    pub total_bonus: u8,
}

/// Stateless evaluator that applies the policy thresholds to a snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttendanceStatusEvaluator {
    policy: PolicyConstants,
}

impl AttendanceStatusEvaluator {
    pub fn new(policy: PolicyConstants) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PolicyConstants {
        &self.policy
    }

    pub fn evaluate_snapshot(
        &self,
        snapshot: &AttendanceSnapshot,
    ) -> Result<AttendanceStatus, PlanningError> {
        self.evaluate(
            snapshot.percentage(),
            snapshot.total_classes,
            snapshot.attended_classes,
        )
    }

    pub fn evaluate(
        &self,
        current_percentage: f64,
        total_classes: u32,
        attended_classes: u32,
    ) -> Result<AttendanceStatus, PlanningError> {
        let current_percentage = ensure_percentage(current_percentage)?;
        AttendanceSnapshot::new(total_classes, attended_classes)?;

        let exam_eligible = current_percentage >= self.policy.exam_eligibility_threshold;

        Ok(AttendanceStatus {
            current_percentage,
            total_classes,
            attended_classes,
            exam_eligible,
            bonus_eligible: exam_eligible,
            medical_certificate_required: !exam_eligible,
            critical_below_floor: current_percentage < self.policy.medical_relaxation_threshold,
            attendance_bonus: self.attendance_bonus(current_percentage),
        })
    }

    /// Truncated share of the maximum attendance bonus; zero below eligibility.
    pub fn attendance_bonus(&self, current_percentage: f64) -> u8 {
        if current_percentage < self.policy.exam_eligibility_threshold {
            return 0;
        }

        let cap = self.policy.max_attendance_bonus;
        let earned = (current_percentage / 100.0 * cap as f64).floor();
        if earned >= cap as f64 {
            cap
        } else if earned <= 0.0 {
            0
        } else {
            earned as u8
        }
    }

    pub fn bonus_breakdown(
        &self,
        current_percentage: f64,
        claims: BonusClaims,
    ) -> Result<BonusBreakdown, PlanningError> {
        let current_percentage = ensure_percentage(current_percentage)?;
        let attendance_bonus = self.attendance_bonus(current_percentage);
        let eligible = current_percentage >= self.policy.exam_eligibility_threshold;

        let first_four_days_bonus = if eligible && claims.attended_first_four_days {
            self.policy.first_four_days_bonus
        } else {
            0
        };

        let all_clear_bonus = if claims.all_subjects_clear && attendance_bonus > 0 {
            self.policy.all_clear_bonus
        } else {
            0
        };

        let total_bonus = attendance_bonus
            .saturating_add(first_four_days_bonus)
            .saturating_add(all_clear_bonus)
            .min(self.policy.max_total_bonus);

        Ok(BonusBreakdown {
            attendance_bonus,
            first_four_days_bonus,
            all_clear_bonus,
            total_bonus,
        })
    }
}
