use serde::Serialize;

/// Thresholds and bonus caps published by the policy body.
///
/// A single [`PolicyConstants::STANDARD`] value is shared read-only by every
/// evaluator; nothing mutates it after start-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolicyConstants {
    /// Minimum percentage for exam eligibility and attendance bonus.
    pub exam_eligibility_threshold: f64,
    /// Minimum percentage accepted alongside a medical certificate.
    pub medical_relaxation_threshold: f64,
    /// Percentage under which an eligible student is warned to keep a buffer.
    pub caution_threshold: f64,
    pub max_attendance_bonus: u8,
    pub first_four_days_bonus: u8,
    pub all_clear_bonus: u8,
    pub max_total_bonus: u8,
    /// Overall target the allocator plans for when callers give none.
    pub default_allocation_target: f64,
    /// Fixed floor every disliked subject is held to, whatever the target.
    pub disliked_subject_floor: f64,
    /// Fixed floor for subjects the student feels neutral about.
    pub neutral_subject_floor: f64,
    pub safe_buffer_target: f64,
    pub bonus_optimization_target: f64,
    pub minimum_safe_target: f64,
    /// Assumed count of classes held so far when projecting scenarios.
    pub projection_baseline_total: u32,
    pub hours_per_class: f64,
}

impl PolicyConstants {
    pub const STANDARD: Self = Self {
        exam_eligibility_threshold: 70.0,
        medical_relaxation_threshold: 60.0,
        caution_threshold: 75.0,
        max_attendance_bonus: 15,
        first_four_days_bonus: 4,
        all_clear_bonus: 4,
        max_total_bonus: 23,
        default_allocation_target: 70.5,
        disliked_subject_floor: 70.5,
        neutral_subject_floor: 75.0,
        safe_buffer_target: 75.0,
        bonus_optimization_target: 80.0,
        minimum_safe_target: 70.1,
        projection_baseline_total: 100,
        hours_per_class: 1.5,
    };

    /// Static rule descriptions attached to every strategy report.
    pub fn summary(&self) -> Vec<PolicyNote> {
        vec![
            PolicyNote {
                key: "minimum_exam_eligibility",
                text: format!(
                    "{}% attendance is mandatory to sit the end-semester exams",
                    self.exam_eligibility_threshold
                ),
            },
            PolicyNote {
                key: "medical_relaxation",
                text: format!(
                    "{}% minimum with a valid medical certificate covering 14+ days",
                    self.medical_relaxation_threshold
                ),
            },
            PolicyNote {
                key: "bonus_structure",
                text: format!(
                    "Up to {} marks for attendance + {} for the first four days + {} if all subjects clear (max {})",
                    self.max_attendance_bonus,
                    self.first_four_days_bonus,
                    self.all_clear_bonus,
                    self.max_total_bonus
                ),
            },
            PolicyNote {
                key: "late_penalty",
                text: "Arriving more than 5 minutes late is marked absent".to_string(),
            },
            PolicyNote {
                key: "proxy_penalty",
                text: "Proxy attendance is strictly punished and can forfeit all bonus marks"
                    .to_string(),
            },
            PolicyNote {
                key: "form_deadline",
                text: format!(
                    "Attendance must stay at or above {}% until exam form submission",
                    self.exam_eligibility_threshold
                ),
            },
            PolicyNote {
                key: "final_deadline",
                text: format!(
                    "Attendance must stay at or above {}% until the end of teaching",
                    self.exam_eligibility_threshold
                ),
            },
        ]
    }
}

impl Default for PolicyConstants {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyNote {
    pub key: &'static str,
    pub text: String,
}
