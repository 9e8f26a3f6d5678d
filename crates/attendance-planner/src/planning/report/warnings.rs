use super::super::policy::PolicyConstants;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningLevel {
    Critical,
    MedicalCertificate,
    Caution,
    Eligible,
}

impl WarningLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::MedicalCertificate => "Warning",
            Self::Caution => "Caution",
            Self::Eligible => "Safe",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    pub level: WarningLevel,
    pub level_label: &'static str,
    pub message: String,
}

/// One row of the severity band: fires when the percentage is below `below`.
struct SeverityBand {
    below: f64,
    level: WarningLevel,
    message: String,
}

fn severity_bands(policy: &PolicyConstants) -> [SeverityBand; 3] {
    [
        SeverityBand {
            below: policy.medical_relaxation_threshold,
            level: WarningLevel::Critical,
            message: format!(
                "Below {}%: exam eligibility at risk even with a medical certificate",
                policy.medical_relaxation_threshold
            ),
        },
        SeverityBand {
            below: policy.exam_eligibility_threshold,
            level: WarningLevel::MedicalCertificate,
            message: format!(
                "Below {}%: a medical certificate or immediate improvement is required",
                policy.exam_eligibility_threshold
            ),
        },
        SeverityBand {
            below: policy.caution_threshold,
            level: WarningLevel::Caution,
            message: "Close to the danger zone: monitor carefully and keep a buffer".to_string(),
        },
    ]
}

/// At most one band message (first matching row wins), then the eligibility
/// message whenever the exam threshold is met. Percentages between the exam
/// and caution thresholds therefore produce two messages.
pub(crate) fn dispatch_warnings(current_percentage: f64, policy: &PolicyConstants) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if let Some(band) = severity_bands(policy)
        .into_iter()
        .find(|band| current_percentage < band.below)
    {
        warnings.push(Warning {
            level: band.level,
            level_label: band.level.label(),
            message: band.message,
        });
    }

    if current_percentage >= policy.exam_eligibility_threshold {
        warnings.push(Warning {
            level: WarningLevel::Eligible,
            level_label: WarningLevel::Eligible.label(),
            message: "Currently eligible for exams and bonus marks".to_string(),
        });
    }

    warnings
}
