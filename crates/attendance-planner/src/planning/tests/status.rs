use super::common::*;
use crate::planning::domain::PlanningError;
use crate::planning::status::{AttendanceStatusEvaluator, BonusClaims};

fn evaluator() -> AttendanceStatusEvaluator {
    AttendanceStatusEvaluator::new(policy())
}

#[test]
fn eligible_snapshot_earns_truncated_bonus() {
    let status = evaluator()
        .evaluate_snapshot(&snapshot(240, 168))
        .expect("valid snapshot");

    assert_close(status.current_percentage, 70.0);
    assert!(status.exam_eligible);
    assert!(status.bonus_eligible);
    assert!(!status.medical_certificate_required);
    assert!(!status.critical_below_floor);
    // 70% of 15 is 10.5, truncated.
    assert_eq!(status.attendance_bonus, 10);
}

#[test]
fn bonus_truncates_instead_of_rounding() {
    let evaluator = evaluator();
    assert_eq!(evaluator.attendance_bonus(79.9), 11);
    assert_eq!(evaluator.attendance_bonus(93.3), 13);
    assert_eq!(evaluator.attendance_bonus(100.0), 15);
}

#[test]
fn bonus_stays_within_cap_and_is_zero_below_threshold() {
    let evaluator = evaluator();
    for tenth in 0..=1000 {
        let pct = tenth as f64 / 10.0;
        let bonus = evaluator.attendance_bonus(pct);
        assert!(bonus <= 15, "bonus {bonus} at {pct}%");
        if pct < 70.0 {
            assert_eq!(bonus, 0, "no bonus expected at {pct}%");
        }
    }
}

#[test]
fn below_medical_floor_is_critical() {
    let status = evaluator().evaluate(55.0, 100, 55).expect("valid input");

    assert!(!status.exam_eligible);
    assert!(status.medical_certificate_required);
    assert!(status.critical_below_floor);
    assert_eq!(status.attendance_bonus, 0);
}

#[test]
fn medical_band_requires_certificate_without_critical_flag() {
    let status = evaluator().evaluate(65.0, 100, 65).expect("valid input");

    assert!(status.medical_certificate_required);
    assert!(!status.critical_below_floor);
}

#[test]
fn rejects_out_of_range_percentage() {
    let err = evaluator()
        .evaluate(101.0, 100, 100)
        .expect_err("percentage above 100");
    assert_eq!(err, PlanningError::PercentageOutOfRange { value: 101.0 });

    assert!(evaluator().evaluate(f64::NAN, 10, 5).is_err());
    assert!(evaluator().evaluate(-0.5, 10, 5).is_err());
}

#[test]
fn rejects_attended_above_total() {
    let err = evaluator()
        .evaluate(80.0, 10, 12)
        .expect_err("attended exceeds total");
    assert_eq!(
        err,
        PlanningError::AttendedExceedsTotal {
            attended: 12,
            total: 10
        }
    );
}

#[test]
fn bonus_breakdown_applies_claims() {
    let breakdown = evaluator()
        .bonus_breakdown(
            82.0,
            BonusClaims {
                attended_first_four_days: true,
                all_subjects_clear: false,
            },
        )
        .expect("valid percentage");

    assert_eq!(breakdown.attendance_bonus, 12);
    assert_eq!(breakdown.first_four_days_bonus, 4);
    assert_eq!(breakdown.all_clear_bonus, 0);
    assert_eq!(breakdown.total_bonus, 16);
}

#[test]
fn full_potential_reaches_total_cap_at_perfect_attendance() {
    let breakdown = evaluator()
        .bonus_breakdown(100.0, BonusClaims::potential())
        .expect("valid percentage");

    assert_eq!(breakdown.total_bonus, 23);
}

#[test]
fn ineligible_students_earn_no_bonus_even_with_claims() {
    let breakdown = evaluator()
        .bonus_breakdown(64.0, BonusClaims::potential())
        .expect("valid percentage");

    assert_eq!(breakdown.attendance_bonus, 0);
    assert_eq!(breakdown.first_four_days_bonus, 0);
    assert_eq!(breakdown.all_clear_bonus, 0);
    assert_eq!(breakdown.total_bonus, 0);
}
