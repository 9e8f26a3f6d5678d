use attendance_planner::planning::{
    AttendanceSnapshot, PreferenceTag, ScenarioKind, StrategyReportBuilder, StrategyRequest,
    SubjectAction, SubjectRecord, WarningLevel,
};
use attendance_planner::roster::RosterImporter;
use std::path::PathBuf;

fn semester_roster() -> Vec<SubjectRecord> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/semester_roster.csv");
    RosterImporter::new()
        .import_path(path)
        .expect("fixture roster imports")
}

fn tracked_snapshot() -> AttendanceSnapshot {
    AttendanceSnapshot::new(240, 168).expect("valid snapshot")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn semester_report_balances_preferences_against_target() {
    let builder = StrategyReportBuilder::default();
    let report = builder
        .build(&StrategyRequest::new(tracked_snapshot(), semester_roster()))
        .expect("report builds");

    assert_close(report.status.current_percentage, 70.0);
    assert!(report.status.exam_eligible);
    assert_eq!(report.status.attendance_bonus, 10);

    let allocation = &report.allocation;
    assert_eq!(allocation.total_remaining, 460);
    assert_eq!(allocation.classes_needed_total, 326);
    assert_eq!(allocation.counts.liked, 9);
    assert_eq!(allocation.counts.disliked, 7);
    assert_eq!(allocation.counts.neutral, 2);
    assert_eq!(allocation.total_attend, 426);
    assert_eq!(allocation.total_skip, 34);
    assert_close(allocation.final_percentage, 594.0 / 700.0 * 100.0);
    assert!(allocation.success);
    assert_close(allocation.hours_saved, 51.0);

    let disliked_order: Vec<_> = allocation
        .subjects
        .iter()
        .filter(|plan| plan.preference == PreferenceTag::Disliked)
        .map(|plan| (plan.subject_id.0.as_str(), plan.attend, plan.skip))
        .collect();
    assert_eq!(
        disliked_order,
        vec![
            ("SEM", 20, 0),
            ("EVS", 27, 0),
            ("HOI", 30, 0),
            ("PW", 20, 0),
            ("TC", 24, 6),
            ("PHY", 22, 8),
            ("PHYL", 15, 5),
        ]
    );

    let software = allocation.plan_for("SE").expect("software engineering planned");
    assert_eq!(software.attend, 21);
    assert_eq!(software.action, SubjectAction::AttendMore { classes: 21 });

    let levels: Vec<_> = report.warnings.iter().map(|w| w.level).collect();
    assert_eq!(levels, vec![WarningLevel::Caution, WarningLevel::Eligible]);
}

#[test]
fn semester_scenarios_project_remaining_roster() {
    let builder = StrategyReportBuilder::default();
    let report = builder
        .build(&StrategyRequest::new(tracked_snapshot(), semester_roster()))
        .expect("report builds");

    let projections: Vec<_> = report
        .scenarios
        .iter()
        .map(|s| (s.kind, s.required_to_attend, s.can_skip))
        .collect();
    assert_eq!(
        projections,
        vec![
            (ScenarioKind::MaintainCurrent, 322, 138),
            (ScenarioKind::SafeBuffer, 350, 110),
            (ScenarioKind::BonusOptimization, 378, 82),
            (ScenarioKind::MinimumSafe, 323, 137),
        ]
    );
    assert_eq!(report.infeasible_scenarios().count(), 0);
}

#[test]
fn projection_against_term_remaining_matches_published_figures() {
    let builder = StrategyReportBuilder::default();
    let mut request = StrategyRequest::new(tracked_snapshot(), semester_roster());
    request.remaining_classes = Some(190);

    let report = builder.build(&request).expect("report builds");

    let safe_buffer = &report.scenarios[1];
    assert_eq!(safe_buffer.kind, ScenarioKind::SafeBuffer);
    assert_eq!(safe_buffer.required_to_attend, 148);
    assert_eq!(safe_buffer.can_skip, 42);
}

#[test]
fn policy_summary_lists_every_rule() {
    let report = StrategyReportBuilder::default()
        .build(&StrategyRequest::new(tracked_snapshot(), semester_roster()))
        .expect("report builds");

    assert_eq!(report.policy_summary.len(), 7);
    assert!(report
        .policy_summary
        .iter()
        .any(|note| note.text.contains("70%")));
}
