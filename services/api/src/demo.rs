use attendance_planner::config::{AppConfig, PlanningConfig};
use attendance_planner::error::AppError;
use attendance_planner::planning::{
    AttendanceSnapshot, PreferenceTag, SemesterWindow, StrategyReport, StrategyReportBuilder,
    StrategyRequest, SubjectAllocationPlan, SubjectCategory, SubjectRecord,
};
use attendance_planner::roster::RosterImporter;
use chrono::{Local, NaiveDate};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Roster CSV export with one row per subject
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Aggregate classes held so far (defaults to the roster sum)
    #[arg(long, requires = "attended")]
    pub(crate) total: Option<u32>,
    /// Aggregate classes attended so far (defaults to the roster sum)
    #[arg(long, requires = "total")]
    pub(crate) attended: Option<u32>,
    /// Allocation target percentage (defaults to APP_ALLOCATION_TARGET, then 70.5)
    #[arg(long)]
    pub(crate) target: Option<f64>,
    /// Last teaching day (YYYY-MM-DD), used to project blank remaining counts
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) teaching_ends: Option<NaiveDate>,
    /// Evaluation date for the projection (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date, requires = "teaching_ends")]
    pub(crate) today: Option<NaiveDate>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SnapshotSource {
    Tracked,
    Roster,
}

#[derive(Debug, Serialize)]
struct ReportOutput<'a> {
    snapshot_source: SnapshotSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    semester_window: Option<SemesterWindow>,
    report: &'a StrategyReport,
}

/// Report builder carrying the configured default allocation target.
pub(crate) fn configured_builder(
    planning: &PlanningConfig,
) -> Result<StrategyReportBuilder, AppError> {
    Ok(StrategyReportBuilder::default().with_default_target(planning.allocation_target)?)
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let ReportArgs {
        roster,
        total,
        attended,
        target,
        teaching_ends,
        today,
        json,
    } = args;

    let window = teaching_ends.map(|teaching_ends| {
        let today = today.unwrap_or_else(|| Local::now().date_naive());
        SemesterWindow::new(today, teaching_ends)
    });

    let mut importer = RosterImporter::new();
    if let Some(window) = window {
        importer = importer.with_window(window);
    }
    let subjects = importer.import_path(roster)?;

    let (snapshot, snapshot_source) = match (total, attended) {
        (Some(total), Some(attended)) => (
            AttendanceSnapshot::new(total, attended)?,
            SnapshotSource::Tracked,
        ),
        _ => (
            AttendanceSnapshot::from_subjects(&subjects),
            SnapshotSource::Roster,
        ),
    };

    let mut request = StrategyRequest::new(snapshot, subjects);
    request.allocation_target = target;

    let report = configured_builder(&config.planning)?.build(&request)?;
    if json {
        print_json(&ReportOutput {
            snapshot_source,
            semester_window: window,
            report: &report,
        })
    } else {
        render_report(&report, snapshot_source, window);
        Ok(())
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let snapshot = AttendanceSnapshot::new(240, 168)?;
    let request = StrategyRequest::new(snapshot, demo_subjects());
    let report = configured_builder(&config.planning)?.build(&request)?;

    if args.json {
        print_json(&ReportOutput {
            snapshot_source: SnapshotSource::Tracked,
            semester_window: None,
            report: &report,
        })
    } else {
        println!("Attendance planner demo");
        render_report(&report, SnapshotSource::Tracked, None);
        Ok(())
    }
}

fn print_json(output: &ReportOutput<'_>) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(output)
        .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn render_report(
    report: &StrategyReport,
    snapshot_source: SnapshotSource,
    window: Option<SemesterWindow>,
) {
    let status = &report.status;
    println!(
        "Current attendance: {}/{} classes = {:.2}%",
        status.attended_classes, status.total_classes, status.current_percentage
    );
    match snapshot_source {
        SnapshotSource::Tracked => println!("Snapshot source: tracked aggregate"),
        SnapshotSource::Roster => println!("Snapshot source: roster totals"),
    }
    if let Some(window) = window {
        println!(
            "Teaching window: {} -> {} ({} weeks remaining)",
            window.today,
            window.teaching_ends,
            window.remaining_weeks()
        );
    }

    println!(
        "Exam eligible: {} | Medical certificate required: {}",
        yes_no(status.exam_eligible),
        yes_no(status.medical_certificate_required)
    );
    println!(
        "Bonus: {} attendance + {} first four days + {} all clear = {} marks",
        report.bonus.attendance_bonus,
        report.bonus.first_four_days_bonus,
        report.bonus.all_clear_bonus,
        report.bonus.total_bonus
    );

    println!("\nWarnings");
    for warning in &report.warnings {
        println!("- [{}] {}", warning.level_label, warning.message);
    }

    println!("\nScenarios");
    for scenario in &report.scenarios {
        let reach = if scenario.feasible {
            ""
        } else {
            " (out of reach)"
        };
        println!(
            "- {} ({:.1}%): attend {} of {}, skip up to {}{}",
            scenario.label,
            scenario.target_percentage,
            scenario.required_to_attend,
            scenario.remaining_classes,
            scenario.can_skip,
            reach
        );
    }

    let allocation = &report.allocation;
    println!(
        "\nSubject plan for {:.1}% ({} liked, {} disliked, {} neutral)",
        allocation.target_percentage,
        allocation.counts.liked,
        allocation.counts.disliked,
        allocation.counts.neutral
    );
    for preference in PreferenceTag::ordered() {
        let mut group = allocation
            .subjects
            .iter()
            .filter(|plan| plan.preference == preference)
            .peekable();
        if group.peek().is_none() {
            continue;
        }
        println!("{}:", preference.label());
        for plan in group {
            println!("{}", plan_line(plan));
        }
    }

    println!(
        "\nAttend {} of {} remaining classes, skip {} (~{:.1} hours saved)",
        allocation.total_attend,
        allocation.total_remaining,
        allocation.total_skip,
        allocation.hours_saved
    );
    if allocation.success {
        println!(
            "Projected final attendance: {:.2}% ({:+.2} over target)",
            allocation.final_percentage,
            allocation.margin()
        );
    } else {
        println!(
            "Projected final attendance: {:.2}%, short of target by {:.2}",
            allocation.final_percentage,
            -allocation.margin()
        );
    }

    println!("\nPolicy");
    for note in &report.policy_summary {
        println!("- {}", note.text);
    }
}

fn plan_line(plan: &SubjectAllocationPlan) -> String {
    format!(
        "  - {} ({}) {:.1}% -> {:.1}%: {} (skip {})",
        plan.subject_name,
        plan.category.label(),
        plan.current_percentage,
        plan.projected_percentage,
        plan.action.summary(),
        plan.skip
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// A mid-semester roster: six weeks taught, ten to go.
pub(crate) fn demo_subjects() -> Vec<SubjectRecord> {
    use PreferenceTag::{Disliked, Liked, Neutral};

    let rows: [(&str, &str, u32, u32, u32, u32, PreferenceTag); 18] = [
        ("AM", "Advanced Mathematics", 3, 20, 18, 33, Liked),
        ("CN", "Computer Networks", 3, 18, 16, 30, Liked),
        ("ML", "Machine Learning", 3, 18, 17, 30, Liked),
        ("DBS", "Database Systems", 3, 18, 17, 30, Liked),
        ("ALGO", "Algorithms", 3, 18, 16, 30, Liked),
        ("DSL", "Data Structures Lab", 2, 12, 12, 20, Liked),
        ("CNL", "Computer Networks Lab", 2, 12, 11, 20, Liked),
        ("MLL", "Machine Learning Lab", 2, 12, 12, 20, Liked),
        ("DBL", "Database Systems Lab", 2, 12, 11, 20, Liked),
        ("HOI", "History of India", 3, 18, 8, 30, Disliked),
        ("EVS", "Environmental Studies", 3, 16, 7, 27, Disliked),
        ("TC", "Technical Communication", 3, 18, 10, 30, Disliked),
        ("PHY", "Physics", 3, 18, 12, 30, Disliked),
        ("PHYL", "Physics Lab", 2, 12, 8, 20, Disliked),
        ("SE", "Software Engineering", 3, 18, 15, 30, Neutral),
        ("SEL", "Software Engineering Lab", 2, 12, 10, 20, Neutral),
        ("PW", "Project Work", 2, 12, 6, 20, Disliked),
        ("SEM", "Seminar", 2, 12, 4, 20, Disliked),
    ];

    rows.into_iter()
        .map(|(id, name, weekly, total, attended, remaining, preference)| {
            let category = if matches!(id, "ML" | "MLL" | "SEM") {
                SubjectCategory::Elective
            } else {
                SubjectCategory::Core
            };
            SubjectRecord::new(id, name, total, attended, remaining)
                .with_category(category)
                .with_weekly_classes(weekly)
                .with_preference(preference)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_semester_meets_default_target() {
        let request = StrategyRequest::new(
            AttendanceSnapshot::new(240, 168).expect("valid snapshot"),
            demo_subjects(),
        );
        let report = StrategyReportBuilder::default()
            .build(&request)
            .expect("demo report builds");

        assert_eq!(report.allocation.total_remaining, 460);
        assert_eq!(report.allocation.total_attend, 426);
        assert!(report.allocation.success);
    }

    #[test]
    fn json_output_tags_snapshot_source() {
        let request = StrategyRequest::new(
            AttendanceSnapshot::new(240, 168).expect("valid snapshot"),
            demo_subjects(),
        );
        let report = StrategyReportBuilder::default()
            .build(&request)
            .expect("demo report builds");

        let value = serde_json::to_value(ReportOutput {
            snapshot_source: SnapshotSource::Tracked,
            semester_window: None,
            report: &report,
        })
        .expect("output serializes");

        assert_eq!(value["snapshot_source"], "tracked");
        assert!(value.get("semester_window").is_none());
        assert_eq!(value["report"]["allocation"]["total_attend"], 426);
    }

    #[test]
    fn configured_target_drives_demo_allocation() {
        let builder = configured_builder(&PlanningConfig {
            allocation_target: 80.0,
        })
        .expect("valid target");
        assert_eq!(builder.default_target(), 80.0);

        let request = StrategyRequest::new(
            AttendanceSnapshot::new(240, 168).expect("valid snapshot"),
            demo_subjects(),
        );
        let report = builder.build(&request).expect("demo report builds");
        assert_eq!(report.allocation.target_percentage, 80.0);
    }

    #[test]
    fn configured_target_is_validated() {
        let err = configured_builder(&PlanningConfig {
            allocation_target: 120.0,
        })
        .expect_err("target above 100");
        assert!(matches!(err, AppError::Planning(_)));
    }

    #[test]
    fn plan_line_shows_category() {
        let report = StrategyReportBuilder::default()
            .build(&StrategyRequest::new(
                AttendanceSnapshot::new(240, 168).expect("valid snapshot"),
                demo_subjects(),
            ))
            .expect("demo report builds");

        let seminar = report.allocation.plan_for("SEM").expect("seminar planned");
        assert_eq!(seminar.category, SubjectCategory::Elective);
        let line = plan_line(seminar);
        assert!(line.contains("Seminar (Elective)"));
        assert!(line.ends_with("attend all (skip 0)"));
    }
}
