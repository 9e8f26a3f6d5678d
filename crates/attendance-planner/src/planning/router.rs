use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::domain::{AttendanceSnapshot, PlanningError, SubjectRecord};
use super::preferences::PreferenceProfile;
use super::report::{StrategyReportBuilder, StrategyRequest};
use super::scenario::ScenarioTarget;

#[derive(Debug, Clone, Deserialize)]
pub struct StatusRequest {
    pub total_classes: u32,
    pub attended_classes: u32,
    /// Reported percentage; derived from the counts when absent.
    #[serde(default)]
    pub current_percentage: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioRequest {
    pub current_attended: f64,
    pub remaining_classes: u32,
    #[serde(default)]
    pub targets: Vec<ScenarioTarget>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AllocationRequest {
    pub subjects: Vec<SubjectRecord>,
    #[serde(default)]
    pub target_percentage: Option<f64>,
    /// Aggregate counts; summed from `subjects` when absent.
    #[serde(default)]
    pub snapshot: Option<AttendanceSnapshot>,
    #[serde(default)]
    pub preferences: PreferenceProfile,
}

/// Router exposing the planning operations as JSON endpoints.
pub fn planning_router(builder: Arc<StrategyReportBuilder>) -> Router {
    Router::new()
        .route("/api/v1/attendance/status", post(status_handler))
        .route("/api/v1/attendance/scenarios", post(scenarios_handler))
        .route("/api/v1/attendance/allocation", post(allocation_handler))
        .route("/api/v1/attendance/report", post(report_handler))
        .with_state(builder)
}

pub(crate) async fn status_handler(
    State(builder): State<Arc<StrategyReportBuilder>>,
    Json(request): Json<StatusRequest>,
) -> Response {
    let result = match request.current_percentage {
        Some(percentage) => builder.evaluate_reported(
            percentage,
            request.total_classes,
            request.attended_classes,
        ),
        None => builder.evaluate_status(&AttendanceSnapshot {
            total_classes: request.total_classes,
            attended_classes: request.attended_classes,
        }),
    };
    respond(result)
}

pub(crate) async fn scenarios_handler(
    State(builder): State<Arc<StrategyReportBuilder>>,
    Json(request): Json<ScenarioRequest>,
) -> Response {
    let targets = if request.targets.is_empty() {
        ScenarioTarget::standard(request.current_attended, builder.policy()).to_vec()
    } else {
        request.targets
    };
    respond(builder.project_scenarios(
        request.current_attended,
        request.remaining_classes,
        &targets,
    ))
}

pub(crate) async fn allocation_handler(
    State(builder): State<Arc<StrategyReportBuilder>>,
    Json(request): Json<AllocationRequest>,
) -> Response {
    let subjects = request.preferences.apply(&request.subjects);
    let result = match request.snapshot {
        Some(snapshot) => {
            builder.allocate_against(&snapshot, &subjects, request.target_percentage)
        }
        None => builder.allocate(&subjects, request.target_percentage),
    };
    respond(result)
}

pub(crate) async fn report_handler(
    State(builder): State<Arc<StrategyReportBuilder>>,
    Json(request): Json<StrategyRequest>,
) -> Response {
    respond(builder.build(&request))
}

fn respond<T: Serialize>(result: Result<T, PlanningError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(error) => {
            warn!(%error, "rejected planning request");
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}
