use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_planning_routes;
use attendance_planner::config::AppConfig;
use attendance_planner::error::AppError;
use attendance_planner::planning::StrategyReportBuilder;
use attendance_planner::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let builder = StrategyReportBuilder::default()
        .with_default_target(config.planning.allocation_target)?;

    let app = with_planning_routes(Arc::new(builder))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        allocation_target = config.planning.allocation_target,
        "attendance planner ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
