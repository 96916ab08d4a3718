use crate::cli::ServeArgs;
use crate::infra::{generator_from_config, AppState, InMemoryAssessmentRepository};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use epic_prioritizer::config::AppConfig;
use epic_prioritizer::error::AppError;
use epic_prioritizer::telemetry;
use epic_prioritizer::workflows::assessments::AssessmentService;
use epic_prioritizer::workflows::prioritization::CategoryCatalog;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let mut service = AssessmentService::new(repository, CategoryCatalog::standard());
    match generator_from_config(&config.corroboration) {
        Some(generator) => {
            info!(command = ?config.corroboration.command, "rating corroboration enabled");
            service = service.with_generator(generator);
        }
        None => warn!("APP_AI_COMMAND not set; rating corroboration disabled"),
    }

    let app = with_assessment_routes(Arc::new(service))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "epic prioritizer ready");

    axum::serve(listener, app).await?;
    Ok(())
}
