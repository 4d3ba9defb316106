use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use ratings::applicants::{applicant_router, ApplicantService};
use ratings::config::AppConfig;
use ratings::directory::HttpDirectoryClient;
use ratings::error::AppError;
use ratings::reviews::{review_router, ReviewService};
use ratings::storage::SqliteStore;
use ratings::telemetry;
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

    let store = Arc::new(SqliteStore::open(&config.database.path)?);
    let directory = Arc::new(HttpDirectoryClient::new(&config.directory));

    let review_service = Arc::new(ReviewService::new(
        store.clone(),
        directory.clone(),
        config.scoring.criteria_count,
    ));
    let applicant_service = Arc::new(ApplicantService::new(store, directory));

    let app = review_router(review_service)
        .merge(applicant_router(applicant_service))
        .merge(operational_routes())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "ratings service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
