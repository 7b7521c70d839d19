use std::path::PathBuf;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;

use smartcotton_logistics::config;
use smartcotton_logistics::insights::InsightsClient;
use smartcotton_logistics::solver::SolverClient;
use smartcotton_logistics::{router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Smart Cotton logistics service starting");

    // Load configuration; refuse to start on misconfiguration.
    let config_dir = std::env::var("LOGISTICS_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    let logistics_config = match config::load_config(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration, refusing to start");
            std::process::exit(1);
        }
    };

    // Install Prometheus metrics recorder.
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");

    let http = reqwest::Client::builder()
        .user_agent("SmartCotton-Logistics/0.1")
        .build()
        .expect("Failed to build HTTP client");

    // Upstream clients are optional; missing credentials degrade to 503s.
    let solver = SolverClient::from_env(http.clone(), &logistics_config.solver);
    let insights = InsightsClient::from_env(http, &logistics_config.insights);

    let state = Arc::new(AppState {
        config: logistics_config,
        solver,
        insights,
        metrics_handle,
    });

    let app = router(state);

    let port: u16 = std::env::var("LOGISTICS_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8090);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind TCP listener");

    tracing::info!(port = port, "Smart Cotton logistics service listening");

    axum::serve(listener, app).await.expect("HTTP server error");
}
