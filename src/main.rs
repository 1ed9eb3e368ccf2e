// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::application::alert_service::AlertService;
use crate::application::fleet_service::FleetService;
use crate::application::position_simulator::PositionSimulator;
use crate::application::random_source::RandomSource;
use crate::application::ridership_simulator::RidershipSimulator;
use crate::application::simulator::SimulatorTick;
use crate::application::store::FleetStore;
use crate::application::telemetry_service::TelemetryService;
use crate::infrastructure::config::load_service_config;
use crate::infrastructure::random::ThreadRandom;
use crate::infrastructure::scheduler::Scheduler;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dismiss_alert, get_telemetry, health_check, import_fleet, import_riders, list_events,
    list_fleet, list_riders, list_tickets, report_emergency, report_issue, resolve_ticket,
    stream_events,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Load configuration
    let config = load_service_config()?;

    // Create the store and randomness source (fleet and riders arrive via import)
    let store = Arc::new(FleetStore::new(Vec::new(), Vec::new()));
    let random: Arc<dyn RandomSource> = Arc::new(ThreadRandom);

    // Create simulators and start the scheduler
    let position_simulator = Arc::new(PositionSimulator::new(
        store.clone(),
        random.clone(),
        config.simulation.delay_probability,
    ));
    let ridership_simulator = Arc::new(RidershipSimulator::new(
        store.clone(),
        random.clone(),
        config.simulation.wrong_bus_probability,
    ));
    let scheduler = Scheduler::start(vec![
        (
            Duration::from_millis(config.simulation.position_interval_ms),
            position_simulator as Arc<dyn SimulatorTick>,
        ),
        (
            Duration::from_millis(config.simulation.ridership_interval_ms),
            ridership_simulator as Arc<dyn SimulatorTick>,
        ),
    ]);

    // Create application state
    let state = Arc::new(AppState {
        fleet_service: FleetService::new(store.clone()),
        alert_service: AlertService::new(store.clone()),
        telemetry_service: TelemetryService::new(store, random),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/fleet", get(list_fleet))
        .route("/fleet/import", post(import_fleet))
        .route("/fleet/:id/dismiss-alert", post(dismiss_alert))
        .route("/fleet/:id/report-issue", post(report_issue))
        .route("/fleet/:id/emergency", post(report_emergency))
        .route("/riders", get(list_riders))
        .route("/riders/import", post(import_riders))
        .route("/events", get(list_events))
        .route("/events/stream", get(stream_events))
        .route("/tickets", get(list_tickets))
        .route("/tickets/:id/resolve", post(resolve_ticket))
        .route("/telemetry/:bus_id", get(get_telemetry))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    tracing::info!("starting fleet-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Tear the simulation down before exiting; no tick runs past this point.
    scheduler.stop().await;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
