// HTTP request handlers
use crate::domain::event_log::EventLogEntry;
use crate::domain::rider::Rider;
use crate::domain::ticket::MaintenanceTicket;
use crate::domain::vehicle::Vehicle;
use crate::infrastructure::event_stream::stream_from_receiver;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct EventsQuery {
    #[serde(default)]
    pub alerts: bool,
}

#[derive(Deserialize)]
pub struct ReportIssueRequest {
    pub bus_number: String,
}

#[derive(Deserialize)]
pub struct ResolveTicketRequest {
    pub bus_id: String,
}

#[derive(Serialize)]
pub struct AppliedResponse {
    pub applied: bool,
}

#[derive(Serialize)]
pub struct ReportIssueResponse {
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<MaintenanceTicket>,
}

#[derive(Serialize)]
pub struct ImportResponse {
    pub imported: usize,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current fleet snapshot, re-read by the dashboard after every tick
pub async fn list_fleet(State(state): State<Arc<AppState>>) -> Json<Vec<Vehicle>> {
    Json(state.fleet_service.fleet().await)
}

pub async fn list_riders(State(state): State<Arc<AppState>>) -> Json<Vec<Rider>> {
    Json(state.fleet_service.riders().await)
}

pub async fn list_tickets(State(state): State<Arc<AppState>>) -> Json<Vec<MaintenanceTicket>> {
    Json(state.fleet_service.tickets().await)
}

/// Event log, newest first; `?alerts=true` narrows to warning/critical
pub async fn list_events(
    Query(query): Query<EventsQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<EventLogEntry>> {
    Json(state.fleet_service.events(query.alerts).await)
}

/// Live event feed as chunked newline-delimited JSON
pub async fn stream_events(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    stream_from_receiver(state.fleet_service.subscribe_events())
}

/// One simulated engine-bus snapshot for a vehicle
pub async fn get_telemetry(
    Path(bus_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.telemetry_service.packet_for(&bus_id).await {
        Some(packet) => Json(packet).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn import_fleet(
    State(state): State<Arc<AppState>>,
    Json(vehicles): Json<Vec<Vehicle>>,
) -> Json<ImportResponse> {
    let imported = state.fleet_service.import_vehicles(vehicles).await;
    Json(ImportResponse { imported })
}

pub async fn import_riders(
    State(state): State<Arc<AppState>>,
    Json(riders): Json<Vec<Rider>>,
) -> Json<ImportResponse> {
    let imported = state.fleet_service.import_riders(riders).await;
    Json(ImportResponse { imported })
}

pub async fn dismiss_alert(
    Path(vehicle_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Json<AppliedResponse> {
    let applied = state.alert_service.dismiss_alert(&vehicle_id).await;
    Json(AppliedResponse { applied })
}

pub async fn report_issue(
    Path(vehicle_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReportIssueRequest>,
) -> Json<ReportIssueResponse> {
    let ticket = state
        .alert_service
        .report_mechanical_issue(&vehicle_id, &request.bus_number)
        .await;
    Json(ReportIssueResponse {
        applied: ticket.is_some(),
        ticket,
    })
}

pub async fn report_emergency(
    Path(vehicle_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Json<AppliedResponse> {
    let applied = state.alert_service.report_emergency(&vehicle_id).await;
    Json(AppliedResponse { applied })
}

pub async fn resolve_ticket(
    Path(ticket_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResolveTicketRequest>,
) -> Json<AppliedResponse> {
    let applied = state
        .alert_service
        .resolve_ticket(&ticket_id, &request.bus_id)
        .await;
    Json(AppliedResponse { applied })
}
