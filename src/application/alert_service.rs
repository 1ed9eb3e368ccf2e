// Alert lifecycle - dismissals, mechanical reports, ticket resolution
use crate::application::store::FleetStore;
use crate::domain::event_log::{EventKind, Severity};
use crate::domain::ticket::{MaintenanceTicket, TicketStatus};
use crate::domain::vehicle::VehicleStatus;
use chrono::Local;
use std::sync::Arc;

const MECHANICAL_ISSUE: &str = "Driver Reported Mechanical Issue";
const EMERGENCY_ALERT: &str = "DRIVER EMERGENCY DECLARED";

/// Lifecycle operations referencing stale ids are no-ops rather than
/// errors: the caller's view of the fleet may lag behind the simulation.
#[derive(Clone)]
pub struct AlertService {
    store: Arc<FleetStore>,
}

impl AlertService {
    pub fn new(store: Arc<FleetStore>) -> Self {
        Self { store }
    }

    /// Clear a vehicle's alert; a delayed vehicle resumes its route.
    /// Returns false (and logs nothing) when there is nothing to dismiss.
    pub async fn dismiss_alert(&self, vehicle_id: &str) -> bool {
        self.store
            .with_state(|state| {
                let Some(vehicle) = state.vehicles.iter_mut().find(|v| v.id == vehicle_id)
                else {
                    return false;
                };
                if vehicle.alert.is_none() {
                    return false;
                }
                vehicle.alert = None;
                if vehicle.status == VehicleStatus::Delayed {
                    vehicle.status = VehicleStatus::OnRoute;
                }
                let message = format!("Alert dismissed for bus {vehicle_id}");
                self.store
                    .emit(state, EventKind::System, Severity::Info, message);
                true
            })
            .await
    }

    /// Open a ticket and pull the vehicle out of the live simulation.
    /// This is the only in-simulation path into MAINTENANCE.
    pub async fn report_mechanical_issue(
        &self,
        vehicle_id: &str,
        bus_number: &str,
    ) -> Option<MaintenanceTicket> {
        self.store
            .with_state(|state| {
                let vehicle = state.vehicles.iter_mut().find(|v| v.id == vehicle_id)?;
                vehicle.status = VehicleStatus::Maintenance;
                vehicle.alert = None;
                let ticket = MaintenanceTicket {
                    id: format!("M-{}", self.store.next_seq()),
                    bus_id: vehicle_id.to_string(),
                    bus_number: bus_number.to_string(),
                    issue: MECHANICAL_ISSUE.to_string(),
                    reported_by: "Driver App".to_string(),
                    reported_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                    status: TicketStatus::Open,
                };
                state.tickets.insert(0, ticket.clone());
                let message = format!(
                    "Bus {} marked for maintenance. Ticket #{} created.",
                    bus_number, ticket.id
                );
                self.store
                    .emit(state, EventKind::Maintenance, Severity::Warning, message);
                Some(ticket)
            })
            .await
    }

    /// Close a ticket and return the bus to the yard. The vehicle comes
    /// back IDLE; re-dispatching it is the dispatcher's call, not ours.
    pub async fn resolve_ticket(&self, ticket_id: &str, vehicle_id: &str) -> bool {
        self.store
            .with_state(|state| {
                let mut applied = false;
                if let Some(ticket) = state.tickets.iter_mut().find(|t| t.id == ticket_id) {
                    ticket.status = TicketStatus::Resolved;
                    applied = true;
                }
                if let Some(vehicle) = state.vehicles.iter_mut().find(|v| v.id == vehicle_id) {
                    vehicle.status = VehicleStatus::Idle;
                    applied = true;
                }
                if applied {
                    let message = format!(
                        "Maintenance Ticket #{ticket_id} resolved. Bus returned to fleet."
                    );
                    self.store
                        .emit(state, EventKind::System, Severity::Info, message);
                }
                applied
            })
            .await
    }

    /// Driver-declared emergency: flags the vehicle delayed with a fixed
    /// alert. Unlike simulator alerts this can land on any status.
    pub async fn report_emergency(&self, vehicle_id: &str) -> bool {
        self.store
            .with_state(|state| {
                let Some(vehicle) = state.vehicles.iter_mut().find(|v| v.id == vehicle_id)
                else {
                    return false;
                };
                vehicle.status = VehicleStatus::Delayed;
                vehicle.alert = Some(EMERGENCY_ALERT.to_string());
                true
            })
            .await
    }
}
