// Fleet service - Snapshots and imports consumed by the dashboard
use crate::application::store::FleetStore;
use crate::domain::event_log::{EventLogEntry, Severity};
use crate::domain::rider::Rider;
use crate::domain::ticket::MaintenanceTicket;
use crate::domain::vehicle::Vehicle;
use std::sync::Arc;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct FleetService {
    store: Arc<FleetStore>,
}

impl FleetService {
    pub fn new(store: Arc<FleetStore>) -> Self {
        Self { store }
    }

    pub async fn fleet(&self) -> Vec<Vehicle> {
        self.store.snapshot(|state| state.vehicles.clone()).await
    }

    pub async fn riders(&self) -> Vec<Rider> {
        self.store.snapshot(|state| state.riders.clone()).await
    }

    pub async fn tickets(&self) -> Vec<MaintenanceTicket> {
        self.store.snapshot(|state| state.tickets.clone()).await
    }

    /// Full log, newest first. `alerts_only` narrows to warning/critical,
    /// which is what the notification badge consumes.
    pub async fn events(&self, alerts_only: bool) -> Vec<EventLogEntry> {
        self.store
            .snapshot(|state| {
                state
                    .log
                    .iter()
                    .filter(|e| !alerts_only || e.severity != Severity::Info)
                    .cloned()
                    .collect()
            })
            .await
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<EventLogEntry> {
        self.store.subscribe()
    }

    /// Fleet import appends; existing vehicles keep simulating untouched.
    pub async fn import_vehicles(&self, vehicles: Vec<Vehicle>) -> usize {
        let count = vehicles.len();
        self.store
            .with_state(|state| state.vehicles.extend(vehicles))
            .await;
        tracing::debug!("imported {count} vehicles");
        count
    }

    pub async fn import_riders(&self, riders: Vec<Rider>) -> usize {
        let count = riders.len();
        self.store
            .with_state(|state| state.riders.extend(riders))
            .await;
        tracing::debug!("imported {count} riders");
        count
    }
}
