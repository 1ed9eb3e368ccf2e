// Ridership simulator - one simulated RFID scan event per tick
use crate::application::random_source::RandomSource;
use crate::application::simulator::SimulatorTick;
use crate::application::store::FleetStore;
use crate::domain::event_log::{wall_clock_time, EventKind, Severity};
use crate::domain::rider::RiderStatus;
use async_trait::async_trait;
use std::sync::Arc;

/// Decoy bus named in wrong-bus safety alerts.
pub const DECOY_BUS_ID: &str = "R-999";

const SCHOOL_DROPOFF: &str = "School Drop-off";
const STOP_COUNT: usize = 10;

pub struct RidershipSimulator {
    store: Arc<FleetStore>,
    random: Arc<dyn RandomSource>,
    wrong_bus_probability: f64,
}

impl RidershipSimulator {
    pub fn new(
        store: Arc<FleetStore>,
        random: Arc<dyn RandomSource>,
        wrong_bus_probability: f64,
    ) -> Self {
        Self {
            store,
            random,
            wrong_bus_probability,
        }
    }
}

#[async_trait]
impl SimulatorTick for RidershipSimulator {
    async fn tick(&self) {
        self.store
            .with_state(|state| {
                let eligible: Vec<usize> = state
                    .riders
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| r.is_eligible())
                    .map(|(i, _)| i)
                    .collect();
                if eligible.is_empty() {
                    return;
                }
                let target = eligible[self.random.index(eligible.len())];
                let now = wall_clock_time();

                // A rejected boarding attempt logs but never mutates the
                // rider, matching the dashboard this replaces.
                let rider = &state.riders[target];
                if rider.status == RiderStatus::OffBus
                    && self.random.unit() < self.wrong_bus_probability
                {
                    let message = format!(
                        "ALERT: {} attempted to board WRONG BUS ({}). Driver Notified.",
                        rider.name, DECOY_BUS_ID
                    );
                    self.store
                        .emit(state, EventKind::WrongBus, Severity::Critical, message);
                    return;
                }

                let rider = &mut state.riders[target];
                match rider.status {
                    RiderStatus::OnBus => {
                        rider.status = RiderStatus::OffBus;
                        rider.last_scan_location = Some(SCHOOL_DROPOFF.to_string());
                        rider.last_scan_time = Some(now);
                        let message = format!(
                            "{} ({}) disembarked Bus {} at {}",
                            rider.name, rider.id, rider.assigned_bus_id, SCHOOL_DROPOFF
                        );
                        self.store
                            .emit(state, EventKind::Disembarking, Severity::Info, message);
                    }
                    RiderStatus::OffBus => {
                        let stop = format!("Stop #{}", self.random.index(STOP_COUNT) + 1);
                        rider.status = RiderStatus::OnBus;
                        rider.last_scan_location = Some(stop.clone());
                        rider.last_scan_time = Some(now);
                        let message = format!(
                            "{} ({}) boarded Bus {} at {}",
                            rider.name, rider.id, rider.assigned_bus_id, stop
                        );
                        self.store
                            .emit(state, EventKind::Boarding, Severity::Info, message);
                    }
                    // Unreachable: the eligible set excludes these.
                    RiderStatus::Absent | RiderStatus::Unknown => {}
                }
            })
            .await;
    }
}
