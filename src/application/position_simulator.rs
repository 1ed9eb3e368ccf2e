// Position simulator - perturbs moving vehicles and raises delay alerts
use crate::application::random_source::RandomSource;
use crate::application::simulator::SimulatorTick;
use crate::application::store::FleetStore;
use crate::domain::vehicle::{Vehicle, VehicleStatus};
use async_trait::async_trait;
use std::sync::Arc;

/// Delay reasons the dispatcher sees when the trial fires.
pub const DELAY_ALERTS: [&str; 5] = [
    "Traffic Jam on I-10",
    "Mechanical Issue: Engine Light",
    "Driver Report: Road Blocked",
    "Late Departure",
    "Minor Accident Nearby",
];

pub struct PositionSimulator {
    store: Arc<FleetStore>,
    random: Arc<dyn RandomSource>,
    delay_probability: f64,
}

impl PositionSimulator {
    pub fn new(
        store: Arc<FleetStore>,
        random: Arc<dyn RandomSource>,
        delay_probability: f64,
    ) -> Self {
        Self {
            store,
            random,
            delay_probability,
        }
    }
}

/// One vehicle step. Maintenance vehicles are untouched; moving vehicles
/// drift by up to one unit per axis inside the map margin; an alert-free
/// on-route vehicle may flip to delayed with a fresh alert.
///
/// Raising a delay alert intentionally emits no log entry, matching the
/// dashboard this replaces.
fn advance(vehicle: &mut Vehicle, random: &dyn RandomSource, delay_probability: f64) {
    if vehicle.status == VehicleStatus::Maintenance {
        return;
    }
    if vehicle.is_moving() {
        let dx = random.unit() * 2.0 - 1.0;
        let dy = random.unit() * 2.0 - 1.0;
        vehicle.coordinates = vehicle.coordinates.shifted(dx, dy);
    }
    if vehicle.alert.is_none()
        && vehicle.status == VehicleStatus::OnRoute
        && random.unit() < delay_probability
    {
        vehicle.alert = Some(DELAY_ALERTS[random.index(DELAY_ALERTS.len())].to_string());
        vehicle.status = VehicleStatus::Delayed;
    }
}

#[async_trait]
impl SimulatorTick for PositionSimulator {
    async fn tick(&self) {
        self.store
            .with_state(|state| {
                for vehicle in &mut state.vehicles {
                    advance(vehicle, self.random.as_ref(), self.delay_probability);
                }
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::random_source::testing::ScriptedRandom;
    use crate::domain::vehicle::{Coordinates, COORD_MAX, COORD_MIN};

    fn vehicle(status: VehicleStatus, x: f64, y: f64, alert: Option<&str>) -> Vehicle {
        Vehicle {
            id: "R-101".to_string(),
            bus_number: "B-12".to_string(),
            driver: "S. Ramirez".to_string(),
            status,
            coordinates: Coordinates::new(x, y),
            alert: alert.map(str::to_string),
        }
    }

    async fn run_tick(vehicles: Vec<Vehicle>, random: ScriptedRandom, p: f64) -> Vec<Vehicle> {
        let store = Arc::new(FleetStore::new(vehicles, Vec::new()));
        let simulator = PositionSimulator::new(store.clone(), Arc::new(random), p);
        simulator.tick().await;
        store.snapshot(|state| state.vehicles.clone()).await
    }

    #[tokio::test]
    async fn test_maintenance_vehicle_is_untouched() {
        let before = vehicle(VehicleStatus::Maintenance, 42.0, 17.0, None);
        let after = run_tick(vec![before.clone()], ScriptedRandom::new([], []), 0.02).await;
        assert_eq!(after[0].coordinates, before.coordinates);
        assert_eq!(after[0].alert, None);
        assert_eq!(after[0].status, VehicleStatus::Maintenance);
    }

    #[tokio::test]
    async fn test_idle_vehicle_keeps_coordinates_and_draws_nothing() {
        let after = run_tick(
            vec![vehicle(VehicleStatus::Idle, 30.0, 60.0, None)],
            ScriptedRandom::new([], []),
            0.02,
        )
        .await;
        assert_eq!(after[0].coordinates, Coordinates::new(30.0, 60.0));
        assert_eq!(after[0].status, VehicleStatus::Idle);
        assert_eq!(after[0].alert, None);
    }

    #[tokio::test]
    async fn test_moving_vehicle_is_clamped_to_margin() {
        // dx = +1, dy = -1, failed delay trial.
        let random = ScriptedRandom::new([1.0, 0.0, 1.0], []);
        let after = run_tick(
            vec![vehicle(VehicleStatus::OnRoute, 94.5, 5.2, None)],
            random,
            0.02,
        )
        .await;
        assert_eq!(after[0].coordinates.x, COORD_MAX);
        assert_eq!(after[0].coordinates.y, COORD_MIN);
        assert_eq!(after[0].status, VehicleStatus::OnRoute);
    }

    #[tokio::test]
    async fn test_forced_delay_trial_raises_alert() {
        // dx = 0, dy = 0, trial draw 0.0 < p, catalog index 2.
        let random = ScriptedRandom::new([0.5, 0.5, 0.0], [2]);
        let after = run_tick(
            vec![vehicle(VehicleStatus::OnRoute, 50.0, 50.0, None)],
            random,
            0.02,
        )
        .await;
        assert_eq!(after[0].status, VehicleStatus::Delayed);
        assert_eq!(after[0].alert.as_deref(), Some(DELAY_ALERTS[2]));
        assert_eq!(after[0].coordinates, Coordinates::new(50.0, 50.0));
    }

    #[tokio::test]
    async fn test_existing_alert_is_never_replaced() {
        // Delayed vehicle still moves but skips the trial entirely.
        let random = ScriptedRandom::new([0.0, 0.0, 0.0], [4]);
        let after = run_tick(
            vec![vehicle(VehicleStatus::Delayed, 50.0, 50.0, Some("Traffic"))],
            random,
            1.0,
        )
        .await;
        assert_eq!(after[0].alert.as_deref(), Some("Traffic"));
        assert_eq!(after[0].status, VehicleStatus::Delayed);
        assert_eq!(after[0].coordinates, Coordinates::new(49.0, 49.0));
    }

    #[tokio::test]
    async fn test_delay_alert_emits_no_log_entry() {
        let store = Arc::new(FleetStore::new(
            vec![vehicle(VehicleStatus::OnRoute, 50.0, 50.0, None)],
            Vec::new(),
        ));
        let random = ScriptedRandom::new([0.5, 0.5, 0.0], [0]);
        let simulator = PositionSimulator::new(store.clone(), Arc::new(random), 0.02);
        simulator.tick().await;
        let (status, log_len) = store
            .snapshot(|state| (state.vehicles[0].status, state.log.len()))
            .await;
        assert_eq!(status, VehicleStatus::Delayed);
        assert_eq!(log_len, 0);
    }
}
