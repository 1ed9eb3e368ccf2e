// Telemetry service - simulated engine-bus snapshots per vehicle
use crate::application::random_source::RandomSource;
use crate::application::store::FleetStore;
use crate::domain::telemetry::{diagnose_fault_code, TelemetryPacket};
use chrono::Utc;
use std::sync::Arc;

const BASE_SPEED: f64 = 35.0;
const IDLE_RPM: f64 = 700.0;
const DRIVE_RPM: f64 = 2200.0;
const BASE_ODOMETER: u64 = 45_000;

#[derive(Clone)]
pub struct TelemetryService {
    store: Arc<FleetStore>,
    random: Arc<dyn RandomSource>,
}

impl TelemetryService {
    pub fn new(store: Arc<FleetStore>, random: Arc<dyn RandomSource>) -> Self {
        Self { store, random }
    }

    /// Fresh packet for a known vehicle; None when the id is stale.
    pub async fn packet_for(&self, bus_id: &str) -> Option<TelemetryPacket> {
        let moving = self
            .store
            .snapshot(|state| {
                state
                    .vehicles
                    .iter()
                    .find(|v| v.id == bus_id)
                    .map(|v| v.is_moving())
            })
            .await?;
        let packet = generate_packet(bus_id, moving, self.random.as_ref());
        for code in &packet.fault_codes {
            tracing::warn!("bus {} reported {}: {}", bus_id, code, diagnose_fault_code(code));
        }
        Some(packet)
    }
}

/// Draw order: speed (moving only), rpm, fuel, odometer, engine temp,
/// fault trial.
pub fn generate_packet(bus_id: &str, moving: bool, random: &dyn RandomSource) -> TelemetryPacket {
    let speed = if moving {
        BASE_SPEED + (random.unit() * 10.0 - 5.0)
    } else {
        0.0
    };
    let rpm = if moving {
        DRIVE_RPM + (random.unit() * 200.0 - 100.0)
    } else {
        IDLE_RPM + (random.unit() * 50.0 - 25.0)
    };
    TelemetryPacket {
        bus_id: bus_id.to_string(),
        speed: speed.max(0.0).round() as u32,
        rpm: rpm.round() as u32,
        fuel_level: (100.0 - random.unit() * 5.0).max(0.0),
        odometer: BASE_ODOMETER + (random.unit() * 100.0).floor() as u64,
        engine_temp: 195.0 + (random.unit() * 10.0 - 5.0),
        timestamp: Utc::now().to_rfc3339(),
        fault_codes: if random.unit() > 0.95 {
            vec!["P0420".to_string()]
        } else {
            Vec::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::random_source::testing::ScriptedRandom;
    use crate::domain::vehicle::{Coordinates, Vehicle, VehicleStatus};

    #[test]
    fn test_moving_packet_midpoint_draws() {
        let random = ScriptedRandom::new([0.5, 0.5, 0.0, 0.0, 0.5, 0.0], []);
        let packet = generate_packet("R-101", true, &random);
        assert_eq!(packet.speed, 35);
        assert_eq!(packet.rpm, 2200);
        assert_eq!(packet.fuel_level, 100.0);
        assert_eq!(packet.odometer, BASE_ODOMETER);
        assert_eq!(packet.engine_temp, 195.0);
        assert!(packet.fault_codes.is_empty());
    }

    #[test]
    fn test_stationary_packet_idles() {
        let random = ScriptedRandom::new([0.5, 0.0, 0.0, 0.5, 0.0], []);
        let packet = generate_packet("R-101", false, &random);
        assert_eq!(packet.speed, 0);
        assert_eq!(packet.rpm, 700);
    }

    #[test]
    fn test_fault_code_trial() {
        let random = ScriptedRandom::new([0.5, 0.5, 0.0, 0.0, 0.5, 0.99], []);
        let packet = generate_packet("R-101", true, &random);
        assert_eq!(packet.fault_codes, vec!["P0420".to_string()]);
    }

    #[tokio::test]
    async fn test_packet_for_unknown_vehicle() {
        let store = Arc::new(FleetStore::new(Vec::new(), Vec::new()));
        let service = TelemetryService::new(store, Arc::new(ScriptedRandom::new([], [])));
        assert!(service.packet_for("R-404").await.is_none());
    }

    #[tokio::test]
    async fn test_packet_for_idle_vehicle_reports_zero_speed() {
        let store = Arc::new(FleetStore::new(
            vec![Vehicle {
                id: "R-101".to_string(),
                bus_number: "B-12".to_string(),
                driver: "S. Ramirez".to_string(),
                status: VehicleStatus::Idle,
                coordinates: Coordinates::new(50.0, 50.0),
                alert: None,
            }],
            Vec::new(),
        ));
        let service = TelemetryService::new(store, Arc::new(ScriptedRandom::new([], [])));
        let packet = service.packet_for("R-101").await.unwrap();
        assert_eq!(packet.speed, 0);
    }
}
