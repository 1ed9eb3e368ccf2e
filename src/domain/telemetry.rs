// Telemetry packet domain model - simulated OBD/J1939 snapshot for one bus
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryPacket {
    pub bus_id: String,
    pub speed: u32,
    pub rpm: u32,
    pub fuel_level: f64,
    pub odometer: u64,
    pub engine_temp: f64,
    pub timestamp: String,
    pub fault_codes: Vec<String>,
}

/// Expand a diagnostic trouble code into the label the maintenance
/// console shows.
pub fn diagnose_fault_code(code: &str) -> &'static str {
    match code {
        "P0420" => "Catalytic Converter Efficiency Below Threshold",
        "P0300" => "Random/Multiple Cylinder Misfire Detected",
        "P0128" => {
            "Coolant Thermostat (Coolant Temperature Below Thermostat Regulating Temperature)"
        }
        "P0171" => "System Too Lean (Bank 1)",
        _ => "Unknown DTC",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnose_known_codes() {
        assert_eq!(
            diagnose_fault_code("P0420"),
            "Catalytic Converter Efficiency Below Threshold"
        );
        assert_eq!(
            diagnose_fault_code("P0300"),
            "Random/Multiple Cylinder Misfire Detected"
        );
    }

    #[test]
    fn test_diagnose_unknown_code() {
        assert_eq!(diagnose_fault_code("P9999"), "Unknown DTC");
    }
}
