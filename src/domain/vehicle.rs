// Vehicle domain model - one bus in the fleet
use serde::{Deserialize, Serialize};

/// Map plane margin. Markers stay inside [5, 95] so they remain visible
/// on the dashboard's normalized 0-100 plane.
pub const COORD_MIN: f64 = 5.0;
pub const COORD_MAX: f64 = 95.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    OnRoute,
    Idle,
    Delayed,
    Maintenance,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Shift by (dx, dy), clamping both axes to the visible map margin.
    pub fn shifted(self, dx: f64, dy: f64) -> Self {
        Self {
            x: (self.x + dx).clamp(COORD_MIN, COORD_MAX),
            y: (self.y + dy).clamp(COORD_MIN, COORD_MAX),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub bus_number: String,
    pub driver: String,
    pub status: VehicleStatus,
    pub coordinates: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
}

impl Vehicle {
    /// A moving vehicle gets its position perturbed each tick.
    pub fn is_moving(&self) -> bool {
        matches!(self.status, VehicleStatus::OnRoute | VehicleStatus::Delayed)
    }
}
