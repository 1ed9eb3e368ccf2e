// Rider domain model - one student tracked via RFID boarding scans
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiderStatus {
    OnBus,
    OffBus,
    Absent,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rider {
    pub id: String,
    pub name: String,
    pub school: String,
    pub assigned_bus_id: String,
    pub status: RiderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_scan_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_scan_location: Option<String>,
}

impl Rider {
    /// Only riders actually in circulation can produce simulated scan events.
    /// Absent and unknown riders are never selected as targets.
    pub fn is_eligible(&self) -> bool {
        matches!(self.status, RiderStatus::OnBus | RiderStatus::OffBus)
    }
}
