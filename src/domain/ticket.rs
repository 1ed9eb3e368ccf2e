// Maintenance ticket domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTicket {
    pub id: String,
    pub bus_id: String,
    pub bus_number: String,
    pub issue: String,
    pub reported_by: String,
    pub reported_at: String,
    pub status: TicketStatus,
}
