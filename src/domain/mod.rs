// Domain layer - Fleet entities and transition rules
pub mod event_log;
pub mod rider;
pub mod telemetry;
pub mod ticket;
pub mod vehicle;
