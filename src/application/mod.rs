// Application layer - Use cases over the shared fleet store
pub mod alert_service;
pub mod fleet_service;
pub mod position_simulator;
pub mod random_source;
pub mod ridership_simulator;
pub mod simulator;
pub mod store;
pub mod telemetry_service;
