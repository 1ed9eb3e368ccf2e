// Presentation layer - HTTP surface of the dashboard boundary
pub mod app_state;
pub mod handlers;
