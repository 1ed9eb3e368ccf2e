// Application state for HTTP handlers
use crate::application::alert_service::AlertService;
use crate::application::fleet_service::FleetService;
use crate::application::telemetry_service::TelemetryService;

#[derive(Clone)]
pub struct AppState {
    pub fleet_service: FleetService,
    pub alert_service: AlertService,
    pub telemetry_service: TelemetryService,
}
