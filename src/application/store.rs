// In-memory fleet store - single-writer critical sections over shared state
use crate::domain::event_log::{wall_clock_time, EventKind, EventLog, EventLogEntry, Severity};
use crate::domain::rider::Rider;
use crate::domain::ticket::MaintenanceTicket;
use crate::domain::vehicle::Vehicle;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{broadcast, RwLock};

/// Live stream subscribers that fall further behind than this simply drop
/// the missed entries.
const EVENT_CHANNEL_CAPACITY: usize = 100;

#[derive(Debug, Default)]
pub struct FleetState {
    pub vehicles: Vec<Vehicle>,
    pub riders: Vec<Rider>,
    pub log: EventLog,
    pub tickets: Vec<MaintenanceTicket>,
}

/// Owner of all mutable fleet state. Simulator ticks and lifecycle
/// operations mutate through `with_state`, so readers never observe a
/// half-applied step.
pub struct FleetStore {
    state: RwLock<FleetState>,
    events_tx: broadcast::Sender<EventLogEntry>,
    next_id: AtomicU64,
}

impl FleetStore {
    pub fn new(vehicles: Vec<Vehicle>, riders: Vec<Rider>) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(FleetState {
                vehicles,
                riders,
                ..Default::default()
            }),
            events_tx,
            next_id: AtomicU64::new(0),
        }
    }

    /// Run one mutation as a single critical section.
    pub async fn with_state<R>(&self, f: impl FnOnce(&mut FleetState) -> R) -> R {
        let mut state = self.state.write().await;
        f(&mut state)
    }

    /// Read a consistent view of the state.
    pub async fn snapshot<R>(&self, f: impl FnOnce(&FleetState) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    /// Subscribe to log entries as they are emitted.
    pub fn subscribe(&self) -> broadcast::Receiver<EventLogEntry> {
        self.events_tx.subscribe()
    }

    /// Process-wide sequence for entry and ticket ids. Monotonic, unlike the
    /// wall-clock ids the original dashboard used.
    pub(crate) fn next_seq(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Append a log entry and fan it out to live stream subscribers.
    /// Must be called while holding the state write lock (i.e. from inside
    /// a `with_state` closure).
    pub(crate) fn emit(
        &self,
        state: &mut FleetState,
        kind: EventKind,
        severity: Severity,
        message: String,
    ) -> String {
        let id = format!("L-{}", self.next_seq());
        let entry = EventLogEntry::new(id.clone(), wall_clock_time(), kind, message, severity);
        // Send fails only when nobody is subscribed; the log records it regardless.
        let _ = self.events_tx.send(entry.clone());
        state.log.push(entry);
        id
    }
}
