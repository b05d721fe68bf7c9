mod export;
mod logging;
mod service;
mod snapshot;

use std::path::PathBuf;

use abi::{Actor, CalendarConfig, Reservation, ReservationStats};
use reservation::ReservationStore;
use serde::Serialize;

pub use export::{to_ical, DataExport, DataImport};
pub use logging::init_tracing;
pub use snapshot::Snapshot;

/// What the dashboard needs after a change or a refresh tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub statistics: ReservationStats,
    pub recent: Vec<Reservation>,
}

/// In-process entry point for the presentation layer. Mutations run as the
/// configured actor.
#[derive(Debug)]
pub struct DashboardService {
    store: ReservationStore,
    actor: Actor,
    calendar: CalendarConfig,
    snapshot_path: Option<PathBuf>,
}
