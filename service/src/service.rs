use std::{path::PathBuf, sync::Arc};

use abi::{
    Actor, Config, Error, Reservation, ReservationFilter, ReservationId, ReservationRequest,
    ReservationStats, UsageStats,
};
use chrono::Local;
use mockable::{Clock, DefaultClock};
use reservation::{
    sample_event_types, sample_rooms, CalendarProjector, ReservationStore, Rsvp,
};
use tracing::{debug, info, warn};

use crate::{to_ical, DashboardService, DashboardView, DataExport, DataImport, Snapshot};

/// Rows shown in the dashboard's "recent reservations" panel.
pub const RECENT_LIMIT: usize = 5;

impl DashboardService {
    pub fn new(config: &Config) -> Result<Self, Error> {
        Self::with_clock(config, Arc::new(DefaultClock))
    }

    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Result<Self, Error> {
        let store = if config.storage.seed_sample_data {
            ReservationStore::with_sample_data(clock)
        } else {
            ReservationStore::new(sample_rooms(), sample_event_types(), clock)
        };
        let snapshot_path = config
            .storage
            .snapshot_path
            .as_deref()
            .map(expand_path)
            .transpose()?;

        info!(
            actor = %config.actor.name,
            reservations = store.reservations().len(),
            "dashboard service ready"
        );
        Ok(Self {
            store,
            actor: config.actor.clone(),
            calendar: config.calendar.clone(),
            snapshot_path,
        })
    }

    pub fn store(&self) -> &ReservationStore {
        &self.store
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn list(&self, filter: &ReservationFilter) -> Vec<Reservation> {
        self.store.list_reservations(filter)
    }

    pub fn get(&self, id: ReservationId) -> Result<Reservation, Error> {
        self.store.get(id)
    }

    pub fn statistics(&self) -> ReservationStats {
        self.store.statistics()
    }

    pub fn usage_stats(&self) -> UsageStats {
        self.store.usage_stats()
    }

    pub fn recent(&self) -> Vec<Reservation> {
        self.store.recent(RECENT_LIMIT).to_vec()
    }

    pub fn create(&mut self, request: ReservationRequest) -> Result<Reservation, Error> {
        self.store.create_reservation(&self.actor, request)
    }

    pub fn decide(
        &mut self,
        id: ReservationId,
        approve: bool,
        comment: Option<&str>,
    ) -> Result<Reservation, Error> {
        self.store.decide(&self.actor, id, approve, comment)
    }

    pub fn cancel(&mut self, id: ReservationId) -> Result<Reservation, Error> {
        self.store.cancel(&self.actor, id)
    }

    /// Whether the configured actor may approve or reject. The store itself
    /// does not check roles; this drives which actions are offered.
    pub fn can_validate(&self) -> bool {
        self.actor.can_validate()
    }

    pub fn can_cancel(&self, id: ReservationId) -> Result<bool, Error> {
        Ok(self.actor.can_cancel(&self.store.get(id)?))
    }

    pub fn calendar(&self) -> CalendarProjector<'_> {
        self.store.calendar(self.calendar.clone())
    }

    /// Called by the presentation layer on its own schedule. Reads only; a
    /// remote sync would hook in here.
    pub fn refresh(&self) -> DashboardView {
        debug!("refreshing dashboard");
        DashboardView {
            statistics: self.statistics(),
            recent: self.recent(),
        }
    }

    pub fn save_snapshot(&self) -> Result<(), Error> {
        let path = self.snapshot_path()?;
        let snapshot = Snapshot::new(self.store.reservations().to_vec(), self.store.now());
        snapshot.save(path)?;
        info!(path = %path.display(), count = snapshot.reservations.len(), "snapshot saved");
        Ok(())
    }

    /// Replace the reservation list with the saved one. Returns `false` when
    /// no snapshot exists; on any error the store is left as it was.
    pub fn load_snapshot(&mut self) -> Result<bool, Error> {
        let path = self.snapshot_path()?.clone();
        let snapshot = match Snapshot::load(&path) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Ok(false),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable snapshot ignored");
                return Err(e);
            }
        };
        self.store.replace_reservations(snapshot.reservations)?;
        info!(path = %path.display(), last_update = %snapshot.last_update, "snapshot loaded");
        Ok(true)
    }

    pub fn export_json(&self) -> Result<String, Error> {
        DataExport {
            reservations: self.store.reservations().to_vec(),
            rooms: self.store.rooms().to_vec(),
            event_types: self.store.event_types().to_vec(),
            exported_at: self.store.now(),
        }
        .to_json_pretty()
    }

    /// Replace whichever collections the document carries. Malformed input
    /// changes nothing.
    pub fn import_json(&mut self, json: &str) -> Result<(), Error> {
        let import = DataImport::from_json(json).map_err(|e| {
            warn!(error = %e, "import rejected");
            e
        })?;
        if let Some(reservations) = import.reservations {
            self.store.replace_reservations(reservations)?;
        }
        if let Some(rooms) = import.rooms {
            self.store.replace_rooms(rooms);
        }
        if let Some(event_types) = import.event_types {
            self.store.replace_event_types(event_types);
        }
        info!("data imported");
        Ok(())
    }

    pub fn export_ical(&self) -> String {
        to_ical(self.store.reservations(), &Local)
    }

    fn snapshot_path(&self) -> Result<&PathBuf, Error> {
        self.snapshot_path
            .as_ref()
            .ok_or_else(|| Error::SnapshotError("no snapshot path configured".to_string()))
    }
}

fn expand_path(path: &str) -> Result<PathBuf, Error> {
    shellexpand::full(path)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|_| Error::ConfigParseError)
}
