mod calendar;
mod manager;
mod seed;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use std::{fmt, sync::Arc};

use abi::{
    Actor, Error, EventType, Reservation, ReservationFilter, ReservationId, ReservationRequest,
    ReservationStats, Room, RoomId,
};
use chrono::{NaiveDate, NaiveTime};
use mockable::Clock;

pub use calendar::{event_title, slot_score, CalendarProjector};
pub use seed::{sample_event_types, sample_reservations, sample_rooms};

/// Owns rooms, event types and reservations. Every mutation goes through
/// [`Rsvp`], which keeps reservations free of overlaps.
pub struct ReservationStore {
    rooms: Vec<Room>,
    event_types: Vec<EventType>,
    /// Most recent first.
    reservations: Vec<Reservation>,
    clock: Arc<dyn Clock>,
}

pub trait Rsvp {
    /// list reservations matching the filter, most recent first
    fn list_reservations(&self, filter: &ReservationFilter) -> Vec<Reservation>;
    /// blocking reservations of a room on a date that intersect `[start, end)`
    fn check_overlap(
        &self,
        room_id: RoomId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        exclude: Option<ReservationId>,
    ) -> Vec<Reservation>;
    /// make a reservation (pending or approved, depending on its event type)
    fn create_reservation(
        &mut self,
        actor: &Actor,
        request: ReservationRequest,
    ) -> Result<Reservation, Error>;
    /// approve or reject a pending reservation
    fn decide(
        &mut self,
        actor: &Actor,
        id: ReservationId,
        approve: bool,
        comment: Option<&str>,
    ) -> Result<Reservation, Error>;
    /// cancel a reservation, whatever its status
    fn cancel(&mut self, actor: &Actor, id: ReservationId) -> Result<Reservation, Error>;
    /// get reservation by id
    fn get(&self, id: ReservationId) -> Result<Reservation, Error>;
    /// dashboard counters
    fn statistics(&self) -> ReservationStats;
}

impl fmt::Debug for ReservationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReservationStore")
            .field("rooms", &self.rooms.len())
            .field("event_types", &self.event_types.len())
            .field("reservations", &self.reservations.len())
            .finish_non_exhaustive()
    }
}
