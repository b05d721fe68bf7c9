mod conflict;

use chrono::NaiveTime;
use thiserror::Error;

use crate::{EventTypeId, ReservationId, ReservationStatus, RoomId};
pub use conflict::{ReservationConflictInfo, ReservationWindow};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Failed to read configuration file")]
    ConfigReadError,

    #[error("Failed to parse configuration file")]
    ConfigParseError,

    #[error("Invalid time range: start {start} must be before end {end}")]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },

    #[error("Conflict reservation: {0}")]
    SchedulingConflict(ReservationConflictInfo),

    #[error("No reservation found by the given id: {0}")]
    NotFound(ReservationId),

    #[error("Reservation {id} is {status}, only pending reservations can be decided")]
    InvalidTransition {
        id: ReservationId,
        status: ReservationStatus,
    },

    #[error("Unknown room: {0}")]
    UnknownRoom(RoomId),

    #[error("Unknown event type: {0}")]
    UnknownEventType(EventTypeId),

    #[error("Room {0} is not open for booking")]
    RoomUnavailable(RoomId),

    #[error("Reservation {0} is invalid: bad time range or duplicate id")]
    InvalidReservation(ReservationId),

    #[error("Snapshot error: {0}")]
    SnapshotError(String),
}

impl Error {
    /// Ids of the reservations that blocked a request, empty for any other error.
    pub fn conflicting_ids(&self) -> &[ReservationId] {
        match self {
            Error::SchedulingConflict(info) => &info.conflicting_ids,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SnapshotError(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::SnapshotError(e.to_string())
    }
}
