use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReservationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl ReservationStatus {
    /// Whether a reservation in this status still holds its room.
    pub fn is_blocking(self) -> bool {
        match self {
            ReservationStatus::Pending | ReservationStatus::Approved => true,
            ReservationStatus::Rejected | ReservationStatus::Cancelled => false,
        }
    }

    pub fn is_decidable(self) -> bool {
        matches!(self, ReservationStatus::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Approved => "Approved",
            ReservationStatus::Rejected => "Rejected",
            ReservationStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
