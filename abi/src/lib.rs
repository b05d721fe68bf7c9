mod config;
mod error;
mod types;
mod utils;

pub use config::*;
pub use error::{Error, ReservationConflictInfo, ReservationWindow};
pub use types::*;
pub use utils::*;

pub type ReservationId = u32;
pub type RoomId = u32;
pub type EventTypeId = u32;
pub type UserId = u32;
