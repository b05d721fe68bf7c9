mod actor;
mod calendar;
mod event_type;
mod request;
mod reservation;
mod reservation_filter;
mod reservation_status;
mod room;
mod stats;

pub use actor::Actor;
pub use calendar::{CalendarEvent, EventPriority, EventStats, SlotRun, SlotSuggestion};
pub use event_type::EventType;
pub use request::ReservationRequest;
pub use reservation::Reservation;
pub use reservation_filter::{matches_terms, ReservationFilter, ReservationFilterBuilder};
pub use reservation_status::ReservationStatus;
pub use room::Room;
pub use stats::{ReservationStats, RoomUsage, UsageStats};
