use chrono::NaiveDate;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::{Reservation, ReservationStatus, RoomId};

/// All set fields must match; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(default, setter(into, strip_option))]
#[serde(rename_all = "camelCase")]
pub struct ReservationFilter {
    pub status: Option<ReservationStatus>,
    pub room_id: Option<RoomId>,
    pub date: Option<NaiveDate>,
    pub search_text: Option<String>,
}

impl ReservationFilter {
    pub fn matches(&self, rsvp: &Reservation) -> bool {
        self.status.map_or(true, |status| rsvp.status == status)
            && self.room_id.map_or(true, |room_id| rsvp.room_id == room_id)
            && self.date.map_or(true, |date| rsvp.date == date)
            && self
                .search_text
                .as_deref()
                .map_or(true, |text| matches_terms(&rsvp.search_text(), text))
    }
}

/// Every whitespace-separated term of `query` must occur in `haystack`.
/// `haystack` is expected lower-cased already.
pub fn matches_terms(haystack: &str, query: &str) -> bool {
    query
        .to_lowercase()
        .split_whitespace()
        .all(|term| haystack.contains(term))
}
