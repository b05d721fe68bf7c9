use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    minutes_between, EventTypeId, ReservationId, ReservationStatus, ReservationWindow, RoomId,
    UserId,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub requester_id: UserId,
    pub requester_name: String,
    pub room_id: RoomId,
    pub room_name: String,
    pub event_type_id: EventTypeId,
    pub event_type_name: String,
    pub subject: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: ReservationStatus,
    pub requested_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    pub decided_by: Option<String>,
    #[serde(default)]
    pub comments: String,
}

impl Reservation {
    pub fn is_blocking(&self) -> bool {
        self.status.is_blocking()
    }

    /// Half-open overlap: touching endpoints do not count.
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start_time < end && self.end_time > start
    }

    /// Whether `time` falls inside `[start_time, end_time)`.
    pub fn covers(&self, time: NaiveTime) -> bool {
        self.start_time <= time && time < self.end_time
    }

    pub fn duration_minutes(&self) -> i64 {
        minutes_between(self.start_time, self.end_time)
    }

    pub fn has_valid_range(&self) -> bool {
        self.start_time < self.end_time
    }

    pub fn window(&self) -> ReservationWindow {
        ReservationWindow {
            room_id: self.room_id,
            date: self.date,
            start: self.start_time,
            end: self.end_time,
        }
    }

    /// Lower-cased text the free-text search runs against.
    pub fn search_text(&self) -> String {
        [
            self.subject.as_str(),
            self.requester_name.as_str(),
            self.room_name.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn sample(start: &str, end: &str, status: ReservationStatus) -> Reservation {
        Reservation {
            id: 1,
            requester_id: 4,
            requester_name: "Aissatou Fall".into(),
            room_id: 1,
            room_name: "Salle Baobab".into(),
            event_type_id: 1,
            event_type_name: "Réunion équipe".into(),
            subject: "Réunion équipe marketing".into(),
            date: "2025-06-26".parse().unwrap(),
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            status,
            requested_at: Utc.with_ymd_and_hms(2025, 6, 21, 8, 0, 0).unwrap(),
            decided_at: None,
            decided_by: None,
            comments: String::new(),
        }
    }

    #[test]
    fn touching_intervals_should_not_overlap() {
        let rsvp = sample("09:00:00", "10:00:00", ReservationStatus::Approved);
        assert!(!rsvp.overlaps("10:00:00".parse().unwrap(), "11:00:00".parse().unwrap()));
        assert!(!rsvp.overlaps("08:00:00".parse().unwrap(), "09:00:00".parse().unwrap()));
        assert!(rsvp.overlaps("09:30:00".parse().unwrap(), "10:30:00".parse().unwrap()));
        assert!(rsvp.overlaps("08:00:00".parse().unwrap(), "12:00:00".parse().unwrap()));
    }

    #[test]
    fn covers_should_exclude_end() {
        let rsvp = sample("09:00:00", "10:30:00", ReservationStatus::Pending);
        assert!(rsvp.covers("09:00:00".parse().unwrap()));
        assert!(rsvp.covers("10:00:00".parse().unwrap()));
        assert!(!rsvp.covers("10:30:00".parse().unwrap()));
        assert_eq!(rsvp.duration_minutes(), 90);
    }

    #[test]
    fn search_text_should_join_lowercased_fields() {
        let rsvp = sample("09:00:00", "10:30:00", ReservationStatus::Pending);
        assert_eq!(
            rsvp.search_text(),
            "réunion équipe marketing aissatou fall salle baobab"
        );
    }
}
