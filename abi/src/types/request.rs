use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{minutes_between, Error, EventTypeId, ReservationWindow, RoomId};

/// What the booking form submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub room_id: RoomId,
    pub event_type_id: EventTypeId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub subject: String,
    #[serde(default)]
    pub comments: String,
}

impl ReservationRequest {
    pub fn new(
        room_id: RoomId,
        event_type_id: EventTypeId,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            room_id,
            event_type_id,
            date,
            start_time,
            end_time,
            subject: subject.into(),
            comments: String::new(),
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.start_time >= self.end_time {
            return Err(Error::InvalidTimeRange {
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok(())
    }

    pub fn duration_minutes(&self) -> i64 {
        minutes_between(self.start_time, self.end_time)
    }

    pub fn window(&self) -> ReservationWindow {
        ReservationWindow {
            room_id: self.room_id,
            date: self.date,
            start: self.start_time,
            end: self.end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(start: &str, end: &str) -> ReservationRequest {
        ReservationRequest::new(
            1,
            1,
            "2025-07-01".parse().unwrap(),
            start.parse().unwrap(),
            end.parse().unwrap(),
            "Point hebdo",
        )
    }

    #[test]
    fn validate_should_reject_empty_and_reversed_ranges() {
        let start: NaiveTime = "10:00:00".parse().unwrap();
        assert_eq!(
            request("10:00:00", "10:00:00").validate(),
            Err(Error::InvalidTimeRange { start, end: start })
        );
        assert!(request("11:00:00", "10:00:00").validate().is_err());
        assert!(request("10:00:00", "10:30:00").validate().is_ok());
    }
}
