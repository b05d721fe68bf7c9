use abi::{Error, EventType, Reservation, Room};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use reservation::event_title;
use serde::{Deserialize, Serialize};

const ICAL_PRODID: &str = "-//Gestion Reservations//Calendar//FR";

/// Full data dump, as written by the JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataExport {
    pub reservations: Vec<Reservation>,
    pub rooms: Vec<Room>,
    pub event_types: Vec<EventType>,
    pub exported_at: DateTime<Utc>,
}

/// Import accepts partial dumps: absent collections are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataImport {
    pub reservations: Option<Vec<Reservation>>,
    pub rooms: Option<Vec<Room>>,
    pub event_types: Option<Vec<EventType>>,
}

impl DataExport {
    pub fn to_json_pretty(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl DataImport {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Render reservations as an iCalendar document. Wall-clock times are read in
/// `tz` and written as UTC.
pub fn to_ical<Tz: TimeZone>(reservations: &[Reservation], tz: &Tz) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{ICAL_PRODID}"),
        "CALSCALE:GREGORIAN".to_string(),
    ];

    for rsvp in reservations {
        lines.extend([
            "BEGIN:VEVENT".to_string(),
            format!("UID:reservation-{}@reservations.local", rsvp.id),
            format!("DTSTART:{}", utc_stamp(rsvp.date.and_time(rsvp.start_time), tz)),
            format!("DTEND:{}", utc_stamp(rsvp.date.and_time(rsvp.end_time), tz)),
            format!("SUMMARY:{}", escape_text(&event_title(rsvp))),
            format!(
                "DESCRIPTION:{}",
                escape_text(&format!("{} - {}", rsvp.subject, rsvp.event_type_name))
            ),
            format!("LOCATION:{}", escape_text(&rsvp.room_name)),
            format!("STATUS:{}", rsvp.status),
            "END:VEVENT".to_string(),
        ]);
    }

    lines.push("END:VCALENDAR".to_string());
    lines.join("\r\n")
}

fn utc_stamp<Tz: TimeZone>(local: NaiveDateTime, tz: &Tz) -> String {
    let utc = tz
        .from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        // times skipped by a DST jump are taken as UTC
        .unwrap_or_else(|| local.and_utc());
    utc.format("%Y%m%dT%H%M%SZ").to_string()
}

fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}
