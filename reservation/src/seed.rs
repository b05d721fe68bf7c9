use abi::{EventType, Reservation, ReservationStatus, Room};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

pub fn sample_rooms() -> Vec<Room> {
    vec![
        room(
            1,
            "Salle Baobab",
            25,
            "Projecteur, Tableau, Climatisation, Wifi",
            "Rez-de-chaussée - Aile Est",
            15000,
        ),
        room(
            2,
            "Salle Fromager",
            12,
            "Écran TV, Tableau blanc, Climatisation",
            "1er étage - Aile Nord",
            8000,
        ),
        room(
            3,
            "Salle Acacia",
            50,
            "Vidéoprojecteur, Sonorisation, Micros, Climatisation",
            "Rez-de-chaussée - Aile Ouest",
            25000,
        ),
        room(4, "Salle Caïlcédrat", 8, "Écran TV, Tableau, Wifi", "2ème étage - Aile Sud", 5000),
        room(
            5,
            "Salle Palmier",
            30,
            "Projecteur, Sonorisation, Climatisation, Wifi",
            "1er étage - Aile Est",
            18000,
        ),
    ]
}

pub fn sample_event_types() -> Vec<EventType> {
    vec![
        event_type(1, "Réunion équipe", "Réunion interne d'équipe", 30, 180, false),
        event_type(2, "Formation", "Session de formation professionnelle", 120, 480, true),
        event_type(3, "Conférence", "Présentation ou conférence", 60, 240, true),
        event_type(4, "Séminaire", "Séminaire de travail", 240, 480, true),
        event_type(5, "Entretien", "Entretien individuel ou collectif", 30, 120, false),
    ]
}

/// Demo bookings, in the order the dashboard lists them.
pub fn sample_reservations() -> Vec<Reservation> {
    vec![
        Reservation {
            id: 1,
            requester_id: 4,
            requester_name: "Aissatou Fall".into(),
            room_id: 1,
            room_name: "Salle Baobab".into(),
            event_type_id: 1,
            event_type_name: "Réunion équipe".into(),
            subject: "Réunion équipe marketing".into(),
            date: date(2025, 6, 26),
            start_time: time(9, 0),
            end_time: time(10, 30),
            status: ReservationStatus::Approved,
            requested_at: timestamp(2025, 6, 21, 8, 0),
            decided_at: Some(timestamp(2025, 6, 21, 10, 0)),
            decided_by: Some("Fatou Ndiaye".into()),
            comments: "Préparation campagne été".into(),
        },
        Reservation {
            id: 2,
            requester_id: 5,
            requester_name: "Moussa Ba".into(),
            room_id: 3,
            room_name: "Salle Acacia".into(),
            event_type_id: 3,
            event_type_name: "Conférence".into(),
            subject: "Conférence sur l'IA".into(),
            date: date(2025, 6, 27),
            start_time: time(14, 0),
            end_time: time(16, 0),
            status: ReservationStatus::Approved,
            requested_at: timestamp(2025, 6, 20, 15, 30),
            decided_at: Some(timestamp(2025, 6, 21, 9, 0)),
            decided_by: Some("Fatou Ndiaye".into()),
            comments: "Événement ouvert au public".into(),
        },
        Reservation {
            id: 3,
            requester_id: 7,
            requester_name: "Ibrahima Gueye".into(),
            room_id: 5,
            room_name: "Salle Palmier".into(),
            event_type_id: 2,
            event_type_name: "Formation".into(),
            subject: "Formation sécurité informatique".into(),
            date: date(2025, 6, 28),
            start_time: time(9, 0),
            end_time: time(12, 0),
            status: ReservationStatus::Pending,
            requested_at: timestamp(2025, 6, 21, 12, 0),
            decided_at: None,
            decided_by: None,
            comments: "Formation obligatoire pour tous".into(),
        },
        Reservation {
            id: 4,
            requester_id: 8,
            requester_name: "Khadija Diouf".into(),
            room_id: 2,
            room_name: "Salle Fromager".into(),
            event_type_id: 4,
            event_type_name: "Séminaire".into(),
            subject: "Séminaire innovation".into(),
            date: date(2025, 6, 30),
            start_time: time(8, 0),
            end_time: time(17, 0),
            status: ReservationStatus::Pending,
            requested_at: timestamp(2025, 6, 21, 14, 30),
            decided_at: None,
            decided_by: None,
            comments: "Journée complète avec pauses".into(),
        },
    ]
}

fn room(
    id: u32,
    name: &str,
    capacity: u32,
    equipment: &str,
    location: &str,
    hourly_rate: u32,
) -> Room {
    Room {
        id,
        name: name.into(),
        capacity,
        equipment_list: equipment.split(", ").map(String::from).collect(),
        location: location.into(),
        available: true,
        hourly_rate,
    }
}

fn event_type(
    id: u32,
    name: &str,
    description: &str,
    min_duration_minutes: u32,
    max_duration_minutes: u32,
    requires_validation: bool,
) -> EventType {
    EventType {
        id,
        name: name.into(),
        description: description.into(),
        min_duration_minutes,
        max_duration_minutes,
        requires_validation,
    }
}

// literals below are all valid dates and times
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    date(year, month, day).and_time(time(hour, minute)).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_data_should_respect_store_invariants() {
        let reservations = sample_reservations();
        assert!(reservations.iter().all(|r| r.has_valid_range()));
        let rooms = sample_rooms();
        let types = sample_event_types();
        for rsvp in &reservations {
            let room = rooms.iter().find(|r| r.id == rsvp.room_id).unwrap();
            assert_eq!(room.name, rsvp.room_name);
            let kind = types.iter().find(|t| t.id == rsvp.event_type_id).unwrap();
            assert_eq!(kind.name, rsvp.event_type_name);
        }
        assert_eq!(rooms[0].equipment_list.len(), 4);
    }
}
