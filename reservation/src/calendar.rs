use std::iter;

use abi::{
    add_minutes, matches_terms, CalendarConfig, CalendarEvent, EventPriority, EventStats,
    EventType, Reservation, ReservationStatus, Room, RoomId, SlotRun, SlotSuggestion,
};
use chrono::{Datelike, Days, NaiveDate, NaiveTime, Timelike};
use tracing::debug;

use crate::ReservationStore;

const TEXT_COLOR: &str = "#ffffff";

/// Read-only calendar view over a [`ReservationStore`].
#[derive(Debug)]
pub struct CalendarProjector<'a> {
    store: &'a ReservationStore,
    config: CalendarConfig,
}

impl<'a> CalendarProjector<'a> {
    pub fn new(store: &'a ReservationStore, config: CalendarConfig) -> Self {
        Self { store, config }
    }

    /// Every reservation dated within `[start, end]`, whatever its status.
    pub fn events_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<CalendarEvent> {
        self.in_range(start, end).map(to_event).collect()
    }

    /// Events whose reservation contains every term of `query` in its subject,
    /// requester, room or event type.
    pub fn search_events(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        query: &str,
    ) -> Vec<CalendarEvent> {
        self.in_range(start, end)
            .filter(|rsvp| {
                let text = [
                    rsvp.subject.as_str(),
                    rsvp.requester_name.as_str(),
                    rsvp.room_name.as_str(),
                    rsvp.event_type_name.as_str(),
                ]
                .join(" ")
                .to_lowercase();
                matches_terms(&text, query)
            })
            .map(to_event)
            .collect()
    }

    pub fn event_stats(&self, start: NaiveDate, end: NaiveDate) -> EventStats {
        self.in_range(start, end)
            .fold(EventStats::default(), |mut stats, rsvp| {
                stats.total += 1;
                match rsvp.status {
                    ReservationStatus::Approved => stats.approved += 1,
                    ReservationStatus::Pending => stats.pending += 1,
                    ReservationStatus::Rejected => stats.rejected += 1,
                    ReservationStatus::Cancelled => stats.cancelled += 1,
                }
                stats
            })
    }

    /// Slot starts on `date` not covered by a blocking reservation, ascending.
    /// Without a room, a slot is taken as soon as any room is booked.
    pub fn available_slots(&self, date: NaiveDate, room_id: Option<RoomId>) -> Vec<NaiveTime> {
        let busy: Vec<&Reservation> = self
            .store
            .reservations()
            .iter()
            .filter(|rsvp| {
                rsvp.date == date
                    && rsvp.is_blocking()
                    && room_id.map_or(true, |id| rsvp.room_id == id)
            })
            .collect();

        self.slot_grid()
            .filter(|slot| !busy.iter().any(|rsvp| rsvp.covers(*slot)))
            .collect()
    }

    /// For each slot, the run of directly following slots; emitted when long
    /// enough, always reported with exactly `required_minutes`. A zero
    /// duration yields no runs.
    pub fn find_consecutive_runs(
        &self,
        slots: &[NaiveTime],
        required_minutes: u32,
    ) -> Vec<SlotRun> {
        if required_minutes == 0 {
            return Vec::new();
        }
        let step = self.config.slot_minutes;
        slots
            .iter()
            .enumerate()
            .filter_map(|(i, &start)| {
                let mut duration = step;
                let mut end_slot = start;
                for &next in slots.iter().skip(i + 1) {
                    if next != add_minutes(end_slot, step) {
                        break;
                    }
                    duration += step;
                    end_slot = next;
                }
                (duration >= required_minutes).then(|| SlotRun {
                    start,
                    end: add_minutes(start, required_minutes),
                    duration_minutes: required_minutes,
                })
            })
            .collect()
    }

    /// Best scored free runs over the look-ahead window starting today.
    pub fn suggest_slots(
        &self,
        duration_minutes: u32,
        room_id: Option<RoomId>,
    ) -> Vec<SlotSuggestion> {
        let today = self.store.today();
        let mut suggestions: Vec<SlotSuggestion> = (0..self.config.lookahead_days)
            .filter_map(|offset| {
                today
                    .checked_add_days(Days::new(u64::from(offset)))
                    .map(|date| (offset, date))
            })
            .flat_map(|(offset, date)| {
                let slots = self.available_slots(date, room_id);
                self.find_consecutive_runs(&slots, duration_minutes)
                    .into_iter()
                    .map(move |run| SlotSuggestion {
                        date,
                        start: run.start,
                        end: run.end,
                        duration_minutes: run.duration_minutes,
                        score: slot_score(date, run.start, offset),
                    })
            })
            .collect();

        // stable: equal scores keep date then slot order
        suggestions.sort_by(|a, b| b.score.cmp(&a.score));
        suggestions.truncate(self.config.max_suggestions);
        debug!(duration_minutes, ?room_id, found = suggestions.len(), "suggested slots");
        suggestions
    }

    fn in_range(&self, start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = &'a Reservation> {
        self.store
            .reservations()
            .iter()
            .filter(move |rsvp| rsvp.date >= start && rsvp.date <= end)
    }

    fn slot_grid(&self) -> impl Iterator<Item = NaiveTime> {
        let CalendarConfig {
            day_start,
            day_end,
            slot_minutes,
            ..
        } = self.config;
        iter::successors(
            (slot_minutes > 0 && day_start < day_end).then_some(day_start),
            move |&slot| {
                let next = add_minutes(slot, slot_minutes);
                // a wrap past midnight ends the grid as well
                (next > slot && next < day_end).then_some(next)
            },
        )
    }
}

/// Weekdays, office hours and nearness all raise the score.
pub fn slot_score(date: NaiveDate, start: NaiveTime, days_from_today: u32) -> u32 {
    let weekday = if date.weekday().number_from_monday() <= 5 {
        10
    } else {
        0
    };
    let hour = match start.hour() {
        9..=16 => 15,
        8..=17 => 10,
        _ => 0,
    };
    weekday + hour + 10u32.saturating_sub(days_from_today)
}

pub fn background_color(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Approved => "#27ae60",
        ReservationStatus::Pending => "#f39c12",
        ReservationStatus::Rejected => "#e74c3c",
        ReservationStatus::Cancelled => "#95a5a6",
    }
}

pub fn border_color(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Approved => "#219a52",
        ReservationStatus::Pending => "#e67e22",
        ReservationStatus::Rejected => "#c0392b",
        ReservationStatus::Cancelled => "#7f8c8d",
    }
}

fn priority(status: ReservationStatus) -> EventPriority {
    match status {
        ReservationStatus::Pending => EventPriority::High,
        ReservationStatus::Approved => EventPriority::Medium,
        ReservationStatus::Rejected | ReservationStatus::Cancelled => EventPriority::Low,
    }
}

/// "<room without the Salle prefix> - <subject>"
pub fn event_title(rsvp: &Reservation) -> String {
    format!("{} - {}", Room::short_name(&rsvp.room_name), rsvp.subject)
}

fn to_event(rsvp: &Reservation) -> CalendarEvent {
    let status_class = format!("status-{}", rsvp.status.as_str().to_lowercase());
    CalendarEvent {
        id: format!("reservation-{}", rsvp.id),
        title: event_title(rsvp),
        start: rsvp.date.and_time(rsvp.start_time),
        end: rsvp.date.and_time(rsvp.end_time),
        background_color: background_color(rsvp.status).to_string(),
        border_color: border_color(rsvp.status).to_string(),
        text_color: TEXT_COLOR.to_string(),
        class_names: vec![
            "reservation-event".to_string(),
            status_class,
            format!("type-{}", EventType::slug(&rsvp.event_type_name)),
        ],
        priority: priority(rsvp.status),
        tooltip: format!(
            "{} · {} · {} - {} · {} · {}",
            rsvp.room_name,
            rsvp.requester_name,
            rsvp.start_time.format("%H:%M"),
            rsvp.end_time.format("%H:%M"),
            rsvp.subject,
            rsvp.status
        ),
        reservation_id: rsvp.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::test::{empty_store, manager, request, sample_store};
    use crate::Rsvp;

    fn t(s: &str) -> NaiveTime {
        s.parse().unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn events_in_range_should_map_reservations() {
        let store = sample_store();
        let calendar = store.calendar(CalendarConfig::default());
        let events = calendar.events_in_range(d("2025-06-26"), d("2025-06-28"));
        let ids: Vec<_> = events.iter().map(|e| e.reservation_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let first = &events[0];
        assert_eq!(first.id, "reservation-1");
        assert_eq!(first.title, "Baobab - Réunion équipe marketing");
        assert_eq!(first.start, d("2025-06-26").and_time(t("09:00")));
        assert_eq!(first.end, d("2025-06-26").and_time(t("10:30")));
        assert_eq!(first.background_color, "#27ae60");
        assert_eq!(first.border_color, "#219a52");
        assert_eq!(first.text_color, "#ffffff");
        assert_eq!(
            first.class_names,
            vec!["reservation-event", "status-approved", "type-réunion-équipe"]
        );
        assert_eq!(first.priority, EventPriority::Medium);

        let pending = &events[2];
        assert_eq!(pending.background_color, "#f39c12");
        assert_eq!(pending.priority, EventPriority::High);
    }

    #[test]
    fn events_should_include_every_status() {
        let mut store = sample_store();
        store.cancel(&manager(), 1).unwrap();
        let calendar = store.calendar(CalendarConfig::default());
        let events = calendar.events_in_range(d("2025-06-26"), d("2025-06-26"));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].background_color, "#95a5a6");
        assert_eq!(events[0].border_color, "#7f8c8d");
        assert_eq!(events[0].priority, EventPriority::Low);
    }

    #[test]
    fn search_and_stats_should_cover_range() {
        let mut store = sample_store();
        store.decide(&manager(), 4, false, None).unwrap();
        let calendar = store.calendar(CalendarConfig::default());

        let found = calendar.search_events(d("2025-06-01"), d("2025-06-30"), "séminaire KHADIJA");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].reservation_id, 4);
        assert!(calendar
            .search_events(d("2025-06-01"), d("2025-06-29"), "séminaire")
            .is_empty());

        let stats = calendar.event_stats(d("2025-06-01"), d("2025-06-30"));
        assert_eq!(
            stats,
            EventStats {
                total: 4,
                approved: 2,
                pending: 1,
                rejected: 1,
                cancelled: 0,
            }
        );
    }

    #[test]
    fn available_slots_should_skip_booked_time() {
        let store = sample_store();
        let calendar = store.calendar(CalendarConfig::default());

        let free = calendar.available_slots(d("2025-06-26"), Some(1));
        assert_eq!(free.len(), 20 - 3);
        assert_eq!(free[0], t("08:00"));
        assert_eq!(free[1], t("08:30"));
        assert_eq!(free[2], t("10:30"));
        assert_eq!(*free.last().unwrap(), t("17:30"));

        // another room is untouched, but the all-rooms view sees the booking
        assert_eq!(calendar.available_slots(d("2025-06-26"), Some(2)).len(), 20);
        assert_eq!(calendar.available_slots(d("2025-06-26"), None).len(), 17);
    }

    #[test]
    fn cancelled_reservations_should_not_take_slots() {
        let mut store = sample_store();
        store.cancel(&manager(), 4).unwrap();
        let calendar = store.calendar(CalendarConfig::default());
        assert_eq!(calendar.available_slots(d("2025-06-30"), Some(2)).len(), 20);
    }

    #[test]
    fn consecutive_runs_should_be_clipped_to_request() {
        let store = empty_store();
        let calendar = store.calendar(CalendarConfig::default());
        let slots = vec![t("08:00"), t("08:30"), t("09:00"), t("10:00"), t("10:30")];

        let runs = calendar.find_consecutive_runs(&slots, 60);
        assert_eq!(
            runs,
            vec![
                SlotRun {
                    start: t("08:00"),
                    end: t("09:00"),
                    duration_minutes: 60,
                },
                SlotRun {
                    start: t("08:30"),
                    end: t("09:30"),
                    duration_minutes: 60,
                },
                SlotRun {
                    start: t("10:00"),
                    end: t("11:00"),
                    duration_minutes: 60,
                },
            ]
        );

        let runs = calendar.find_consecutive_runs(&slots, 30);
        assert_eq!(runs.len(), 5);
        assert!(calendar.find_consecutive_runs(&slots, 120).is_empty());
    }

    #[test]
    fn zero_duration_should_yield_nothing() {
        let store = empty_store();
        let calendar = store.calendar(CalendarConfig::default());
        let slots = calendar.available_slots(d("2025-06-26"), Some(1));
        assert_eq!(slots.len(), 20);

        assert!(calendar.find_consecutive_runs(&slots, 0).is_empty());
        assert!(calendar.suggest_slots(0, Some(1)).is_empty());
    }

    #[test]
    fn slot_score_should_prefer_weekdays_office_hours_and_nearness() {
        // 2025-06-26 is a Thursday, 2025-06-28 a Saturday
        assert_eq!(slot_score(d("2025-06-26"), t("10:00"), 0), 35);
        assert_eq!(slot_score(d("2025-06-26"), t("08:00"), 0), 30);
        assert_eq!(slot_score(d("2025-06-26"), t("17:30"), 2), 28);
        assert_eq!(slot_score(d("2025-06-28"), t("16:30"), 2), 23);
        assert_eq!(slot_score(d("2025-06-28"), t("07:00"), 12), 0);
    }

    #[test]
    fn suggest_slots_should_return_best_five() {
        let mut store = empty_store();
        // fill Thursday 09:00-17:00 in room 1
        store
            .create_reservation(&manager(), request(1, 4, "2025-06-26", "09:00", "17:00"))
            .unwrap();
        let calendar = store.calendar(CalendarConfig::default());
        let suggestions = calendar.suggest_slots(60, Some(1));

        assert_eq!(suggestions.len(), 5);
        assert!(suggestions.windows(2).all(|w| w[0].score >= w[1].score));
        // today only has 08:00 and 17:00 runs, so the best picks are tomorrow
        let first = &suggestions[0];
        assert_eq!(first.date, d("2025-06-27"));
        assert_eq!(first.start, t("09:00"));
        assert_eq!(first.end, t("10:00"));
        assert_eq!(first.score, 34);
        assert!(suggestions.iter().all(|s| s.date == d("2025-06-27")));
    }

    #[test]
    fn suggest_slots_should_honour_config() {
        let store = empty_store();
        let config = CalendarConfig {
            lookahead_days: 1,
            max_suggestions: 50,
            ..CalendarConfig::default()
        };
        let calendar = store.calendar(config);
        // 20 slots, a 90 minute run fits from 08:00 up to 16:30
        let suggestions = calendar.suggest_slots(90, None);
        assert_eq!(suggestions.len(), 18);
        assert!(suggestions.iter().all(|s| s.date == d("2025-06-26")));
        // office hours outrank the 8 o'clock starts
        assert_eq!(suggestions[0].start, t("09:00"));
        assert_eq!(suggestions[16].start, t("08:00"));
        assert_eq!(suggestions[17].start, t("08:30"));
    }
}
