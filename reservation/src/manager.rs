use std::{collections::HashSet, sync::Arc};

use abi::{
    percentage, Actor, Error, EventType, Reservation, ReservationConflictInfo, ReservationFilter,
    ReservationId, ReservationRequest, ReservationStats, ReservationStatus, Room, RoomId,
    RoomUsage, UsageStats,
};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use mockable::{Clock, DefaultClock};
use tracing::{debug, info, warn};

use crate::{seed, CalendarProjector, ReservationStore, Rsvp};

impl Rsvp for ReservationStore {
    fn list_reservations(&self, filter: &ReservationFilter) -> Vec<Reservation> {
        let found: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|rsvp| filter.matches(rsvp))
            .cloned()
            .collect();
        debug!(?filter, found = found.len(), "listed reservations");
        found
    }

    fn check_overlap(
        &self,
        room_id: RoomId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        exclude: Option<ReservationId>,
    ) -> Vec<Reservation> {
        self.reservations
            .iter()
            .filter(|rsvp| {
                rsvp.room_id == room_id
                    && rsvp.date == date
                    && rsvp.is_blocking()
                    && exclude != Some(rsvp.id)
                    && rsvp.overlaps(start, end)
            })
            .cloned()
            .collect()
    }

    fn create_reservation(
        &mut self,
        actor: &Actor,
        request: ReservationRequest,
    ) -> Result<Reservation, Error> {
        request.validate()?;

        let room = self
            .room(request.room_id)
            .ok_or(Error::UnknownRoom(request.room_id))?;
        if !room.available {
            warn!(room_id = room.id, "booking refused, room is closed");
            return Err(Error::RoomUnavailable(room.id));
        }
        let room_name = room.name.clone();

        let event_type = self
            .event_type(request.event_type_id)
            .ok_or(Error::UnknownEventType(request.event_type_id))?;
        if !event_type.is_recommended_duration(request.duration_minutes()) {
            warn!(
                event_type = %event_type.name,
                minutes = request.duration_minutes(),
                min = event_type.min_duration_minutes,
                max = event_type.max_duration_minutes,
                "duration outside the recommended range"
            );
        }
        let event_type_name = event_type.name.clone();
        let requires_validation = event_type.requires_validation;

        let conflicts = self.check_overlap(
            request.room_id,
            request.date,
            request.start_time,
            request.end_time,
            None,
        );
        if !conflicts.is_empty() {
            let info = ReservationConflictInfo {
                new: request.window(),
                conflicting_ids: conflicts.iter().map(|rsvp| rsvp.id).collect(),
            };
            warn!(%info, "scheduling conflict");
            return Err(Error::SchedulingConflict(info));
        }

        let now = self.clock.utc();
        let (status, decided_at, decided_by) = if requires_validation {
            (ReservationStatus::Pending, None, None)
        } else {
            (ReservationStatus::Approved, Some(now), Some(actor.name.clone()))
        };

        let rsvp = Reservation {
            id: self.next_id(),
            requester_id: actor.id,
            requester_name: actor.name.clone(),
            room_id: request.room_id,
            room_name,
            event_type_id: request.event_type_id,
            event_type_name,
            subject: request.subject,
            date: request.date,
            start_time: request.start_time,
            end_time: request.end_time,
            status,
            requested_at: now,
            decided_at,
            decided_by,
            comments: request.comments,
        };
        self.reservations.insert(0, rsvp.clone());
        info!(id = rsvp.id, status = %rsvp.status, room = %rsvp.room_name, "reservation created");
        Ok(rsvp)
    }

    fn decide(
        &mut self,
        actor: &Actor,
        id: ReservationId,
        approve: bool,
        comment: Option<&str>,
    ) -> Result<Reservation, Error> {
        let now = self.clock.utc();
        let rsvp = self.find_mut(id)?;
        if !rsvp.status.is_decidable() {
            warn!(id, status = %rsvp.status, "reservation already decided");
            return Err(Error::InvalidTransition {
                id,
                status: rsvp.status,
            });
        }

        rsvp.status = if approve {
            ReservationStatus::Approved
        } else {
            ReservationStatus::Rejected
        };
        rsvp.decided_at = Some(now);
        rsvp.decided_by = Some(actor.name.clone());
        if let Some(comment) = comment.filter(|c| !c.is_empty()) {
            rsvp.comments = comment.to_string();
        }
        info!(id, status = %rsvp.status, by = %actor.name, "reservation decided");
        Ok(rsvp.clone())
    }

    fn cancel(&mut self, actor: &Actor, id: ReservationId) -> Result<Reservation, Error> {
        let rsvp = self.find_mut(id)?;
        let previous = rsvp.status;
        rsvp.status = ReservationStatus::Cancelled;
        info!(id, %previous, by = %actor.name, "reservation cancelled");
        Ok(rsvp.clone())
    }

    fn get(&self, id: ReservationId) -> Result<Reservation, Error> {
        self.reservations
            .iter()
            .find(|rsvp| rsvp.id == id)
            .cloned()
            .ok_or(Error::NotFound(id))
    }

    fn statistics(&self) -> ReservationStats {
        let today = self.today();
        let count = |status| {
            self.reservations
                .iter()
                .filter(|rsvp| rsvp.status == status)
                .count()
        };
        let total = self.reservations.len();
        let approved = count(ReservationStatus::Approved);

        ReservationStats {
            total,
            approved,
            pending: count(ReservationStatus::Pending),
            rejected: count(ReservationStatus::Rejected),
            today: self
                .reservations
                .iter()
                .filter(|rsvp| rsvp.date == today)
                .count(),
            approval_rate: percentage(approved, total),
        }
    }
}

impl ReservationStore {
    pub fn new(rooms: Vec<Room>, event_types: Vec<EventType>, clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms,
            event_types,
            reservations: Vec::new(),
            clock,
        }
    }

    /// Store pre-filled with the demo rooms, event types and reservations.
    pub fn with_sample_data(clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: seed::sample_rooms(),
            event_types: seed::sample_event_types(),
            reservations: seed::sample_reservations(),
            clock,
        }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    pub fn event_types(&self) -> &[EventType] {
        &self.event_types
    }

    pub fn event_type(&self, id: abi::EventTypeId) -> Option<&EventType> {
        self.event_types.iter().find(|kind| kind.id == id)
    }

    /// Most recent first.
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn recent(&self, limit: usize) -> &[Reservation] {
        &self.reservations[..limit.min(self.reservations.len())]
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// The local calendar date, used for "today" counters and suggestions.
    pub fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    pub fn calendar(&self, config: abi::CalendarConfig) -> CalendarProjector<'_> {
        CalendarProjector::new(self, config)
    }

    pub fn usage_stats(&self) -> UsageStats {
        let week_ago = self.clock.utc() - TimeDelta::days(7);
        let approved: Vec<&Reservation> = self
            .reservations
            .iter()
            .filter(|rsvp| rsvp.status == ReservationStatus::Approved)
            .collect();

        let mut usage: Vec<RoomUsage> = Vec::new();
        for rsvp in &approved {
            match usage.iter_mut().find(|u| u.name == rsvp.room_name) {
                Some(entry) => entry.count += 1,
                None => usage.push(RoomUsage {
                    name: rsvp.room_name.clone(),
                    count: 1,
                }),
            }
        }
        // first room to reach the highest count wins ties
        let most_used_room = usage.into_iter().fold(None, |best: Option<RoomUsage>, u| {
            match best {
                Some(b) if b.count >= u.count => Some(b),
                _ => Some(u),
            }
        });

        let average_duration_minutes = match i64::try_from(approved.len()) {
            Ok(n) if n > 0 => {
                let total: i64 = approved.iter().map(|rsvp| rsvp.duration_minutes()).sum();
                (total + n / 2).div_euclid(n)
            }
            _ => 0,
        };

        UsageStats {
            total_reservations: self.reservations.len(),
            weekly_reservations: self
                .reservations
                .iter()
                .filter(|rsvp| rsvp.requested_at >= week_ago)
                .count(),
            most_used_room,
            average_duration_minutes,
            approval_rate: percentage(approved.len(), self.reservations.len()),
        }
    }

    /// Swap the whole reservation list, e.g. from a snapshot. Nothing changes
    /// unless every record has `start < end` and a unique id.
    pub fn replace_reservations(&mut self, reservations: Vec<Reservation>) -> Result<(), Error> {
        if let Some(bad) = reservations.iter().find(|rsvp| !rsvp.has_valid_range()) {
            warn!(id = bad.id, "refusing reservation list with an invalid time range");
            return Err(Error::InvalidReservation(bad.id));
        }
        let mut seen = HashSet::with_capacity(reservations.len());
        if let Some(dup) = reservations.iter().find(|rsvp| !seen.insert(rsvp.id)) {
            warn!(id = dup.id, "refusing reservation list with a duplicate id");
            return Err(Error::InvalidReservation(dup.id));
        }
        info!(count = reservations.len(), "reservation list replaced");
        self.reservations = reservations;
        Ok(())
    }

    pub fn replace_rooms(&mut self, rooms: Vec<Room>) {
        self.rooms = rooms;
    }

    pub fn replace_event_types(&mut self, event_types: Vec<EventType>) {
        self.event_types = event_types;
    }

    fn next_id(&self) -> ReservationId {
        self.reservations
            .iter()
            .map(|rsvp| rsvp.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    fn find_mut(&mut self, id: ReservationId) -> Result<&mut Reservation, Error> {
        self.reservations
            .iter_mut()
            .find(|rsvp| rsvp.id == id)
            .ok_or(Error::NotFound(id))
    }
}

impl Default for ReservationStore {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), Arc::new(DefaultClock))
    }
}
