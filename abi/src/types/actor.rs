use serde::{Deserialize, Serialize};

use crate::{Reservation, ReservationStatus, UserId};

/// Whoever is driving a mutation: recorded as requester on creation and as
/// decider on approve/reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub role: String,
}

impl Actor {
    pub fn new(id: UserId, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: role.into(),
        }
    }

    /// Admins and managers may approve or reject pending reservations.
    pub fn can_validate(&self) -> bool {
        matches!(self.role.as_str(), "Admin" | "Manager")
    }

    /// The requester or an admin may cancel a reservation that is not
    /// already cancelled.
    pub fn can_cancel(&self, rsvp: &Reservation) -> bool {
        (rsvp.requester_id == self.id || self.role == "Admin")
            && rsvp.status != ReservationStatus::Cancelled
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::new(1, "Amadou Diop", "Admin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::reservation::tests::sample;

    #[test]
    fn only_admins_and_managers_should_validate() {
        assert!(Actor::new(1, "Amadou Diop", "Admin").can_validate());
        assert!(Actor::new(2, "Fatou Ndiaye", "Manager").can_validate());
        assert!(!Actor::new(4, "Aissatou Fall", "User").can_validate());
        assert!(!Actor::new(5, "Moussa Ba", "").can_validate());
    }

    #[test]
    fn owner_or_admin_should_cancel_live_reservations() {
        let mut rsvp = sample("09:00", "10:00", ReservationStatus::Pending);
        let owner = Actor::new(4, "Aissatou Fall", "User");
        let admin = Actor::new(1, "Amadou Diop", "Admin");
        let manager = Actor::new(2, "Fatou Ndiaye", "Manager");
        let stranger = Actor::new(5, "Moussa Ba", "User");

        assert!(owner.can_cancel(&rsvp));
        assert!(admin.can_cancel(&rsvp));
        assert!(!manager.can_cancel(&rsvp));
        assert!(!stranger.can_cancel(&rsvp));

        rsvp.status = ReservationStatus::Cancelled;
        assert!(!owner.can_cancel(&rsvp));
        assert!(!admin.can_cancel(&rsvp));
    }
}
