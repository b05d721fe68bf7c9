use serde::{Deserialize, Serialize};

use crate::EventTypeId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventType {
    pub id: EventTypeId,
    pub name: String,
    pub description: String,
    pub min_duration_minutes: u32,
    pub max_duration_minutes: u32,
    /// Reservations of this type start out pending and wait for a manager.
    pub requires_validation: bool,
}

impl EventType {
    pub fn is_recommended_duration(&self, minutes: i64) -> bool {
        minutes >= i64::from(self.min_duration_minutes)
            && minutes <= i64::from(self.max_duration_minutes)
    }

    /// css-friendly form of the name, e.g. "Réunion équipe" -> "réunion-équipe"
    pub fn slug(name: &str) -> String {
        name.to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommended_duration_should_be_inclusive() {
        let kind = EventType {
            id: 1,
            name: "Réunion équipe".into(),
            description: "Réunion interne d'équipe".into(),
            min_duration_minutes: 30,
            max_duration_minutes: 180,
            requires_validation: false,
        };
        assert!(kind.is_recommended_duration(30));
        assert!(kind.is_recommended_duration(180));
        assert!(!kind.is_recommended_duration(29));
        assert!(!kind.is_recommended_duration(181));
        assert_eq!(EventType::slug(&kind.name), "réunion-équipe");
    }
}
