use serde::{Deserialize, Serialize};

use crate::RoomId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    pub equipment_list: Vec<String>,
    pub location: String,
    pub available: bool,
    /// Price per hour in the smallest currency unit.
    pub hourly_rate: u32,
}

impl Room {
    /// Name without the conventional "Salle " prefix, as shown on calendar tiles.
    pub fn short_name(name: &str) -> &str {
        name.strip_prefix("Salle ").unwrap_or(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_should_drop_prefix_only_once() {
        assert_eq!(Room::short_name("Salle Baobab"), "Baobab");
        assert_eq!(Room::short_name("Salle Salle"), "Salle");
        assert_eq!(Room::short_name("Auditorium"), "Auditorium");
    }
}
