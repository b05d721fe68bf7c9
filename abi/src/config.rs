use std::{fs, path::Path};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::{Actor, Error};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub actor: Actor,
    pub calendar: CalendarConfig,
    pub storage: StorageConfig,
    pub log: LogConfig,
}

/// Working window and slot grid used for availability and suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarConfig {
    pub day_start: NaiveTime,
    /// Exclusive: no slot starts at or after this time.
    pub day_end: NaiveTime,
    pub slot_minutes: u32,
    pub lookahead_days: u32,
    pub max_suggestions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageConfig {
    /// Where snapshots are saved; `~` and `$VARS` are expanded by the service.
    pub snapshot_path: Option<String>,
    pub seed_sample_data: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
}

impl Config {
    pub fn load(filename: impl AsRef<Path>) -> Result<Self, Error> {
        let config = fs::read_to_string(filename.as_ref()).map_err(|_| Error::ConfigReadError)?;
        serde_yaml::from_str(&config).map_err(|_| Error::ConfigParseError)
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            day_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            day_end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            slot_minutes: 30,
            lookahead_days: 7,
            max_suggestions: 5,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            seed_sample_data: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn config_should_be_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
actor:
  id: 7
  name: Fatou Ndiaye
  role: Manager
calendar:
  dayStart: "07:30:00"
  slotMinutes: 15
storage:
  snapshotPath: ~/.reservations/snapshot.json
  seedSampleData: false
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.actor, Actor::new(7, "Fatou Ndiaye", "Manager"));
        assert_eq!(config.calendar.day_start, "07:30:00".parse().unwrap());
        assert_eq!(config.calendar.day_end, "18:00:00".parse().unwrap());
        assert_eq!(config.calendar.slot_minutes, 15);
        assert_eq!(config.calendar.max_suggestions, 5);
        assert_eq!(
            config.storage.snapshot_path.as_deref(),
            Some("~/.reservations/snapshot.json")
        );
        assert!(!config.storage.seed_sample_data);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn missing_file_should_fail_to_read() {
        assert_eq!(
            Config::load("/definitely/not/here.yml"),
            Err(Error::ConfigReadError)
        );
    }

    #[test]
    fn malformed_file_should_fail_to_parse() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "actor: [not, a, map]").unwrap();
        assert_eq!(Config::load(file.path()), Err(Error::ConfigParseError));
    }
}
