use std::{fs, io, path::Path};

use abi::{Error, Reservation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Locally saved copy of the reservation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub reservations: Vec<Reservation>,
    pub last_update: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(reservations: Vec<Reservation>, last_update: DateTime<Utc>) -> Self {
        Self {
            reservations,
            last_update,
        }
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub fn load(path: &Path) -> Result<Option<Self>, Error> {
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
