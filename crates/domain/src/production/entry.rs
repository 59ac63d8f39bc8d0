use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::plant_time;
use crate::serial::SerialNumber;

/// One production log entry: a serial that came off the line, with the
/// moment it was logged.
///
/// The same serial can appear more than once when a unit is re-logged;
/// selection keeps the first occurrence and drops the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionEntry {
    pub serial: SerialNumber,
    pub recorded_at: DateTime<Utc>,
}

impl ProductionEntry {
    pub fn new(serial: SerialNumber, recorded_at: DateTime<Utc>) -> Self {
        Self {
            serial,
            recorded_at,
        }
    }

    /// Calendar date of this entry in plant-local time.
    pub fn plant_date(&self) -> NaiveDate {
        plant_time::local_date(self.recorded_at)
    }
}
