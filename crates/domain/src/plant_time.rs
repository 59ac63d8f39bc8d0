use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::America::Sao_Paulo;
use chrono_tz::Tz;

/// Time zone of the plant floor.
///
/// Timestamps are stored and compared in UTC; calendar bucketing ("today's
/// production", "inspected today") happens in this zone.
pub const PLANT_TZ: Tz = Sao_Paulo;

/// Calendar date of `instant` on the plant floor.
pub fn local_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&PLANT_TZ).date_naive()
}

/// Today's date on the plant floor.
pub fn today() -> NaiveDate {
    local_date(Utc::now())
}
