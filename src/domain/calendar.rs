// Calendar-day boundaries in the zone used for grouping and labels
use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone,
    Utc,
};

/// Zone whose calendar dates define a "day".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarZone {
    /// Host's local timezone.
    Local,
    Fixed(FixedOffset),
}

impl CalendarZone {
    #[cfg(test)]
    pub fn utc() -> Self {
        CalendarZone::Fixed(chrono::Offset::fix(&Utc))
    }

    /// Builds a fixed zone from an offset in minutes east of UTC.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(CalendarZone::Fixed)
    }

    pub fn day_key(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            CalendarZone::Local => instant.with_timezone(&Local).date_naive(),
            CalendarZone::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }

    pub fn start_of_day(&self, day: NaiveDate) -> DateTime<Utc> {
        match self {
            CalendarZone::Local => start_of_day(day, &Local),
            CalendarZone::Fixed(offset) => start_of_day(day, offset),
        }
    }

    /// Resolves an offset-less wall-clock time in this zone.
    pub fn resolve_naive(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            CalendarZone::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|t| t.with_timezone(&Utc)),
            CalendarZone::Fixed(offset) => offset
                .from_local_datetime(&naive)
                .earliest()
                .map(|t| t.with_timezone(&Utc)),
        }
    }
}

/// First instant of `day` in `tz`. When local midnight falls in a DST gap,
/// the first valid hour of that date is used instead.
pub fn start_of_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    (0..24)
        .find_map(|hour| {
            tz.from_local_datetime(&(midnight + TimeDelta::hours(hour)))
                .earliest()
        })
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}
