use std::cell::Cell;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, UtcOffset};
use tracing::warn;

/// Source of local wall-clock time for the log.
pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock in the local offset, resolved once at construction.
///
/// Falls back to UTC when the platform cannot report the local offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    pub fn new() -> Self {
        let offset = UtcOffset::current_local_offset().unwrap_or_else(|e| {
            warn!("local UTC offset unavailable ({e}), using UTC for log timestamps");
            UtcOffset::UTC
        });
        Self { offset }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<OffsetDateTime>,
}

impl FixedClock {
    pub fn new(at: OffsetDateTime) -> Self {
        Self { now: Cell::new(at) }
    }

    pub fn set(&self, at: OffsetDateTime) {
        self.now.set(at);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> OffsetDateTime {
        (**self).now()
    }
}

/// Partition file name for a calendar day: `<base>_<YYYYMMDD>.csv`.
pub fn partition_name(base: &str, date: Date) -> Result<String, time::error::Format> {
    let day = date.format(format_description!("[year][month][day]"))?;
    Ok(format!("{base}_{day}.csv"))
}

/// Human-readable timestamp column value, `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, time::error::Format> {
    at.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
}

/// Point id at microsecond resolution: `YYYYMMDDHHMMSSffffff`.
pub fn format_point_id(at: OffsetDateTime) -> Result<String, time::error::Format> {
    at.format(format_description!(
        "[year][month][day][hour][minute][second][subsecond digits:6]"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn partition_name_uses_compact_date() {
        let name = partition_name("tennis_log", datetime!(2026-03-07 23:59 UTC).date()).unwrap();
        assert_eq!(name, "tennis_log_20260307.csv");
    }

    #[test]
    fn timestamp_and_id_formats() {
        let at = datetime!(2026-03-07 09:05:01.123456 UTC);
        assert_eq!(format_timestamp(at).unwrap(), "2026-03-07 09:05:01");
        assert_eq!(format_point_id(at).unwrap(), "20260307090501123456");
    }

    #[test]
    fn fixed_clock_advances() {
        let clock = FixedClock::new(datetime!(2026-03-07 23:59 UTC));
        clock.advance(Duration::minutes(2));
        assert_eq!(clock.now().date(), datetime!(2026-03-08 0:00 UTC).date());
    }
}
