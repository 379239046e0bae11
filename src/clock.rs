use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};

/// Source of "now" for everything that needs the current day. Business logic takes
/// dates as parameters; handlers ask the clock held in the app state.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day in the user's local time.
    fn today(&self) -> NaiveDate;

    /// Timestamp for `createdAt`/`updatedAt`, e.g. `2026-02-12T10:00:00.000Z`.
    fn timestamp(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single instant.
pub struct FixedClock {
    now: DateTime<Utc>,
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, today: NaiveDate) -> Self {
        Self { now, today }
    }

    /// Midnight UTC of `today`.
    pub fn on(today: NaiveDate) -> Self {
        Self::new(today.and_time(chrono::NaiveTime::MIN).and_utc(), today)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_formats_iso_timestamps() {
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2026, 2, 12).unwrap());
        assert_eq!(clock.timestamp(), "2026-02-12T00:00:00.000Z");
        assert_eq!(clock.today().to_string(), "2026-02-12");
    }
}
