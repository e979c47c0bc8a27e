use chrono::{Local, NaiveDate};

/// Source of the current time, used for ids and the form's default date
pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;

    /// Current calendar date in the viewer's time zone
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Local::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    millis: i64,
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(millis: i64, today: NaiveDate) -> Self {
        Self { millis, today }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
