use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Time left until the exam starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    /// Time from `now` until midnight on `exam`; `None` once that moment has passed.
    pub fn until(exam: NaiveDate, now: NaiveDateTime) -> Option<Self> {
        let left = exam.and_time(NaiveTime::MIN) - now;
        if left.num_seconds() <= 0 {
            return None;
        }
        let total = left.num_seconds();
        Some(Countdown {
            days: total / 86_400,
            hours: total % 86_400 / 3_600,
            minutes: total % 3_600 / 60,
            seconds: total % 60,
        })
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d {:02}h {:02}m {:02}s", self.days, self.hours, self.minutes, self.seconds)
    }
}
