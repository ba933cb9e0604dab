//! Study window settings: start date, end date and the daily hour target.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::config::ExamConfig;
use super::error::{PlannerError, Result};

pub const MIN_DAILY_HOURS: i32 = 1;
pub const MAX_DAILY_HOURS: i32 = 12;
pub const DEFAULT_DAILY_HOURS: i32 = 6;

/// Clamps a requested daily hour target into `[1, 12]`.
pub fn clamp_daily_hours(hours: i64) -> i32 {
    hours.clamp(MIN_DAILY_HOURS as i64, MAX_DAILY_HOURS as i64) as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySettings {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Always within `[1, 12]`. Recorded with the plan; it does not size the workload.
    pub daily_hours: i32,
}

impl StudySettings {
    /// Builds settings, clamping `daily_hours` into range.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, daily_hours: i64) -> Self {
        StudySettings {
            start_date,
            end_date,
            daily_hours: clamp_daily_hours(daily_hours),
        }
    }

    /// Settings used before anything has been saved: today until exam day, six hours a day.
    /// The window never ends before it starts, even once the exam is behind `today`.
    pub fn defaults(today: NaiveDate, exam: &ExamConfig) -> Self {
        StudySettings::new(today, exam.exam_date.max(today), DEFAULT_DAILY_HOURS as i64)
    }

    /// Checks the window against `today` and caps the end date at the exam.
    ///
    /// # Errors
    ///
    /// `ValidationFailure` when the exam is already over, the start lies in the
    /// past or the end precedes the start.
    pub fn validated(&self, today: NaiveDate, exam: &ExamConfig) -> Result<StudySettings> {
        if exam.exam_date < today {
            return Err(PlannerError::validation(format!(
                "exam date {} has already passed",
                exam.exam_date
            )));
        }
        if self.start_date < today {
            return Err(PlannerError::validation(format!(
                "start date {} is before today ({})",
                self.start_date, today
            )));
        }

        let end_date = if self.end_date > exam.exam_date {
            tracing::warn!(requested = %self.end_date, exam = %exam.exam_date, "end date capped at exam date");
            exam.exam_date
        } else {
            self.end_date
        };

        if end_date < self.start_date {
            return Err(PlannerError::validation(format!(
                "end date {} is before start date {}",
                end_date, self.start_date
            )));
        }

        Ok(StudySettings {
            start_date: self.start_date,
            end_date,
            daily_hours: clamp_daily_hours(self.daily_hours as i64),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_hours_clamped() {
        assert_eq!(clamp_daily_hours(20), 12);
        assert_eq!(clamp_daily_hours(0), 1);
        assert_eq!(clamp_daily_hours(-4), 1);
        assert_eq!(clamp_daily_hours(7), 7);
        assert_eq!(StudySettings::new(date(2025, 2, 1), date(2025, 3, 1), 20).daily_hours, 12);
    }

    #[test]
    fn test_validated_caps_end_at_exam() {
        let exam = ExamConfig::default();
        let settings = StudySettings::new(date(2025, 2, 1), date(2025, 6, 30), 6);
        let checked = settings.validated(date(2025, 1, 15), &exam).unwrap();
        assert_eq!(checked.end_date, exam.exam_date);
    }

    #[test]
    fn test_validated_rejects_past_start() {
        let exam = ExamConfig::default();
        let settings = StudySettings::new(date(2025, 1, 1), date(2025, 3, 1), 6);
        let err = settings.validated(date(2025, 1, 2), &exam).unwrap_err();
        assert!(matches!(err, PlannerError::ValidationFailure(_)));
    }

    #[test]
    fn test_validated_rejects_inverted_window() {
        let exam = ExamConfig::default();
        let settings = StudySettings::new(date(2025, 3, 1), date(2025, 2, 1), 6);
        assert!(settings.validated(date(2025, 1, 1), &exam).is_err());
    }

    #[test]
    fn test_defaults_window_after_exam_is_not_inverted() {
        let exam = ExamConfig::default();
        let today = date(2026, 10, 16);
        let settings = StudySettings::defaults(today, &exam);
        assert_eq!(settings.start_date, today);
        assert_eq!(settings.end_date, today);

        let before = StudySettings::defaults(date(2025, 1, 10), &exam);
        assert_eq!(before.end_date, exam.exam_date);
    }

    #[test]
    fn test_validated_rejects_passed_exam() {
        let exam = ExamConfig::default();
        let today = date(2026, 10, 16);
        let err = StudySettings::defaults(today, &exam).validated(today, &exam).unwrap_err();
        match err {
            PlannerError::ValidationFailure(message) => assert!(message.contains("2025-05-04"), "{}", message),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
