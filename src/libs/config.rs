//! Configuration management for neetplan.
//!
//! The configuration is a small JSON document stored next to the profile
//! databases in the data directory resolved by [`DataStorage`]. It records the
//! active profile, the exam calendar the planner works against and the pomodoro
//! durations.
//!
//! ## Storage
//!
//! - **Linux**: `~/.local/share/neetplan/config.json`
//! - **macOS**: `~/Library/Application Support/neetplan/config.json`
//! - **Windows**: `%LOCALAPPDATA%\neetplan\config.json`
//! - `NEETPLAN_DATA_DIR` overrides the directory on every platform.
//!
//! A missing file is not an error: [`Config::read`] returns the defaults.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neetplan::libs::config::Config;
//!
//! let mut config = Config::read()?;
//! config.profile = Some("asha".to_string());
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::error::PlannerError;
use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Longest focus or break interval accepted, one day.
pub const MAX_POMODORO_MINUTES: u32 = 24 * 60;

/// NEET 2025 exam day.
pub const DEFAULT_EXAM_DATE: NaiveDate = ymd(2025, 5, 4);
/// Theory phase cutoff for NEET 2025.
pub const DEFAULT_THEORY_DEADLINE: NaiveDate = ymd(2025, 4, 1);

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar constant"),
    }
}

/// Exam calendar used by the plan generator and the countdown.
///
/// The theory deadline splits a study window into a theory phase and a
/// practice phase; the exam date caps the end of any study window.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExamConfig {
    /// Day of the exam. Study windows never extend past it.
    pub exam_date: NaiveDate,
    /// Last day of the theory phase; only practice is scheduled after it.
    pub theory_deadline: NaiveDate,
}

/// Pomodoro durations in minutes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PomodoroConfig {
    pub focus_minutes: u32,
    pub break_minutes: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Config {
    /// Active profile. Selects the database file; commands refuse to run without it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    #[serde(default)]
    pub exam: ExamConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pomodoro: Option<PomodoroConfig>,
}

impl Default for ExamConfig {
    /// NEET 2025: exam on 4 May, theory wrapped up by 1 April.
    fn default() -> Self {
        ExamConfig {
            exam_date: DEFAULT_EXAM_DATE,
            theory_deadline: DEFAULT_THEORY_DEADLINE,
        }
    }
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        PomodoroConfig {
            focus_minutes: 25,
            break_minutes: 5,
        }
    }
}

impl PomodoroConfig {
    /// Both intervals must lie within `1..=MAX_POMODORO_MINUTES`.
    pub fn validate(&self) -> Result<(), PlannerError> {
        for (label, minutes) in [("focus", self.focus_minutes), ("break", self.break_minutes)] {
            if minutes == 0 || minutes > MAX_POMODORO_MINUTES {
                return Err(PlannerError::validation(format!(
                    "{} must be between 1 and {} minutes, got {}",
                    label, MAX_POMODORO_MINUTES, minutes
                )));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Reads the configuration from the default data directory.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    /// Reads the configuration from `storage`, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration to the default data directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    /// Writes pretty-printed JSON, overwriting any existing file.
    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn pomodoro(&self) -> PomodoroConfig {
        self.pomodoro.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_defaults() {
        let exam = ExamConfig::default();
        assert_eq!(exam.exam_date.to_string(), "2025-05-04");
        assert_eq!(exam.theory_deadline.to_string(), "2025-04-01");
    }

    #[test]
    fn test_missing_exam_section_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"profile":"asha"}"#).unwrap();
        assert_eq!(config.profile.as_deref(), Some("asha"));
        assert_eq!(config.exam, ExamConfig::default());
        assert_eq!(config.pomodoro(), PomodoroConfig::default());
    }

    #[test]
    fn test_pomodoro_minutes_bounds() {
        let config = |focus_minutes, break_minutes| PomodoroConfig {
            focus_minutes,
            break_minutes,
        };
        assert!(PomodoroConfig::default().validate().is_ok());
        assert!(config(MAX_POMODORO_MINUTES, 1).validate().is_ok());
        assert!(config(MAX_POMODORO_MINUTES + 1, 5).validate().is_err());
        assert!(config(25, 80_000_000).validate().is_err());
        assert!(config(0, 5).validate().is_err());
        assert!(config(25, 0).validate().is_err());
    }
}
