//! Study task model shared by the planner, the task store and the CLI.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::PlannerError;

/// Fixed duration in hours of an auto-generated theory task.
pub const THEORY_TASK_HOURS: i32 = 2;
/// Fixed duration in hours of an auto-generated practice task.
pub const PRACTICE_TASK_HOURS: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Chapter reading and study.
    Theory,
    /// Problem solving.
    Practice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Theory => "theory",
            TaskType::Practice => "practice",
        }
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "theory" => Ok(TaskType::Theory),
            "practice" => Ok(TaskType::Practice),
            other => Err(PlannerError::validation(format!("unknown task type '{}'", other))),
        }
    }
}

impl FromStr for Priority {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(PlannerError::validation(format!("unknown priority '{}'", other))),
        }
    }
}

/// A persisted study task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyTask {
    pub id: String,
    pub subject_id: String,
    pub chapter_id: String,
    pub date: NaiveDate,
    /// Hours.
    pub duration: i32,
    pub task_type: TaskType,
    pub priority: Priority,
    pub is_completed: bool,
}

/// A task that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub subject_id: String,
    pub chapter_id: String,
    pub date: NaiveDate,
    pub duration: i32,
    pub task_type: TaskType,
    pub priority: Priority,
    pub is_completed: bool,
}

impl NewTask {
    pub fn new(subject_id: &str, chapter_id: &str, date: NaiveDate, task_type: TaskType) -> Self {
        let duration = match task_type {
            TaskType::Theory => THEORY_TASK_HOURS,
            TaskType::Practice => PRACTICE_TASK_HOURS,
        };
        NewTask {
            subject_id: subject_id.to_string(),
            chapter_id: chapter_id.to_string(),
            date,
            duration,
            task_type,
            priority: Priority::Medium,
            is_completed: false,
        }
    }

    pub fn with_duration(mut self, hours: i32) -> Self {
        self.duration = hours;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Attaches an id, producing the stored representation.
    pub fn into_task(self, id: String) -> StudyTask {
        StudyTask {
            id,
            subject_id: self.subject_id,
            chapter_id: self.chapter_id,
            date: self.date,
            duration: self.duration,
            task_type: self.task_type,
            priority: self.priority,
            is_completed: self.is_completed,
        }
    }
}
