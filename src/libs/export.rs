//! CSV and JSON export of tasks, test scores and mistakes.
//!
//! JSON output is the records as stored, pretty-printed. CSV output is one
//! flat row per record; a test score expands to one row per subject.

use crate::db::{mistakes::Mistakes, scores::Scores, tasks::Tasks};
use crate::libs::{mistake::Mistake, planner::TaskStore, score::TestScore, task::StudyTask};
use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportData {
    /// Study plan tasks.
    Tasks,
    /// Logged test scores.
    Scores,
    /// Mistake log.
    Mistakes,
}

impl ExportData {
    fn file_stem(self) -> &'static str {
        match self {
            ExportData::Tasks => "tasks",
            ExportData::Scores => "scores",
            ExportData::Mistakes => "mistakes",
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without `output_path` the file is named `neetplan_<data>_<timestamp>.<ext>` in the working directory.
    pub fn new(format: ExportFormat, data: ExportData, output_path: Option<PathBuf>) -> Self {
        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };
        let output_path = output_path.unwrap_or_else(|| {
            PathBuf::from(format!(
                "neetplan_{}_{}.{}",
                data.file_stem(),
                Local::now().format("%Y%m%d_%H%M%S"),
                extension
            ))
        });

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes `data` from `conn` and returns the number of records exported.
    ///
    /// No file is created when there is nothing to export.
    pub fn export(&self, data: ExportData, conn: &Connection) -> Result<usize> {
        match data {
            ExportData::Tasks => {
                let tasks = Tasks::new(conn).list_tasks()?;
                if !tasks.is_empty() {
                    self.export_tasks(&tasks)?;
                }
                Ok(tasks.len())
            }
            ExportData::Scores => {
                let scores = Scores::new(conn).fetch()?;
                if !scores.is_empty() {
                    self.export_scores(&scores)?;
                }
                Ok(scores.len())
            }
            ExportData::Mistakes => {
                let mistakes = Mistakes::new(conn).list_all(None)?;
                if !mistakes.is_empty() {
                    self.export_mistakes(&mistakes)?;
                }
                Ok(mistakes.len())
            }
        }
    }

    pub fn export_tasks(&self, tasks: &[StudyTask]) -> Result<()> {
        match self.format {
            ExportFormat::Json => self.write_json(&tasks),
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_path(&self.output_path)?;
                wtr.write_record(["ID", "Subject", "Chapter", "Date", "Hours", "Type", "Priority", "Done"])?;
                for task in tasks {
                    wtr.write_record([
                        task.id.clone(),
                        task.subject_id.clone(),
                        task.chapter_id.clone(),
                        task.date.to_string(),
                        task.duration.to_string(),
                        task.task_type.to_string(),
                        task.priority.to_string(),
                        task.is_completed.to_string(),
                    ])?;
                }
                wtr.flush()?;
                Ok(())
            }
        }
    }

    pub fn export_scores(&self, scores: &[TestScore]) -> Result<()> {
        match self.format {
            ExportFormat::Json => self.write_json(&scores),
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_path(&self.output_path)?;
                wtr.write_record(["Test", "Date", "Kind", "Subject", "Score", "Total", "Remarks"])?;
                for test in scores {
                    for subject in &test.scores {
                        wtr.write_record([
                            test.id.clone(),
                            test.date.to_string(),
                            test.kind.as_str().to_string(),
                            subject.subject_id.clone(),
                            subject.score.to_string(),
                            subject.total_marks.to_string(),
                            test.remarks.clone().unwrap_or_default(),
                        ])?;
                    }
                }
                wtr.flush()?;
                Ok(())
            }
        }
    }

    pub fn export_mistakes(&self, mistakes: &[Mistake]) -> Result<()> {
        match self.format {
            ExportFormat::Json => self.write_json(&mistakes),
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_path(&self.output_path)?;
                wtr.write_record([
                    "ID", "Subject", "Chapter", "Content", "Solution", "Priority", "Created", "Resolved", "Revisions",
                ])?;
                for mistake in mistakes {
                    wtr.write_record([
                        mistake.id.clone(),
                        mistake.subject_id.clone(),
                        mistake.chapter_id.clone(),
                        mistake.content.clone(),
                        mistake.solution.clone().unwrap_or_default(),
                        mistake.priority.to_string(),
                        mistake.created_at.format("%Y-%m-%d %H:%M").to_string(),
                        mistake.is_resolved.to_string(),
                        mistake.revision_count.to_string(),
                    ])?;
                }
                wtr.flush()?;
                Ok(())
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, records: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }
}
