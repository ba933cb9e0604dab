use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{PlannerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    /// Single-subject test.
    Subject,
    /// Full-syllabus mock test.
    Full,
}

impl TestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestKind::Subject => "subject",
            TestKind::Full => "full",
        }
    }
}

impl FromStr for TestKind {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "subject" => Ok(TestKind::Subject),
            "full" => Ok(TestKind::Full),
            other => Err(PlannerError::validation(format!("unknown test kind '{}'", other))),
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestKind::Subject => f.write_str("Subject Test"),
            TestKind::Full => f.write_str("Full Test"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterScore {
    pub chapter_id: String,
    pub score: f64,
    pub total_marks: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectScore {
    pub subject_id: String,
    pub score: f64,
    pub total_marks: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chapter_scores: Vec<ChapterScore>,
}

impl SubjectScore {
    pub fn new(subject_id: &str, score: f64, total_marks: f64) -> Self {
        SubjectScore {
            subject_id: subject_id.to_string(),
            score,
            total_marks,
            chapter_scores: Vec::new(),
        }
    }

    pub fn with_chapter(mut self, chapter_id: &str, score: f64, total_marks: f64) -> Self {
        self.chapter_scores.push(ChapterScore {
            chapter_id: chapter_id.to_string(),
            score,
            total_marks,
        });
        self
    }

    /// Parses `subject=score/total`, e.g. `physics=120/180`.
    pub fn parse(spec: &str) -> Result<Self> {
        let bad = || PlannerError::validation(format!("expected subject=score/total, got '{}'", spec));

        let (subject, marks) = spec.split_once('=').ok_or_else(bad)?;
        let (score, total) = marks.split_once('/').ok_or_else(bad)?;
        let score: f64 = score.trim().parse().map_err(|_| bad())?;
        let total: f64 = total.trim().parse().map_err(|_| bad())?;

        if !score.is_finite() || !total.is_finite() {
            return Err(bad());
        }
        if subject.trim().is_empty() || total <= 0.0 || score < 0.0 || score > total {
            return Err(bad());
        }
        Ok(SubjectScore::new(subject.trim(), score, total))
    }
}

/// Percentage of `score` out of `total`; `None` when there are no marks to divide by.
pub fn percentage(score: f64, total: f64) -> Option<f64> {
    if total > 0.0 {
        Some(score / total * 100.0)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestScore {
    pub id: String,
    pub date: NaiveDate,
    pub kind: TestKind,
    pub scores: Vec<SubjectScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl TestScore {
    pub fn total_score(&self) -> f64 {
        self.scores.iter().map(|s| s.score).sum()
    }

    pub fn total_marks(&self) -> f64 {
        self.scores.iter().map(|s| s.total_marks).sum()
    }

    pub fn percentage(&self) -> Option<f64> {
        percentage(self.total_score(), self.total_marks())
    }

    pub fn subject(&self, subject_id: &str) -> Option<&SubjectScore> {
        self.scores.iter().find(|s| s.subject_id == subject_id)
    }
}
