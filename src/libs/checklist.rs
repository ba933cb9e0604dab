//! Chapter checklist: per-chapter study activities and revisions.
//!
//! [`Checklist`] owns a copy of the curriculum with the learner's progress laid
//! over it. Updates go through its methods, which return the changed
//! [`ChapterProgress`] for the caller to persist.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::curriculum::{Chapter, Curriculum, CurriculumProvider, Subject};
use super::error::{PlannerError, Result};

/// A chapter may be revised at most this many times.
pub const MAX_REVISIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Activity {
    /// NCERT textbook read.
    Ncert,
    /// Lecture video watched.
    Video,
    /// Practice questions done.
    Practice,
}

impl Activity {
    pub const ALL: [Activity; 3] = [Activity::Ncert, Activity::Video, Activity::Practice];

    fn flag(self, chapter: &mut Chapter) -> &mut bool {
        match self {
            Activity::Ncert => &mut chapter.is_ncert_read,
            Activity::Video => &mut chapter.is_video_watched,
            Activity::Practice => &mut chapter.is_practice_done,
        }
    }

    pub fn is_done(self, chapter: &Chapter) -> bool {
        match self {
            Activity::Ncert => chapter.is_ncert_read,
            Activity::Video => chapter.is_video_watched,
            Activity::Practice => chapter.is_practice_done,
        }
    }

    pub fn is_done_in(self, row: &ChapterProgress) -> bool {
        match self {
            Activity::Ncert => row.is_ncert_read,
            Activity::Video => row.is_video_watched,
            Activity::Practice => row.is_practice_done,
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Ncert => f.write_str("Theory"),
            Activity::Video => f.write_str("Lecture"),
            Activity::Practice => f.write_str("Practice"),
        }
    }
}

/// Stored progress row for one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterProgress {
    pub subject_id: String,
    pub chapter_id: String,
    pub is_ncert_read: bool,
    pub is_video_watched: bool,
    pub is_practice_done: bool,
    pub revision_count: u32,
}

impl ChapterProgress {
    fn of(subject_id: &str, chapter: &Chapter) -> Self {
        ChapterProgress {
            subject_id: subject_id.to_string(),
            chapter_id: chapter.id.clone(),
            is_ncert_read: chapter.is_ncert_read,
            is_video_watched: chapter.is_video_watched,
            is_practice_done: chapter.is_practice_done,
            revision_count: chapter.revision_count,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Checklist {
    curriculum: Curriculum,
}

impl Checklist {
    pub fn new(curriculum: Curriculum) -> Self {
        Checklist { curriculum }
    }

    /// Overlays stored progress; rows for unknown chapters are ignored.
    pub fn with_progress(mut curriculum: Curriculum, progress: &[ChapterProgress]) -> Self {
        for row in progress {
            let chapter = curriculum
                .subjects_mut()
                .iter_mut()
                .find(|s| s.id == row.subject_id)
                .and_then(|s| s.chapters.iter_mut().find(|c| c.id == row.chapter_id));

            if let Some(chapter) = chapter {
                chapter.is_ncert_read = row.is_ncert_read;
                chapter.is_video_watched = row.is_video_watched;
                chapter.is_practice_done = row.is_practice_done;
                chapter.revision_count = row.revision_count;
            }
        }
        Checklist { curriculum }
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    pub fn toggle(&mut self, subject_id: &str, chapter_id: &str, activity: Activity) -> Result<ChapterProgress> {
        let chapter = self.chapter_mut(subject_id, chapter_id)?;
        let flag = activity.flag(chapter);
        *flag = !*flag;
        Ok(ChapterProgress::of(subject_id, chapter))
    }

    /// Records one more revision of a completed chapter.
    ///
    /// # Errors
    ///
    /// `ValidationFailure` if the chapter is not complete or already has [`MAX_REVISIONS`].
    pub fn increment_revision(&mut self, subject_id: &str, chapter_id: &str) -> Result<ChapterProgress> {
        let chapter = self.chapter_mut(subject_id, chapter_id)?;

        if !chapter.is_complete() {
            return Err(PlannerError::validation(format!(
                "chapter '{}' needs theory, lecture and practice done before revising",
                chapter.name
            )));
        }
        if chapter.revision_count >= MAX_REVISIONS {
            return Err(PlannerError::validation(format!(
                "chapter '{}' already has all {} revisions",
                chapter.name, MAX_REVISIONS
            )));
        }

        chapter.revision_count += 1;
        Ok(ChapterProgress::of(subject_id, chapter))
    }

    /// Share of activities done in `subject`, as a percentage.
    pub fn subject_progress(subject: &Subject) -> f64 {
        let total = subject.chapters.len() * Activity::ALL.len();
        if total == 0 {
            return 0.0;
        }
        let done: usize = subject
            .chapters
            .iter()
            .map(|c| Activity::ALL.iter().filter(|a| a.is_done(c)).count())
            .sum();
        done as f64 / total as f64 * 100.0
    }

    /// Percentage of chapters with `activity` done, per subject in curriculum order.
    pub fn activity_progress(&self, activity: Activity) -> Vec<(&str, f64)> {
        self.curriculum
            .subjects()
            .iter()
            .map(|s| {
                let pct = if s.chapters.is_empty() {
                    0.0
                } else {
                    s.chapters.iter().filter(|c| activity.is_done(c)).count() as f64 / s.chapters.len() as f64 * 100.0
                };
                (s.id.as_str(), pct)
            })
            .collect()
    }

    /// Mean of the subject progress percentages.
    pub fn total_progress(&self) -> f64 {
        let subjects = self.curriculum.subjects();
        if subjects.is_empty() {
            return 0.0;
        }
        subjects.iter().map(Self::subject_progress).sum::<f64>() / subjects.len() as f64
    }

    pub fn completed_chapters(&self) -> usize {
        self.curriculum
            .subjects()
            .iter()
            .flat_map(|s| s.chapters.iter())
            .filter(|c| c.is_complete())
            .count()
    }

    fn chapter_mut(&mut self, subject_id: &str, chapter_id: &str) -> Result<&mut Chapter> {
        let subject = self
            .curriculum
            .subjects_mut()
            .iter_mut()
            .find(|s| s.id == subject_id)
            .ok_or_else(|| PlannerError::NotFound(format!("subject '{}'", subject_id)))?;

        subject
            .chapters
            .iter_mut()
            .find(|c| c.id == chapter_id)
            .ok_or_else(|| PlannerError::NotFound(format!("chapter '{}' in {}", chapter_id, subject_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(checklist: &mut Checklist, subject: &str, chapter: &str) {
        for activity in Activity::ALL {
            checklist.toggle(subject, chapter, activity).unwrap();
        }
    }

    #[test]
    fn test_toggle_flips_single_flag() {
        let mut checklist = Checklist::new(Curriculum::neet());
        let row = checklist.toggle("physics", "p2", Activity::Video).unwrap();
        assert!(row.is_video_watched);
        assert!(!row.is_ncert_read);

        let row = checklist.toggle("physics", "p2", Activity::Video).unwrap();
        assert!(!row.is_video_watched);
    }

    #[test]
    fn test_revision_requires_complete_chapter() {
        let mut checklist = Checklist::new(Curriculum::neet());
        assert!(checklist.increment_revision("biology", "b1").is_err());

        complete(&mut checklist, "biology", "b1");
        assert_eq!(checklist.increment_revision("biology", "b1").unwrap().revision_count, 1);
    }

    #[test]
    fn test_revision_limit() {
        let mut checklist = Checklist::new(Curriculum::neet());
        complete(&mut checklist, "chemistry", "c1");
        for _ in 0..MAX_REVISIONS {
            checklist.increment_revision("chemistry", "c1").unwrap();
        }
        let err = checklist.increment_revision("chemistry", "c1").unwrap_err();
        assert!(matches!(err, PlannerError::ValidationFailure(_)));
    }

    #[test]
    fn test_unknown_chapter() {
        let mut checklist = Checklist::new(Curriculum::neet());
        let err = checklist.toggle("physics", "c1", Activity::Ncert).unwrap_err();
        assert!(matches!(err, PlannerError::NotFound(_)));
    }

    #[test]
    fn test_progress_percentages() {
        let mut checklist = Checklist::new(Curriculum::neet());
        complete(&mut checklist, "physics", "p1");
        complete(&mut checklist, "physics", "p2");

        let physics = checklist.curriculum().subject("physics").unwrap();
        assert!((Checklist::subject_progress(physics) - 10.0).abs() < 1e-9);

        let ncert = checklist.activity_progress(Activity::Ncert);
        assert_eq!(ncert[0].0, "physics");
        assert!((ncert[0].1 - 10.0).abs() < 1e-9);
        assert_eq!(ncert[1].1, 0.0);

        assert!((checklist.total_progress() - 10.0 / 3.0).abs() < 1e-9);
        assert_eq!(checklist.completed_chapters(), 2);
    }

    #[test]
    fn test_with_progress_overlays_rows() {
        let row = ChapterProgress {
            subject_id: "physics".into(),
            chapter_id: "p3".into(),
            is_ncert_read: true,
            is_video_watched: false,
            is_practice_done: true,
            revision_count: 0,
        };
        let checklist = Checklist::with_progress(Curriculum::neet(), &[row]);
        let chapter = checklist.curriculum().subject("physics").unwrap().chapter("p3").unwrap();
        assert!(chapter.is_ncert_read);
        assert!(chapter.is_practice_done);
        assert!(!chapter.is_video_watched);
    }
}
