use super::achievements::Achievement;
use super::analytics::SubjectPerformance;
use super::checklist::{Activity, MAX_REVISIONS};
use super::curriculum::{CurriculumProvider, Subject};
use super::mistake::Mistake;
use super::score::TestScore;
use super::task::StudyTask;
use anyhow::Result;
use prettytable::{row, Table};

/// Prefix of a UUID shown in tables; commands accept it in place of the full id.
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

fn check(done: bool) -> &'static str {
    if done {
        "✔"
    } else {
        "·"
    }
}

/// Fixed-width bar, e.g. `[#####-----]` for 50%.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub struct View {}

impl View {
    pub fn tasks<C: CurriculumProvider + ?Sized>(tasks: &[StudyTask], curriculum: &C) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "SUBJECT", "CHAPTER", "TYPE", "HOURS", "PRIORITY", "DONE"]);
        for task in tasks {
            let subject = curriculum
                .subject(&task.subject_id)
                .map(|s| s.name.as_str())
                .unwrap_or(task.subject_id.as_str());
            let chapter = curriculum
                .chapter_name(&task.subject_id, &task.chapter_id)
                .unwrap_or(task.chapter_id.as_str());
            table.add_row(row![
                short_id(&task.id),
                task.date,
                subject,
                chapter,
                task.task_type,
                task.duration,
                task.priority,
                check(task.is_completed)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn checklist(subject: &Subject) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "CHAPTER", "THEORY", "LECTURE", "PRACTICE", "REVISIONS"]);
        for chapter in &subject.chapters {
            table.add_row(row![
                chapter.id,
                chapter.name,
                check(Activity::Ncert.is_done(chapter)),
                check(Activity::Video.is_done(chapter)),
                check(Activity::Practice.is_done(chapter)),
                format!("{}/{}", chapter.revision_count, MAX_REVISIONS)
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// One row per subject: overall share plus each activity's share.
    pub fn progress(rows: &[(&Subject, f64, [f64; 3])]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["SUBJECT", "PROGRESS", "", "THEORY", "LECTURE", "PRACTICE"]);
        for (subject, overall, [ncert, video, practice]) in rows {
            table.add_row(row![
                subject.name,
                progress_bar(*overall, 20),
                format!("{:.1}%", overall),
                format!("{:.0}%", ncert),
                format!("{:.0}%", video),
                format!("{:.0}%", practice)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn scores(scores: &[TestScore]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "KIND", "SUBJECTS", "SCORE", "%", "REMARKS"]);
        for test in scores {
            let subjects = test
                .scores
                .iter()
                .map(|s| format!("{} {}/{}", s.subject_id, s.score, s.total_marks))
                .collect::<Vec<_>>()
                .join(", ");
            table.add_row(row![
                short_id(&test.id),
                test.date,
                test.kind,
                subjects,
                format!("{}/{}", test.total_score(), test.total_marks()),
                test.percentage().map(|p| format!("{:.1}", p)).unwrap_or_else(|| "-".to_string()),
                test.remarks.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn chapter_performance<C: CurriculumProvider + ?Sized>(performance: &SubjectPerformance, curriculum: &C) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["CHAPTER", "AVERAGE", "ATTEMPTS"]);
        for chapter in performance.chapters.iter().filter(|c| c.attempts > 0) {
            table.add_row(row![
                curriculum
                    .chapter_name(&performance.subject_id, &chapter.chapter_id)
                    .unwrap_or(chapter.chapter_id.as_str()),
                format!("{:.1}%", chapter.average),
                chapter.attempts
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn mistakes(mistakes: &[Mistake]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "SUBJECT", "CHAPTER", "MISTAKE", "SOLUTION", "PRIORITY", "REVISED", "RESOLVED"]);
        for mistake in mistakes {
            table.add_row(row![
                short_id(&mistake.id),
                mistake.subject_id,
                mistake.chapter_id,
                mistake.content,
                mistake.solution.as_deref().unwrap_or(""),
                mistake.priority,
                mistake.revision_count,
                check(mistake.is_resolved)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn achievements(catalog: &[Achievement], unlocked: &[String]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["", "ACHIEVEMENT", "KIND", "DESCRIPTION", "POINTS"]);
        for achievement in catalog {
            let got = unlocked.iter().any(|k| k == achievement.key);
            table.add_row(row![
                if got { "🏆" } else { "🔒" },
                achievement.title,
                achievement.kind,
                achievement.description,
                achievement.points
            ]);
        }
        table.printstd();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("3f2a9c1e-7b4d-4e1a-9d0c-1234567890ab"), "3f2a9c1e");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(50.0, 10), "[#####-----]");
        assert_eq!(progress_bar(150.0, 4), "[####]");
        assert_eq!(progress_bar(0.0, 4), "[----]");
    }
}
