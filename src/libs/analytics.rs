//! Derived statistics over logged test scores.
//!
//! All figures are percentages (`score / total_marks * 100`). Scores with no
//! marks are skipped. Tests are ordered by date, oldest first, before trends
//! are read off the two most recent entries.

use serde::Serialize;
use std::fmt;

use super::curriculum::CurriculumProvider;
use super::score::{percentage, TestScore};

/// Chapters averaging below this are weak.
pub const WEAK_THRESHOLD: f64 = 60.0;
/// Chapters averaging at or above this are strong.
pub const STRONG_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Direction from `previous` to `latest`.
    pub fn between(previous: f64, latest: f64) -> Self {
        if latest > previous {
            Trend::Up
        } else if latest < previous {
            Trend::Down
        } else {
            Trend::Stable
        }
    }

    /// Trend of the last two values; `Stable` with fewer than two.
    fn of_series(values: &[f64]) -> Self {
        match values {
            [.., previous, latest] => Trend::between(*previous, *latest),
            _ => Trend::Stable,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => f.write_str("↑"),
            Trend::Down => f.write_str("↓"),
            Trend::Stable => f.write_str("→"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterPerformance {
    pub chapter_id: String,
    pub average: f64,
    pub attempts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectPerformance {
    pub subject_id: String,
    pub average: f64,
    pub attempts: usize,
    pub trend: Trend,
    pub chapters: Vec<ChapterPerformance>,
    pub weak_chapters: Vec<String>,
    pub strong_chapters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestAnalytics {
    pub subjects: Vec<SubjectPerformance>,
    /// Sum of subject averages over the number of curriculum subjects.
    pub overall_average: f64,
}

/// Whole-test summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub tests: usize,
    /// Mean of per-test percentages.
    pub average: f64,
    /// Latest test against the one before it; `None` with fewer than two tests.
    pub trend: Option<Trend>,
    /// Subject with the highest average, if any subject has attempts.
    pub best_subject: Option<(String, f64)>,
}

impl TestAnalytics {
    pub fn compute<C: CurriculumProvider + ?Sized>(curriculum: &C, scores: &[TestScore]) -> Self {
        let ordered = chronological(scores);

        let subjects: Vec<SubjectPerformance> = curriculum
            .subjects()
            .iter()
            .map(|subject| {
                let entries: Vec<_> = ordered.iter().filter_map(|t| t.subject(&subject.id)).collect();
                let series: Vec<f64> = entries.iter().filter_map(|s| percentage(s.score, s.total_marks)).collect();

                let chapters: Vec<ChapterPerformance> = subject
                    .chapters
                    .iter()
                    .map(|chapter| {
                        let pcts: Vec<f64> = entries
                            .iter()
                            .flat_map(|s| s.chapter_scores.iter())
                            .filter(|cs| cs.chapter_id == chapter.id)
                            .filter_map(|cs| percentage(cs.score, cs.total_marks))
                            .collect();
                        ChapterPerformance {
                            chapter_id: chapter.id.clone(),
                            average: mean(&pcts),
                            attempts: pcts.len(),
                        }
                    })
                    .collect();

                let pick = |keep: fn(f64) -> bool| -> Vec<String> {
                    chapters
                        .iter()
                        .filter(|c| c.attempts > 0 && keep(c.average))
                        .map(|c| c.chapter_id.clone())
                        .collect()
                };
                let weak_chapters = pick(|avg| avg < WEAK_THRESHOLD);
                let strong_chapters = pick(|avg| avg >= STRONG_THRESHOLD);

                SubjectPerformance {
                    subject_id: subject.id.clone(),
                    average: mean(&series),
                    attempts: series.len(),
                    trend: Trend::of_series(&series),
                    chapters,
                    weak_chapters,
                    strong_chapters,
                }
            })
            .collect();

        let overall_average = if subjects.is_empty() {
            0.0
        } else {
            subjects.iter().map(|s| s.average).sum::<f64>() / subjects.len() as f64
        };

        TestAnalytics {
            subjects,
            overall_average,
        }
    }

    pub fn subject(&self, subject_id: &str) -> Option<&SubjectPerformance> {
        self.subjects.iter().find(|s| s.subject_id == subject_id)
    }

    pub fn overview(&self, scores: &[TestScore]) -> Overview {
        let series: Vec<f64> = chronological(scores).iter().filter_map(|t| t.percentage()).collect();
        let trend = (series.len() >= 2).then(|| Trend::of_series(&series));

        let best_subject = self
            .subjects
            .iter()
            .filter(|s| s.attempts > 0)
            .max_by(|a, b| a.average.total_cmp(&b.average))
            .map(|s| (s.subject_id.clone(), s.average));

        Overview {
            tests: scores.len(),
            average: mean(&series),
            trend,
            best_subject,
        }
    }
}

fn chronological(scores: &[TestScore]) -> Vec<&TestScore> {
    let mut ordered: Vec<&TestScore> = scores.iter().collect();
    ordered.sort_by_key(|t| t.date);
    ordered
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::curriculum::Curriculum;
    use crate::libs::score::{SubjectScore, TestKind};
    use chrono::NaiveDate;

    fn test(day: u32, scores: Vec<SubjectScore>) -> TestScore {
        TestScore {
            id: format!("t{}", day),
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            kind: TestKind::Full,
            scores,
            remarks: None,
        }
    }

    #[test]
    fn test_subject_average_and_trend() {
        let scores = vec![
            test(2, vec![SubjectScore::new("physics", 90.0, 180.0)]),
            test(1, vec![SubjectScore::new("physics", 144.0, 180.0)]),
        ];
        let analytics = TestAnalytics::compute(&Curriculum::neet(), &scores);
        let physics = analytics.subject("physics").unwrap();

        assert!((physics.average - 65.0).abs() < 1e-9);
        // 80% on day 1, 50% on day 2.
        assert_eq!(physics.trend, Trend::Down);
        assert_eq!(analytics.subject("chemistry").unwrap().trend, Trend::Stable);
        assert!((analytics.overall_average - 65.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_weak_and_strong_chapters() {
        let scores = vec![test(
            1,
            vec![SubjectScore::new("biology", 300.0, 360.0)
                .with_chapter("b1", 10.0, 20.0)
                .with_chapter("b2", 18.0, 20.0)
                .with_chapter("b3", 14.0, 20.0)],
        )];
        let analytics = TestAnalytics::compute(&Curriculum::neet(), &scores);
        let biology = analytics.subject("biology").unwrap();

        assert_eq!(biology.weak_chapters, vec!["b1".to_string()]);
        assert_eq!(biology.strong_chapters, vec!["b2".to_string()]);
        let b4 = biology.chapters.iter().find(|c| c.chapter_id == "b4").unwrap();
        assert_eq!(b4.attempts, 0);
    }

    #[test]
    fn test_zero_total_marks_are_skipped() {
        let scores = vec![test(1, vec![SubjectScore::new("physics", 0.0, 0.0)])];
        let analytics = TestAnalytics::compute(&Curriculum::neet(), &scores);
        let physics = analytics.subject("physics").unwrap();
        assert_eq!(physics.attempts, 0);
        assert_eq!(physics.average, 0.0);
    }

    #[test]
    fn test_overview() {
        let scores = vec![
            test(1, vec![SubjectScore::new("physics", 90.0, 180.0), SubjectScore::new("chemistry", 90.0, 180.0)]),
            test(5, vec![SubjectScore::new("physics", 162.0, 180.0), SubjectScore::new("chemistry", 126.0, 180.0)]),
        ];
        let analytics = TestAnalytics::compute(&Curriculum::neet(), &scores);
        let overview = analytics.overview(&scores);

        assert_eq!(overview.tests, 2);
        assert!((overview.average - 65.0).abs() < 1e-9);
        assert_eq!(overview.trend, Some(Trend::Up));
        assert_eq!(overview.best_subject.as_ref().map(|(id, _)| id.as_str()), Some("physics"));
    }

    #[test]
    fn test_overview_empty() {
        let analytics = TestAnalytics::compute(&Curriculum::neet(), &[]);
        let overview = analytics.overview(&[]);
        assert_eq!(overview.average, 0.0);
        assert_eq!(overview.trend, None);
        assert_eq!(overview.best_subject, None);
    }
}
