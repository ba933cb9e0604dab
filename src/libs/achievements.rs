//! Achievement catalog and unlock rules.
//!
//! Achievements are evaluated from a [`Progress`] snapshot. Evaluation only
//! reports keys that qualify and are not yet unlocked, so storing its output
//! never duplicates an unlock.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

pub const FIRST_LOGIN: &str = "FIRST_LOGIN";
pub const STUDY_STREAK_3: &str = "STUDY_STREAK_3";
pub const STUDY_STREAK_7: &str = "STUDY_STREAK_7";
pub const CHAPTER_MASTERY: &str = "CHAPTER_MASTERY";
pub const MISTAKE_RESOLVED: &str = "MISTAKE_RESOLVED";

/// Resolved mistakes needed for [`MISTAKE_RESOLVED`].
pub const RESOLVED_MISTAKES_GOAL: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementKind {
    Milestone,
    Streak,
    Performance,
}

impl fmt::Display for AchievementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AchievementKind::Milestone => f.write_str("milestone"),
            AchievementKind::Streak => f.write_str("streak"),
            AchievementKind::Performance => f.write_str("performance"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub kind: AchievementKind,
    pub points: u32,
}

pub const CATALOG: [Achievement; 5] = [
    Achievement {
        key: FIRST_LOGIN,
        title: "First Steps",
        description: "Started your NEET preparation",
        kind: AchievementKind::Milestone,
        points: 10,
    },
    Achievement {
        key: STUDY_STREAK_3,
        title: "Consistent Learner",
        description: "Studied 3 days in a row",
        kind: AchievementKind::Streak,
        points: 30,
    },
    Achievement {
        key: STUDY_STREAK_7,
        title: "Study Warrior",
        description: "Studied 7 days in a row",
        kind: AchievementKind::Streak,
        points: 70,
    },
    Achievement {
        key: CHAPTER_MASTERY,
        title: "Chapter Master",
        description: "Completed theory, lecture and practice for a chapter",
        kind: AchievementKind::Performance,
        points: 50,
    },
    Achievement {
        key: MISTAKE_RESOLVED,
        title: "Learning from Mistakes",
        description: "Resolved 5 logged mistakes",
        kind: AchievementKind::Performance,
        points: 40,
    },
];

pub fn find(key: &str) -> Option<&'static Achievement> {
    CATALOG.iter().find(|a| a.key == key)
}

/// Total points of the given unlocked keys. Unknown keys count zero.
pub fn points<'a>(unlocked: impl IntoIterator<Item = &'a str>) -> u32 {
    unlocked.into_iter().filter_map(find).map(|a| a.points).sum()
}

/// Consecutive days with at least one study session, counting back from `today`.
///
/// Zero when there was no session today.
pub fn streak(session_dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = session_dates.iter().copied().collect();
    let mut count = 0;
    let mut day = today;
    while days.contains(&day) {
        count += 1;
        day -= Duration::days(1);
    }
    count
}

/// Inputs for one evaluation pass.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    pub streak: u32,
    pub completed_chapters: usize,
    pub resolved_mistakes: usize,
}

/// Keys that `progress` qualifies for and that are not in `unlocked`, in catalog order.
///
/// [`FIRST_LOGIN`] always qualifies.
pub fn evaluate(progress: &Progress, unlocked: &[String]) -> Vec<&'static Achievement> {
    CATALOG
        .iter()
        .filter(|a| match a.key {
            FIRST_LOGIN => true,
            STUDY_STREAK_3 => progress.streak >= 3,
            STUDY_STREAK_7 => progress.streak >= 7,
            CHAPTER_MASTERY => progress.completed_chapters > 0,
            MISTAKE_RESOLVED => progress.resolved_mistakes >= RESOLVED_MISTAKES_GOAL,
            _ => false,
        })
        .filter(|a| !unlocked.iter().any(|k| k == a.key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_streak_counts_back_from_today() {
        let sessions = [date(10), date(11), date(11), date(12), date(8)];
        assert_eq!(streak(&sessions, date(12)), 3);
        assert_eq!(streak(&sessions, date(13)), 0);
        assert_eq!(streak(&[], date(12)), 0);
    }

    #[test]
    fn test_evaluate_thresholds() {
        let progress = Progress {
            streak: 7,
            completed_chapters: 0,
            resolved_mistakes: 4,
        };
        let keys: Vec<_> = evaluate(&progress, &[]).iter().map(|a| a.key).collect();
        assert_eq!(keys, vec![FIRST_LOGIN, STUDY_STREAK_3, STUDY_STREAK_7]);
    }

    #[test]
    fn test_evaluate_skips_unlocked() {
        let progress = Progress {
            streak: 3,
            completed_chapters: 1,
            resolved_mistakes: 5,
        };
        let unlocked = vec![FIRST_LOGIN.to_string(), STUDY_STREAK_3.to_string()];
        let keys: Vec<_> = evaluate(&progress, &unlocked).iter().map(|a| a.key).collect();
        assert_eq!(keys, vec![CHAPTER_MASTERY, MISTAKE_RESOLVED]);
    }

    #[test]
    fn test_points() {
        assert_eq!(points([FIRST_LOGIN, STUDY_STREAK_7, "UNKNOWN"]), 80);
    }
}
