#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use neetplan::db::{mistakes::Mistakes, progress::Progress, sessions::Sessions};
    use neetplan::libs::achievements::{self, CHAPTER_MASTERY, FIRST_LOGIN, MISTAKE_RESOLVED, STUDY_STREAK_3, STUDY_STREAK_7};
    use neetplan::libs::checklist::Activity;
    use neetplan::libs::config::Config;
    use neetplan::libs::data_storage::DataStorage;
    use neetplan::libs::mistake::NewMistake;
    use neetplan::libs::session::Session;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct AchievementTestContext {
        _temp_dir: TempDir,
        session: Session,
    }

    impl TestContext for AchievementTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let storage = DataStorage::with_base(temp_dir.path());
            Config {
                profile: Some("asha".to_string()),
                ..Config::default()
            }
            .save_to(&storage)
            .unwrap();
            let session = Session::open(&storage).unwrap();
            AchievementTestContext {
                _temp_dir: temp_dir,
                session,
            }
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
    }

    fn keys(unlocked: &[&achievements::Achievement]) -> Vec<&'static str> {
        unlocked.iter().map(|a| a.key).collect()
    }

    #[test_context(AchievementTestContext)]
    #[test]
    fn test_first_login_once(ctx: &mut AchievementTestContext) {
        let first = ctx.session.award_achievements(today()).unwrap();
        assert_eq!(keys(&first), vec![FIRST_LOGIN]);

        let again = ctx.session.award_achievements(today()).unwrap();
        assert!(again.is_empty());
    }

    #[test_context(AchievementTestContext)]
    #[test]
    fn test_study_streaks(ctx: &mut AchievementTestContext) {
        let mut sessions = Sessions::new(&ctx.session.db.conn);
        for back in 0..3 {
            sessions.record(today() - Duration::days(back), 25).unwrap();
        }
        sessions.record(today(), 25).unwrap();
        assert_eq!(sessions.minutes_on(today()).unwrap(), 50);

        let unlocked = ctx.session.award_achievements(today()).unwrap();
        assert_eq!(keys(&unlocked), vec![FIRST_LOGIN, STUDY_STREAK_3]);

        for back in 3..7 {
            sessions.record(today() - Duration::days(back), 25).unwrap();
        }
        let unlocked = ctx.session.award_achievements(today()).unwrap();
        assert_eq!(keys(&unlocked), vec![STUDY_STREAK_7]);
    }

    #[test_context(AchievementTestContext)]
    #[test]
    fn test_chapter_mastery(ctx: &mut AchievementTestContext) {
        ctx.session.award_achievements(today()).unwrap();

        let mut checklist = ctx.session.checklist().unwrap();
        let mut progress = Progress::new(&ctx.session.db.conn);
        for activity in [Activity::Ncert, Activity::Video] {
            progress.save(&checklist.toggle("biology", "b2", activity).unwrap()).unwrap();
        }
        assert!(ctx.session.award_achievements(today()).unwrap().is_empty());

        progress
            .save(&checklist.toggle("biology", "b2", Activity::Practice).unwrap())
            .unwrap();
        assert_eq!(ctx.session.checklist().unwrap().completed_chapters(), 1);
        let unlocked = ctx.session.award_achievements(today()).unwrap();
        assert_eq!(keys(&unlocked), vec![CHAPTER_MASTERY]);
    }

    #[test_context(AchievementTestContext)]
    #[test]
    fn test_resolved_mistakes(ctx: &mut AchievementTestContext) {
        ctx.session.award_achievements(today()).unwrap();

        let mut mistakes = Mistakes::new(&ctx.session.db.conn);
        for i in 0..achievements::RESOLVED_MISTAKES_GOAL {
            let stored = mistakes
                .add(&NewMistake::new("chemistry", "c1", &format!("mole concept slip {}", i)))
                .unwrap();
            mistakes.toggle_resolved(&stored.id).unwrap();
        }

        let unlocked = ctx.session.award_achievements(today()).unwrap();
        assert_eq!(keys(&unlocked), vec![MISTAKE_RESOLVED]);
    }
}
