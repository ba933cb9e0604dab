#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use neetplan::db::db::db_file_name;
    use neetplan::libs::config::{Config, ExamConfig, PomodoroConfig};
    use neetplan::libs::data_storage::DataStorage;
    use neetplan::libs::error::PlannerError;
    use neetplan::libs::session::Session;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Data directory rooted in a temporary folder.
    struct ConfigTestContext {
        _temp_dir: TempDir,
        storage: DataStorage,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let storage = DataStorage::with_base(temp_dir.path().join("neetplan"));
            ConfigTestContext {
                _temp_dir: temp_dir,
                storage,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_gives_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.storage).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.pomodoro(), PomodoroConfig::default());
        assert!(config.profile.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_back(ctx: &mut ConfigTestContext) {
        let config = Config {
            profile: Some("asha".to_string()),
            exam: ExamConfig {
                exam_date: NaiveDate::from_ymd_opt(2026, 5, 3).unwrap(),
                theory_deadline: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            },
            pomodoro: Some(PomodoroConfig {
                focus_minutes: 50,
                break_minutes: 10,
            }),
        };
        config.save_to(&ctx.storage).unwrap();

        let loaded = Config::read_from(&ctx.storage).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.pomodoro().focus_minutes, 50);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_session_requires_profile(ctx: &mut ConfigTestContext) {
        let err = Session::open(&ctx.storage).err().unwrap();
        assert!(matches!(err, PlannerError::NotAuthenticated));

        Config {
            profile: Some("  ".to_string()),
            ..Config::default()
        }
        .save_to(&ctx.storage)
        .unwrap();
        assert!(matches!(Session::open(&ctx.storage), Err(PlannerError::NotAuthenticated)));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_session_opens_profile_database(ctx: &mut ConfigTestContext) {
        Config {
            profile: Some("ravi".to_string()),
            ..Config::default()
        }
        .save_to(&ctx.storage)
        .unwrap();

        let session = Session::open(&ctx.storage).unwrap();
        assert_eq!(session.profile, "ravi");
        assert!(ctx.storage.base_path().join(db_file_name("ravi")).exists());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_profiles_use_separate_databases(ctx: &mut ConfigTestContext) {
        for profile in ["asha", "ravi"] {
            Config {
                profile: Some(profile.to_string()),
                ..Config::default()
            }
            .save_to(&ctx.storage)
            .unwrap();
            let session = Session::open(&ctx.storage).unwrap();
            session
                .db
                .conn
                .execute("INSERT INTO study_sessions (date, minutes) VALUES ('2025-03-01', 25)", [])
                .unwrap();
        }

        let session = Session::open(&ctx.storage).unwrap();
        let rows: i64 = session
            .db
            .conn
            .query_row("SELECT COUNT(*) FROM study_sessions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
