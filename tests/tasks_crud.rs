#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use neetplan::db::db::Db;
    use neetplan::db::settings::Settings;
    use neetplan::db::tasks::Tasks;
    use neetplan::libs::error::PlannerError;
    use neetplan::libs::planner::{SettingsStore, TaskStore};
    use neetplan::libs::settings::StudySettings;
    use neetplan::libs::task::{NewTask, Priority, TaskType};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TaskTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(&temp_dir.path().join("tasks.db")).unwrap();
            TaskTestContext { _temp_dir: temp_dir, db }
        }
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_insert_and_list(ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new(&ctx.db.conn);

        let later = tasks
            .add_task(&NewTask::new("biology", "b7", date(3, 2), TaskType::Practice).with_priority(Priority::Low))
            .unwrap();
        let earlier = tasks.add_task(&NewTask::new("physics", "p1", date(2, 10), TaskType::Theory)).unwrap();
        assert_ne!(later.id, earlier.id);

        let listed = tasks.list_tasks().unwrap();
        assert_eq!(listed.len(), 2);
        // Ordered by date.
        assert_eq!(listed[0], earlier);
        assert_eq!(listed[1], later);
        assert_eq!(listed[1].priority, Priority::Low);
        assert_eq!(listed[1].duration, 3);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_status_update(ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new(&ctx.db.conn);
        let task = tasks.add_task(&NewTask::new("chemistry", "c2", date(2, 12), TaskType::Theory)).unwrap();

        tasks.update_task_status(&task.id, true).unwrap();
        assert!(tasks.list_tasks().unwrap()[0].is_completed);

        tasks.update_task_status(&task.id, false).unwrap();
        assert!(!tasks.list_tasks().unwrap()[0].is_completed);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_delete(ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new(&ctx.db.conn);
        let keep = tasks.add_task(&NewTask::new("physics", "p4", date(2, 1), TaskType::Theory)).unwrap();
        let removed = tasks.add_task(&NewTask::new("physics", "p5", date(2, 2), TaskType::Theory)).unwrap();

        tasks.delete_task(&removed.id).unwrap();
        let remaining = tasks.list_tasks().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_missing_task_is_not_found(ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new(&ctx.db.conn);
        assert!(matches!(tasks.update_task_status("nope", true), Err(PlannerError::NotFound(_))));
        assert!(matches!(tasks.delete_task("nope"), Err(PlannerError::NotFound(_))));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_settings_overwrite_single_row(ctx: &mut TaskTestContext) {
        let mut settings = Settings::new(&ctx.db.conn);
        assert!(settings.get_settings().unwrap().is_none());

        settings.save_settings(&StudySettings::new(date(2, 1), date(4, 20), 6)).unwrap();
        settings.save_settings(&StudySettings::new(date(2, 5), date(5, 4), 9)).unwrap();

        let saved = settings.get_settings().unwrap().unwrap();
        assert_eq!(saved, StudySettings::new(date(2, 5), date(5, 4), 9));

        let rows: i64 = ctx.db.conn.query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0)).unwrap();
        assert_eq!(rows, 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_store_failure_is_persistence_error(ctx: &mut TaskTestContext) {
        ctx.db.conn.execute("DROP TABLE tasks", []).unwrap();
        let mut tasks = Tasks::new(&ctx.db.conn);

        let err = tasks
            .add_task(&NewTask::new("physics", "p1", date(2, 1), TaskType::Theory))
            .unwrap_err();
        assert!(matches!(err, PlannerError::PersistenceFailure { .. }));
        assert!(err.to_string().starts_with("failed to insert task"));
    }
}
