#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use neetplan::db::{db::Db, mistakes::Mistakes, scores::Scores, tasks::Tasks};
    use neetplan::libs::export::{ExportData, ExportFormat, Exporter};
    use neetplan::libs::mistake::NewMistake;
    use neetplan::libs::planner::TaskStore;
    use neetplan::libs::score::{SubjectScore, TestKind};
    use neetplan::libs::task::{NewTask, TaskType};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            ExportTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
                db: Db::in_memory().unwrap(),
            }
        }
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_tasks_csv(ctx: &mut ExportTestContext) {
        let mut tasks = Tasks::new(&ctx.db.conn);
        tasks.add_task(&NewTask::new("physics", "p1", date(2, 3), TaskType::Theory)).unwrap();
        tasks.add_task(&NewTask::new("physics", "p1", date(4, 3), TaskType::Practice)).unwrap();

        let path = ctx.temp_dir.path().join("tasks.csv");
        let exporter = Exporter::new(ExportFormat::Csv, ExportData::Tasks, Some(path.clone()));
        assert_eq!(exporter.export(ExportData::Tasks, &ctx.db.conn).unwrap(), 2);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "ID");
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][3], "2025-02-03");
        assert_eq!(&rows[1][4], "3");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_scores_csv_has_row_per_subject(ctx: &mut ExportTestContext) {
        Scores::new(&ctx.db.conn)
            .insert(
                date(2, 9),
                TestKind::Full,
                vec![
                    SubjectScore::new("physics", 120.0, 180.0),
                    SubjectScore::new("chemistry", 140.0, 180.0),
                    SubjectScore::new("biology", 300.0, 360.0),
                ],
                None,
            )
            .unwrap();

        let path = ctx.temp_dir.path().join("scores.csv");
        let exporter = Exporter::new(ExportFormat::Csv, ExportData::Scores, Some(path.clone()));
        assert_eq!(exporter.export(ExportData::Scores, &ctx.db.conn).unwrap(), 1);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let subjects: Vec<String> = reader.records().map(|r| r.unwrap()[3].to_string()).collect();
        assert_eq!(subjects, vec!["physics", "chemistry", "biology"]);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_mistakes_json(ctx: &mut ExportTestContext) {
        Mistakes::new(&ctx.db.conn)
            .add(&NewMistake::new("biology", "b3", "Confused xylem and phloem"))
            .unwrap();

        let path = ctx.temp_dir.path().join("mistakes.json");
        let exporter = Exporter::new(ExportFormat::Json, ExportData::Mistakes, Some(path.clone()));
        assert_eq!(exporter.export(ExportData::Mistakes, &ctx.db.conn).unwrap(), 1);

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["content"], "Confused xylem and phloem");
        assert_eq!(records[0]["is_resolved"], false);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_nothing_to_export_writes_no_file(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("empty.csv");
        let exporter = Exporter::new(ExportFormat::Csv, ExportData::Tasks, Some(path.clone()));
        assert_eq!(exporter.export(ExportData::Tasks, &ctx.db.conn).unwrap(), 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_default_file_name() {
        let exporter = Exporter::new(ExportFormat::Json, ExportData::Scores, None);
        let name = exporter.output_path().to_string_lossy().to_string();
        assert!(name.starts_with("neetplan_scores_"));
        assert!(name.ends_with(".json"));
    }
}
