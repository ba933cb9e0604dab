use super::db::parse_column;
use crate::libs::error::{PlannerError, Result};
use crate::libs::planner::TaskStore;
use crate::libs::task::{NewTask, StudyTask};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const INSERT_TASK: &str = "INSERT INTO tasks (id, subject_id, chapter_id, date, duration, task_type, priority, is_completed)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_TASKS: &str =
    "SELECT id, subject_id, chapter_id, date, duration, task_type, priority, is_completed FROM tasks ORDER BY date, rowid";
const UPDATE_STATUS: &str = "UPDATE tasks SET is_completed = ?2 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

/// SQLite-backed [`TaskStore`]. Ids are random UUIDs.
pub struct Tasks<'a> {
    conn: &'a Connection,
}

impl<'a> Tasks<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Tasks { conn }
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<StudyTask> {
        Ok(StudyTask {
            id: row.get(0)?,
            subject_id: row.get(1)?,
            chapter_id: row.get(2)?,
            date: row.get(3)?,
            duration: row.get(4)?,
            task_type: parse_column(row, 5)?,
            priority: parse_column(row, 6)?,
            is_completed: row.get(7)?,
        })
    }
}

impl TaskStore for Tasks<'_> {
    fn add_task(&mut self, task: &NewTask) -> Result<StudyTask> {
        let id = Uuid::new_v4().to_string();
        self.conn
            .execute(
                INSERT_TASK,
                params![
                    id,
                    task.subject_id,
                    task.chapter_id,
                    task.date,
                    task.duration,
                    task.task_type.as_str(),
                    task.priority.as_str(),
                    task.is_completed
                ],
            )
            .map_err(|e| PlannerError::persistence("insert task", e))?;

        Ok(task.clone().into_task(id))
    }

    fn list_tasks(&self) -> Result<Vec<StudyTask>> {
        let mut stmt = self
            .conn
            .prepare(SELECT_TASKS)
            .map_err(|e| PlannerError::persistence("load tasks", e))?;
        let task_iter = stmt
            .query_map([], Self::map_row)
            .map_err(|e| PlannerError::persistence("load tasks", e))?;

        let mut tasks = Vec::new();
        for task in task_iter {
            tasks.push(task.map_err(|e| PlannerError::persistence("load tasks", e))?);
        }
        Ok(tasks)
    }

    fn update_task_status(&mut self, id: &str, completed: bool) -> Result<()> {
        let changed = self
            .conn
            .execute(UPDATE_STATUS, params![id, completed])
            .map_err(|e| PlannerError::persistence("update task", e))?;
        if changed == 0 {
            return Err(PlannerError::NotFound(format!("task {}", id)));
        }
        Ok(())
    }

    fn delete_task(&mut self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute(DELETE_TASK, params![id])
            .map_err(|e| PlannerError::persistence("delete task", e))?;
        if changed == 0 {
            return Err(PlannerError::NotFound(format!("task {}", id)));
        }
        Ok(())
    }
}
