use super::db::parse_column;
use crate::libs::error::{PlannerError, Result};
use crate::libs::mistake::{Mistake, MistakeUpdate, NewMistake};
use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const COLUMNS: &str =
    "id, subject_id, chapter_id, content, solution, priority, created_at, is_resolved, revision_count, last_revised";
const INSERT_MISTAKE: &str = "INSERT INTO mistakes
    (id, subject_id, chapter_id, content, solution, priority, created_at, is_resolved, revision_count, last_revised)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const UPDATE_MISTAKE: &str =
    "UPDATE mistakes SET content = ?2, solution = ?3, priority = ?4, is_resolved = ?5, revision_count = ?6, last_revised = ?7 WHERE id = ?1";
const DELETE_MISTAKE: &str = "DELETE FROM mistakes WHERE id = ?1";

pub struct Mistakes<'a> {
    conn: &'a Connection,
}

impl<'a> Mistakes<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Mistakes { conn }
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Mistake> {
        Ok(Mistake {
            id: row.get(0)?,
            subject_id: row.get(1)?,
            chapter_id: row.get(2)?,
            content: row.get(3)?,
            solution: row.get(4)?,
            priority: parse_column(row, 5)?,
            created_at: row.get(6)?,
            is_resolved: row.get(7)?,
            revision_count: row.get(8)?,
            last_revised: row.get(9)?,
        })
    }

    pub fn add(&mut self, mistake: &NewMistake) -> Result<Mistake> {
        mistake.validate()?;

        let stored = Mistake {
            id: Uuid::new_v4().to_string(),
            subject_id: mistake.subject_id.clone(),
            chapter_id: mistake.chapter_id.clone(),
            content: mistake.content.clone(),
            solution: mistake.solution.clone(),
            priority: mistake.priority,
            created_at: Local::now(),
            is_resolved: false,
            revision_count: 0,
            last_revised: None,
        };
        self.conn
            .execute(
                INSERT_MISTAKE,
                params![
                    stored.id,
                    stored.subject_id,
                    stored.chapter_id,
                    stored.content,
                    stored.solution,
                    stored.priority.as_str(),
                    stored.created_at,
                    stored.is_resolved,
                    stored.revision_count,
                    stored.last_revised
                ],
            )
            .map_err(|e| PlannerError::persistence("log mistake", e))?;
        Ok(stored)
    }

    /// Mistakes for one chapter, newest first.
    pub fn list(&self, subject_id: &str, chapter_id: &str) -> Result<Vec<Mistake>> {
        self.query(
            &format!(
                "SELECT {} FROM mistakes WHERE subject_id = ?1 AND chapter_id = ?2 ORDER BY created_at DESC, rowid DESC",
                COLUMNS
            ),
            params![subject_id, chapter_id],
        )
    }

    /// Every mistake, newest first. Narrowed to one subject when `subject_id` is given.
    pub fn list_all(&self, subject_id: Option<&str>) -> Result<Vec<Mistake>> {
        match subject_id {
            Some(subject_id) => self.query(
                &format!(
                    "SELECT {} FROM mistakes WHERE subject_id = ?1 ORDER BY created_at DESC, rowid DESC",
                    COLUMNS
                ),
                params![subject_id],
            ),
            None => self.query(
                &format!("SELECT {} FROM mistakes ORDER BY created_at DESC, rowid DESC", COLUMNS),
                params![],
            ),
        }
    }

    pub fn get(&self, id: &str) -> Result<Option<Mistake>> {
        self.conn
            .query_row(&format!("SELECT {} FROM mistakes WHERE id = ?1", COLUMNS), params![id], Self::map_row)
            .optional()
            .map_err(|e| PlannerError::persistence("load mistake", e))
    }

    pub fn update(&mut self, id: &str, update: &MistakeUpdate) -> Result<Mistake> {
        let mut mistake = self.require(id)?;
        update.apply(&mut mistake)?;
        self.write(&mistake)?;
        Ok(mistake)
    }

    /// Flips the resolved flag and returns the new state.
    pub fn toggle_resolved(&mut self, id: &str) -> Result<bool> {
        let mut mistake = self.require(id)?;
        mistake.is_resolved = !mistake.is_resolved;
        self.write(&mistake)?;
        Ok(mistake.is_resolved)
    }

    /// Counts one more revision and stamps it with the current time.
    pub fn mark_revised(&mut self, id: &str) -> Result<Mistake> {
        let mut mistake = self.require(id)?;
        mistake.revision_count += 1;
        mistake.last_revised = Some(Local::now());
        self.write(&mistake)?;
        Ok(mistake)
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute(DELETE_MISTAKE, params![id])
            .map_err(|e| PlannerError::persistence("delete mistake", e))?;
        if changed == 0 {
            return Err(PlannerError::NotFound(format!("mistake {}", id)));
        }
        Ok(())
    }

    pub fn count_resolved(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM mistakes WHERE is_resolved = TRUE", [], |row| row.get(0))
            .map_err(|e| PlannerError::persistence("count mistakes", e))?;
        Ok(count as usize)
    }

    fn require(&self, id: &str) -> Result<Mistake> {
        self.get(id)?.ok_or_else(|| PlannerError::NotFound(format!("mistake {}", id)))
    }

    fn write(&mut self, mistake: &Mistake) -> Result<()> {
        self.conn
            .execute(
                UPDATE_MISTAKE,
                params![
                    mistake.id,
                    mistake.content,
                    mistake.solution,
                    mistake.priority.as_str(),
                    mistake.is_resolved,
                    mistake.revision_count,
                    mistake.last_revised
                ],
            )
            .map_err(|e| PlannerError::persistence("update mistake", e))?;
        Ok(())
    }

    fn query(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<Mistake>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| PlannerError::persistence("load mistakes", e))?;
        let mistakes = stmt
            .query_map(params, Self::map_row)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|e| PlannerError::persistence("load mistakes", e))?;
        Ok(mistakes)
    }
}
