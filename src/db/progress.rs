use crate::libs::checklist::ChapterProgress;
use crate::libs::error::{PlannerError, Result};
use rusqlite::{params, Connection};

const SELECT_PROGRESS: &str = "SELECT subject_id, chapter_id, is_ncert_read, is_video_watched, is_practice_done, revision_count
    FROM chapter_progress ORDER BY subject_id, chapter_id";
const UPSERT_PROGRESS: &str = "INSERT INTO chapter_progress
    (subject_id, chapter_id, is_ncert_read, is_video_watched, is_practice_done, revision_count, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, CURRENT_TIMESTAMP)
    ON CONFLICT(subject_id, chapter_id) DO UPDATE SET
        is_ncert_read = excluded.is_ncert_read,
        is_video_watched = excluded.is_video_watched,
        is_practice_done = excluded.is_practice_done,
        revision_count = excluded.revision_count,
        updated_at = CURRENT_TIMESTAMP";

/// Checklist rows. Chapters without a row have nothing done.
pub struct Progress<'a> {
    conn: &'a Connection,
}

impl<'a> Progress<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Progress { conn }
    }

    pub fn fetch(&self) -> Result<Vec<ChapterProgress>> {
        let mut stmt = self
            .conn
            .prepare(SELECT_PROGRESS)
            .map_err(|e| PlannerError::persistence("load chapter progress", e))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ChapterProgress {
                    subject_id: row.get(0)?,
                    chapter_id: row.get(1)?,
                    is_ncert_read: row.get(2)?,
                    is_video_watched: row.get(3)?,
                    is_practice_done: row.get(4)?,
                    revision_count: row.get(5)?,
                })
            })
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|e| PlannerError::persistence("load chapter progress", e))?;
        Ok(rows)
    }

    pub fn save(&mut self, progress: &ChapterProgress) -> Result<()> {
        self.conn
            .execute(
                UPSERT_PROGRESS,
                params![
                    progress.subject_id,
                    progress.chapter_id,
                    progress.is_ncert_read,
                    progress.is_video_watched,
                    progress.is_practice_done,
                    progress.revision_count
                ],
            )
            .map_err(|e| PlannerError::persistence("save chapter progress", e))?;
        Ok(())
    }
}
