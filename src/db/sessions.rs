use crate::libs::error::{PlannerError, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};

const INSERT_SESSION: &str = "INSERT INTO study_sessions (date, minutes) VALUES (?1, ?2)";
const SELECT_DATES: &str = "SELECT DISTINCT date FROM study_sessions ORDER BY date";
const SUM_MINUTES: &str = "SELECT COALESCE(SUM(minutes), 0) FROM study_sessions WHERE date = ?1";

/// Completed focus sessions, the input for study streaks.
pub struct Sessions<'a> {
    conn: &'a Connection,
}

impl<'a> Sessions<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Sessions { conn }
    }

    pub fn record(&mut self, date: NaiveDate, minutes: u32) -> Result<()> {
        self.conn
            .execute(INSERT_SESSION, params![date, minutes])
            .map_err(|e| PlannerError::persistence("record study session", e))?;
        Ok(())
    }

    /// Distinct days with at least one session, oldest first.
    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        let mut stmt = self
            .conn
            .prepare(SELECT_DATES)
            .map_err(|e| PlannerError::persistence("load study sessions", e))?;
        let dates = stmt
            .query_map([], |row| row.get(0))
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<NaiveDate>>>())
            .map_err(|e| PlannerError::persistence("load study sessions", e))?;
        Ok(dates)
    }

    pub fn minutes_on(&self, date: NaiveDate) -> Result<u32> {
        self.conn
            .query_row(SUM_MINUTES, params![date], |row| row.get(0))
            .map_err(|e| PlannerError::persistence("load study sessions", e))
    }
}
