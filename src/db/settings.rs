use crate::libs::error::{PlannerError, Result};
use crate::libs::planner::SettingsStore;
use crate::libs::settings::StudySettings;
use rusqlite::{params, Connection, OptionalExtension};

const SELECT_SETTINGS: &str = "SELECT start_date, end_date, daily_hours FROM settings WHERE id = 1";
const UPSERT_SETTINGS: &str = "INSERT INTO settings (id, start_date, end_date, daily_hours) VALUES (1, ?1, ?2, ?3)
    ON CONFLICT(id) DO UPDATE SET start_date = excluded.start_date, end_date = excluded.end_date, daily_hours = excluded.daily_hours";

/// Single-row [`SettingsStore`]; saving overwrites the previous window.
pub struct Settings<'a> {
    conn: &'a Connection,
}

impl<'a> Settings<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Settings { conn }
    }
}

impl SettingsStore for Settings<'_> {
    fn get_settings(&self) -> Result<Option<StudySettings>> {
        self.conn
            .query_row(SELECT_SETTINGS, [], |row| {
                Ok(StudySettings {
                    start_date: row.get(0)?,
                    end_date: row.get(1)?,
                    daily_hours: row.get(2)?,
                })
            })
            .optional()
            .map_err(|e| PlannerError::persistence("load settings", e))
    }

    fn save_settings(&mut self, settings: &StudySettings) -> Result<()> {
        self.conn
            .execute(
                UPSERT_SETTINGS,
                params![settings.start_date, settings.end_date, settings.daily_hours],
            )
            .map_err(|e| PlannerError::persistence("save settings", e))?;
        Ok(())
    }
}
