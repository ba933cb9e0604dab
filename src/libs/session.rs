//! The active profile and its open database.
//!
//! A profile plays the role of a signed-in learner: it selects the database
//! file every command works against. Without one, commands fail with
//! [`PlannerError::NotAuthenticated`].

use chrono::NaiveDate;
use tracing::debug;

use super::achievements::{self, Achievement, Progress};
use super::checklist::Checklist;
use super::config::Config;
use super::curriculum::Curriculum;
use super::data_storage::DataStorage;
use super::error::{PlannerError, Result};
use super::planner::StudyPlanner;
use crate::db::achievements::Achievements;
use crate::db::db::Db;
use crate::db::mistakes::Mistakes;
use crate::db::progress::Progress as ProgressStore;
use crate::db::sessions::Sessions;
use crate::db::settings::Settings;
use crate::db::tasks::Tasks;

pub struct Session {
    pub profile: String,
    pub config: Config,
    pub db: Db,
}

impl Session {
    /// Opens the session for the profile recorded in the default data directory.
    pub fn current() -> Result<Session> {
        Self::open(&DataStorage::new())
    }

    pub fn open(storage: &DataStorage) -> Result<Session> {
        let config = Config::read_from(storage).map_err(|e| PlannerError::persistence("read configuration", e))?;
        let profile = config
            .profile
            .clone()
            .filter(|p| !p.trim().is_empty())
            .ok_or(PlannerError::NotAuthenticated)?;

        debug!(%profile, "opening profile database");
        let db = Db::for_profile(storage, &profile)?;

        Ok(Session { profile, config, db })
    }

    pub fn planner(&self, today: NaiveDate) -> Result<StudyPlanner<Tasks<'_>, Settings<'_>>> {
        StudyPlanner::load(Tasks::new(&self.db.conn), Settings::new(&self.db.conn), self.config.exam, today)
    }

    /// The NEET curriculum with this profile's checklist progress applied.
    pub fn checklist(&self) -> Result<Checklist> {
        let rows = ProgressStore::new(&self.db.conn).fetch()?;
        Ok(Checklist::with_progress(Curriculum::neet(), &rows))
    }

    /// Unlocks every achievement the profile now qualifies for and returns the new ones.
    pub fn award_achievements(&self, today: NaiveDate) -> Result<Vec<&'static Achievement>> {
        let dates = Sessions::new(&self.db.conn).dates()?;
        let progress = Progress {
            streak: achievements::streak(&dates, today),
            completed_chapters: self.checklist()?.completed_chapters(),
            resolved_mistakes: Mistakes::new(&self.db.conn).count_resolved()?,
        };

        let mut store = Achievements::new(&self.db.conn);
        let unlocked = store.unlocked()?;
        let mut fresh = Vec::new();
        for achievement in achievements::evaluate(&progress, &unlocked) {
            if store.unlock(achievement.key)? {
                debug!(key = achievement.key, "achievement unlocked");
                fresh.push(achievement);
            }
        }
        Ok(fresh)
    }
}
