//! Study plan generation and the planner controller.
//!
//! [`PlanGenerator`] turns a study window into one theory task and one practice
//! task per curriculum chapter. The window is split at the theory deadline:
//!
//! ```text
//! start_date ........ theory_end ........ end_date
//! |  theory tasks    |   practice tasks   |
//! theory_end = min(theory_deadline, end_date)
//! ```
//!
//! Each task lands on a uniformly random day inside its phase, both ends
//! inclusive. The random source is injected so callers can seed it.
//!
//! Tasks are written to the [`TaskStore`] one at a time, in curriculum order.
//! The first failing write halts the run; tasks written before it stay in the
//! store. After a successful run the complete task list is reloaded from the
//! store rather than merged in memory.
//!
//! [`StudyPlanner`] is the state object the CLI drives: it owns the current
//! settings, the working task list and both stores, and reloads the task list
//! after every mutation.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use tracing::{debug, error, info};

use super::config::ExamConfig;
use super::curriculum::CurriculumProvider;
use super::error::{PlannerError, Result};
use super::settings::StudySettings;
use super::task::{NewTask, Priority, StudyTask, TaskType};

/// Persistence for study tasks.
pub trait TaskStore {
    /// Stores `task` under a freshly generated id and returns the stored record.
    fn add_task(&mut self, task: &NewTask) -> Result<StudyTask>;
    fn list_tasks(&self) -> Result<Vec<StudyTask>>;
    fn update_task_status(&mut self, id: &str, completed: bool) -> Result<()>;
    fn delete_task(&mut self, id: &str) -> Result<()>;
}

/// Persistence for the study window settings.
pub trait SettingsStore {
    /// `None` until settings have been saved once.
    fn get_settings(&self) -> Result<Option<StudySettings>>;
    fn save_settings(&mut self, settings: &StudySettings) -> Result<()>;
}

/// Phase boundaries derived from a validated study window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanPhases {
    pub start_date: NaiveDate,
    pub theory_end: NaiveDate,
    pub end_date: NaiveDate,
}

impl PlanPhases {
    pub fn new(settings: &StudySettings, exam: &ExamConfig) -> Self {
        PlanPhases {
            start_date: settings.start_date,
            theory_end: exam.theory_deadline.min(settings.end_date),
            end_date: settings.end_date,
        }
    }

    /// Days available for theory. Zero when the window opens after the theory deadline.
    pub fn theory_days(&self) -> i64 {
        (self.theory_end - self.start_date).num_days().max(0)
    }

    /// Days available for practice; never negative because `theory_end <= end_date`.
    pub fn practice_days(&self) -> i64 {
        (self.end_date - self.theory_end).num_days()
    }

    pub fn theory_date<R: Rng>(&self, rng: &mut R) -> NaiveDate {
        self.start_date + Duration::days(rng.random_range(0..=self.theory_days()))
    }

    pub fn practice_date<R: Rng>(&self, rng: &mut R) -> NaiveDate {
        self.theory_end + Duration::days(rng.random_range(0..=self.practice_days()))
    }
}

/// Result of a successful generation run.
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    /// Settings as saved, after validation and capping.
    pub settings: StudySettings,
    pub phases: PlanPhases,
    /// Number of tasks this run created.
    pub created: usize,
    /// Full task list reloaded from the store.
    pub tasks: Vec<StudyTask>,
}

pub struct PlanGenerator<'a, C: CurriculumProvider + ?Sized> {
    curriculum: &'a C,
    exam: ExamConfig,
}

impl<'a, C: CurriculumProvider + ?Sized> PlanGenerator<'a, C> {
    pub fn new(curriculum: &'a C, exam: ExamConfig) -> Self {
        PlanGenerator { curriculum, exam }
    }

    /// Saves `request` and schedules the whole curriculum inside it.
    ///
    /// # Errors
    ///
    /// - `ValidationFailure` if the window is invalid for `today`; nothing is written.
    /// - `PersistenceFailure` if settings cannot be saved; no task is generated.
    /// - `PersistenceFailure` from the first failing task insert; earlier inserts remain.
    pub fn generate<T, S, R>(
        &self,
        request: &StudySettings,
        today: NaiveDate,
        tasks: &mut T,
        settings_store: &mut S,
        rng: &mut R,
    ) -> Result<GeneratedPlan>
    where
        T: TaskStore + ?Sized,
        S: SettingsStore + ?Sized,
        R: Rng,
    {
        let settings = request.validated(today, &self.exam)?;

        if let Err(e) = settings_store.save_settings(&settings) {
            error!(error = %e, "saving study settings failed; plan not generated");
            return Err(e);
        }

        let phases = PlanPhases::new(&settings, &self.exam);
        info!(
            start = %phases.start_date,
            theory_end = %phases.theory_end,
            end = %phases.end_date,
            chapters = self.curriculum.total_chapters(),
            "generating study plan"
        );

        let mut created = 0;
        for subject in self.curriculum.subjects() {
            for chapter in &subject.chapters {
                let theory = NewTask::new(&subject.id, &chapter.id, phases.theory_date(rng), TaskType::Theory)
                    .with_priority(Priority::High);
                self.persist(tasks, &theory, created)?;
                created += 1;

                let practice = NewTask::new(&subject.id, &chapter.id, phases.practice_date(rng), TaskType::Practice)
                    .with_priority(Priority::High);
                self.persist(tasks, &practice, created)?;
                created += 1;
            }
        }

        info!(created, "study plan generated");

        Ok(GeneratedPlan {
            settings,
            phases,
            created,
            tasks: tasks.list_tasks()?,
        })
    }

    fn persist<T: TaskStore + ?Sized>(&self, tasks: &mut T, task: &NewTask, created: usize) -> Result<()> {
        match tasks.add_task(task) {
            Ok(stored) => {
                debug!(id = %stored.id, subject = %stored.subject_id, chapter = %stored.chapter_id, date = %stored.date, kind = %stored.task_type, "task scheduled");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, created, subject = %task.subject_id, chapter = %task.chapter_id, "task insert failed; generation halted");
                Err(e)
            }
        }
    }
}

/// Planner state: settings plus the working task list, backed by two stores.
pub struct StudyPlanner<T: TaskStore, S: SettingsStore> {
    tasks_store: T,
    settings_store: S,
    exam: ExamConfig,
    settings: StudySettings,
    tasks: Vec<StudyTask>,
}

impl<T: TaskStore, S: SettingsStore> StudyPlanner<T, S> {
    /// Loads settings (or defaults) and the task list.
    pub fn load(tasks_store: T, settings_store: S, exam: ExamConfig, today: NaiveDate) -> Result<Self> {
        let settings = settings_store
            .get_settings()?
            .unwrap_or_else(|| StudySettings::defaults(today, &exam));
        let tasks = tasks_store.list_tasks()?;

        Ok(StudyPlanner {
            tasks_store,
            settings_store,
            exam,
            settings,
            tasks,
        })
    }

    pub fn settings(&self) -> &StudySettings {
        &self.settings
    }

    pub fn tasks(&self) -> &[StudyTask] {
        &self.tasks
    }

    pub fn exam(&self) -> &ExamConfig {
        &self.exam
    }

    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&StudyTask> {
        self.tasks.iter().filter(|t| t.date == date).collect()
    }

    pub fn task(&self, id: &str) -> Option<&StudyTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Runs the generator and replaces the working list with the store's contents.
    pub fn generate_auto_plan<C, R>(
        &mut self,
        curriculum: &C,
        request: &StudySettings,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<GeneratedPlan>
    where
        C: CurriculumProvider + ?Sized,
        R: Rng,
    {
        let generator = PlanGenerator::new(curriculum, self.exam);
        let outcome = generator.generate(request, today, &mut self.tasks_store, &mut self.settings_store, rng);

        // Settings may have been saved even when a task insert failed.
        if let Ok(Some(saved)) = self.settings_store.get_settings() {
            self.settings = saved;
        }
        self.reload()?;

        outcome
    }

    pub fn add_manual_task(&mut self, task: NewTask) -> Result<StudyTask> {
        if task.duration < 1 {
            return Err(PlannerError::validation(format!("duration must be at least one hour, got {}", task.duration)));
        }
        let stored = self.tasks_store.add_task(&task)?;
        self.reload()?;
        Ok(stored)
    }

    pub fn set_task_completed(&mut self, id: &str, completed: bool) -> Result<()> {
        self.tasks_store.update_task_status(id, completed)?;
        self.reload()
    }

    /// Flips completion of task `id`; returns the new state.
    pub fn toggle_task(&mut self, id: &str) -> Result<bool> {
        let completed = !self
            .task(id)
            .ok_or_else(|| PlannerError::NotFound(format!("task {}", id)))?
            .is_completed;
        self.set_task_completed(id, completed)?;
        Ok(completed)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<()> {
        self.tasks_store.delete_task(id)?;
        self.reload()
    }

    fn reload(&mut self) -> Result<()> {
        self.tasks = self.tasks_store.list_tasks()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::curriculum::{Chapter, Curriculum, Subject};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct VecStore {
        tasks: Vec<StudyTask>,
        settings: Option<StudySettings>,
        next_id: usize,
    }

    impl TaskStore for VecStore {
        fn add_task(&mut self, task: &NewTask) -> Result<StudyTask> {
            self.next_id += 1;
            let stored = task.clone().into_task(self.next_id.to_string());
            self.tasks.push(stored.clone());
            Ok(stored)
        }

        fn list_tasks(&self) -> Result<Vec<StudyTask>> {
            Ok(self.tasks.clone())
        }

        fn update_task_status(&mut self, id: &str, completed: bool) -> Result<()> {
            let task = self
                .tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| PlannerError::NotFound(id.to_string()))?;
            task.is_completed = completed;
            Ok(())
        }

        fn delete_task(&mut self, id: &str) -> Result<()> {
            self.tasks.retain(|t| t.id != id);
            Ok(())
        }
    }

    impl SettingsStore for VecStore {
        fn get_settings(&self) -> Result<Option<StudySettings>> {
            Ok(self.settings)
        }

        fn save_settings(&mut self, settings: &StudySettings) -> Result<()> {
            self.settings = Some(*settings);
            Ok(())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn small_curriculum() -> Curriculum {
        Curriculum::new(vec![Subject::new(
            "physics",
            "Physics",
            "blue",
            vec![Chapter::new("p1", "Kinematics"), Chapter::new("p2", "Optics")],
        )])
    }

    #[test]
    fn test_phases_cap_theory_end_at_deadline() {
        let exam = ExamConfig::default();
        let phases = PlanPhases::new(&StudySettings::new(date(2025, 2, 1), date(2025, 4, 20), 6), &exam);
        assert_eq!(phases.theory_end, date(2025, 4, 1));
        assert_eq!(phases.theory_days(), 59);
        assert_eq!(phases.practice_days(), 19);
    }

    #[test]
    fn test_phases_when_window_starts_after_deadline() {
        let exam = ExamConfig::default();
        let phases = PlanPhases::new(&StudySettings::new(date(2025, 4, 10), date(2025, 4, 20), 6), &exam);
        assert_eq!(phases.theory_days(), 0);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(phases.theory_date(&mut rng), date(2025, 4, 10));
    }

    #[test]
    fn test_generate_covers_every_chapter_twice() {
        let curriculum = small_curriculum();
        let generator = PlanGenerator::new(&curriculum, ExamConfig::default());
        let mut tasks = VecStore::default();
        let mut settings = VecStore::default();
        let mut rng = StdRng::seed_from_u64(42);

        let plan = generator
            .generate(
                &StudySettings::new(date(2025, 2, 1), date(2025, 4, 20), 6),
                date(2025, 1, 1),
                &mut tasks,
                &mut settings,
                &mut rng,
            )
            .unwrap();

        assert_eq!(plan.created, 4);
        assert_eq!(plan.tasks.len(), 4);
        assert!(plan.tasks.iter().all(|t| t.priority == Priority::High));
        assert_eq!(settings.settings, Some(plan.settings));
    }

    #[test]
    fn test_same_seed_same_dates() {
        let curriculum = small_curriculum();
        let generator = PlanGenerator::new(&curriculum, ExamConfig::default());
        let request = StudySettings::new(date(2025, 2, 1), date(2025, 4, 20), 6);

        let run = |seed| {
            let mut tasks = VecStore::default();
            let mut settings = VecStore::default();
            let mut rng = StdRng::seed_from_u64(seed);
            generator
                .generate(&request, date(2025, 1, 1), &mut tasks, &mut settings, &mut rng)
                .unwrap()
                .tasks
                .into_iter()
                .map(|t| t.date)
                .collect::<Vec<_>>()
        };

        assert_eq!(run(7), run(7));
    }

    #[test]
    fn test_toggle_flips_only_target() {
        let curriculum = small_curriculum();
        let mut planner =
            StudyPlanner::load(VecStore::default(), VecStore::default(), ExamConfig::default(), date(2025, 1, 1))
                .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        planner
            .generate_auto_plan(
                &curriculum,
                &StudySettings::new(date(2025, 2, 1), date(2025, 4, 20), 6),
                date(2025, 1, 1),
                &mut rng,
            )
            .unwrap();

        let target = planner.tasks()[1].id.clone();
        assert!(planner.toggle_task(&target).unwrap());

        for task in planner.tasks() {
            assert_eq!(task.is_completed, task.id == target);
        }
    }

    #[test]
    fn test_load_uses_default_settings_when_none_saved() {
        let planner =
            StudyPlanner::load(VecStore::default(), VecStore::default(), ExamConfig::default(), date(2025, 1, 10))
                .unwrap();
        assert_eq!(planner.settings().start_date, date(2025, 1, 10));
        assert_eq!(planner.settings().end_date, date(2025, 5, 4));
        assert_eq!(planner.settings().daily_hours, 6);
    }
}
