//! User-facing text for every [`Message`].
//!
//! All wording lives here so commands only pick a variant and its parameters.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ProfileActivated(profile) => format!("Profile '{}' is now active", profile),
            Message::ExamCalendar(exam, deadline) => format!("Exam on {}, theory deadline {}", exam, deadline),

            // === MIGRATION MESSAGES ===
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),

            // === PLAN MESSAGES ===
            Message::PlanGenerated(count, start, theory_end, end) => format!(
                "Generated {} tasks: theory {} .. {}, practice {} .. {}",
                count, start, theory_end, theory_end, end
            ),
            Message::PlanGenerationFailed => "Plan generation stopped".to_string(),
            Message::ExamDatePassed(exam) => {
                format!("Exam date {} has passed; set the next one with `neetplan init --exam-date`", exam)
            }
            Message::EndDateCapped(end, exam) => format!("End date {} is after the exam; planning until {}", end, exam),
            Message::ConfirmRegeneratePlan(count) => format!(
                "{} tasks already exist. Generating adds a full new plan on top of them. Continue?",
                count
            ),
            Message::NoPlanYet => "No study plan yet. Run `neetplan plan generate` to create one".to_string(),
            Message::PlanSettings(start, end, hours) => {
                format!("Study window {} .. {}, {} hours a day", start, end, hours)
            }
            Message::PlanHeader(date) => format!("📅 Study plan for {}", date),

            // === TASK MESSAGES ===
            Message::TaskCreated(id) => format!("Task {} created", id),
            Message::TaskCompleted(id) => format!("Task {} marked as done", id),
            Message::TaskReopened(id) => format!("Task {} marked as pending", id),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::ConfirmDeleteTask(id) => format!("Delete task {}?", id),
            Message::NoTasksForDate(date) => format!("No tasks scheduled for {}", date),
            Message::NoTasks => "No tasks found".to_string(),
            Message::TasksHeader(label) => format!("📋 Tasks: {}", label),

            // === CHAPTER MESSAGES ===
            Message::ActivityMarked(chapter, activity, done) => {
                let state = if *done { "done" } else { "not done" };
                format!("{} for '{}' marked as {}", activity, chapter, state)
            }
            Message::ChapterRevised(chapter, count) => format!("'{}' revised ({} so far)", chapter, count),
            Message::ChecklistHeader(subject) => format!("📚 {} checklist", subject),
            Message::ProgressHeader => "📈 Syllabus progress".to_string(),
            Message::TotalProgress(pct, done, total) => {
                format!("Overall {:.1}% ({} of {} chapters complete)", pct, done, total)
            }

            // === SCORE MESSAGES ===
            Message::ScoreAdded(id, pct) => format!("Test {} recorded ({:.1}%)", id, pct),
            Message::ScoreDeleted(id) => format!("Test {} deleted", id),
            Message::ConfirmDeleteScore(id) => format!("Delete test {}?", id),
            Message::NoScores => "No test scores recorded yet".to_string(),
            Message::ScoresHeader => "📝 Test scores".to_string(),
            Message::AnalyticsHeader(subject) => format!("📊 {} performance", subject),
            Message::OverviewLine(tests, avg, trend) => {
                format!("{} tests, average {:.1}%, latest trend {}", tests, avg, trend)
            }
            Message::BestSubject(subject, avg) => format!("Best subject: {} ({:.1}%)", subject, avg),
            Message::WeakChapters(list) => format!("Needs work (< 60%): {}", list),
            Message::StrongChapters(list) => format!("Strong (≥ 80%): {}", list),

            // === MISTAKE MESSAGES ===
            Message::MistakeAdded(id) => format!("Mistake {} logged", id),
            Message::MistakeUpdated(id) => format!("Mistake {} updated", id),
            Message::MistakeResolved(id, resolved) => {
                if *resolved {
                    format!("Mistake {} marked as resolved", id)
                } else {
                    format!("Mistake {} reopened", id)
                }
            }
            Message::MistakeRevised(id, count) => format!("Mistake {} revised ({} so far)", id, count),
            Message::MistakeDeleted(id) => format!("Mistake {} deleted", id),
            Message::ConfirmDeleteMistake(id) => format!("Delete mistake {}?", id),
            Message::NothingToUpdate => "Nothing to update; pass --content, --solution or --priority".to_string(),
            Message::NoMistakes => "No mistakes logged".to_string(),
            Message::MistakesHeader => "🧩 Mistake log".to_string(),

            // === ACHIEVEMENT MESSAGES ===
            Message::AchievementUnlocked(title, points) => format!("🏆 Achievement unlocked: {} (+{} points)", title, points),
            Message::AchievementsHeader(points) => format!("🏆 Achievements ({} points)", points),

            // === TIMER MESSAGES ===
            Message::TimerStarted(focus, brk) => format!("⏱️ Pomodoro: {} min focus / {} min break", focus, brk),
            Message::TimerControls => "Type p + Enter to pause or resume, r to reset, q to quit".to_string(),
            Message::FocusCompleted(count) => format!("Focus session {} complete. Take a break", count),
            Message::BreakCompleted => "Break over. Back to focus".to_string(),
            Message::TimerStopped(count) => format!("Timer stopped after {} focus session(s)", count),
            Message::TimerPaused => "Paused".to_string(),
            Message::TimerResumed => "Resumed".to_string(),
            Message::TimerReset => "Timer reset".to_string(),

            // === REPORT MESSAGES ===
            Message::ReportHeader(date) => format!("🎯 NEET dashboard for {}", date),
            Message::ExamCountdown(left) => format!("Exam in {}", left),
            Message::ExamStarted => "The exam has started. Good luck!".to_string(),
            Message::StudyStreak(days) => format!("🔥 Study streak: {} day(s)", days),
            Message::TodayHeader => "Today's tasks".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("Data exported to {}", path),
            Message::NothingToExport => "Nothing to export".to_string(),

            // === GENERAL ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", s)
    }
}
