#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ProfileActivated(String),
    ExamCalendar(String, String), // exam date, theory deadline

    // === MIGRATION MESSAGES ===
    DatabaseUpToDate,
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,

    // === PLAN MESSAGES ===
    PlanGenerated(usize, String, String, String), // created, start, theory end, end
    PlanGenerationFailed,
    ExamDatePassed(String),
    EndDateCapped(String, String), // requested end, exam date
    ConfirmRegeneratePlan(usize),
    NoPlanYet,
    PlanSettings(String, String, i32),
    PlanHeader(String),

    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskCompleted(String),
    TaskReopened(String),
    TaskDeleted(String),
    ConfirmDeleteTask(String),
    NoTasksForDate(String),
    NoTasks,
    TasksHeader(String),

    // === CHAPTER MESSAGES ===
    ActivityMarked(String, String, bool), // chapter, activity, done
    ChapterRevised(String, u32),
    ChecklistHeader(String),
    ProgressHeader,
    TotalProgress(f64, usize, usize), // percent, completed chapters, total chapters

    // === SCORE MESSAGES ===
    ScoreAdded(String, f64),
    ScoreDeleted(String),
    ConfirmDeleteScore(String),
    NoScores,
    ScoresHeader,
    AnalyticsHeader(String),
    OverviewLine(usize, f64, String), // tests, mean percent, trend
    BestSubject(String, f64),
    WeakChapters(String),
    StrongChapters(String),

    // === MISTAKE MESSAGES ===
    MistakeAdded(String),
    MistakeUpdated(String),
    MistakeResolved(String, bool),
    MistakeRevised(String, u32),
    MistakeDeleted(String),
    ConfirmDeleteMistake(String),
    NothingToUpdate,
    NoMistakes,
    MistakesHeader,

    // === ACHIEVEMENT MESSAGES ===
    AchievementUnlocked(String, u32),
    AchievementsHeader(u32),

    // === TIMER MESSAGES ===
    TimerStarted(u32, u32),
    TimerControls,
    FocusCompleted(u32),
    BreakCompleted,
    TimerStopped(u32),
    TimerPaused,
    TimerResumed,
    TimerReset,

    // === REPORT MESSAGES ===
    ReportHeader(String),
    ExamCountdown(String),
    ExamStarted,
    StudyStreak(u32),
    TodayHeader,

    // === EXPORT MESSAGES ===
    ExportCompleted(String),
    NothingToExport,

    // === GENERAL ===
    OperationCancelled,
}
