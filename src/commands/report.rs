//! Daily dashboard: exam countdown, today's tasks, streak, syllabus progress,
//! test overview and achievements.

use crate::{
    db::{achievements::Achievements, scores::Scores, sessions::Sessions},
    libs::{
        achievements::{self, CATALOG},
        analytics::TestAnalytics,
        countdown::Countdown,
        curriculum::{Curriculum, CurriculumProvider},
        messages::Message,
        session::Session,
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::Local;

pub async fn cmd() -> Result<()> {
    let session = Session::current()?;
    let now = Local::now().naive_local();
    let today = now.date();
    let curriculum = Curriculum::neet();

    msg_print!(Message::ReportHeader(today.to_string()), true);
    match Countdown::until(session.config.exam.exam_date, now) {
        Some(left) => msg_print!(Message::ExamCountdown(left.to_string())),
        None => msg_print!(Message::ExamStarted),
    }

    let dates = Sessions::new(&session.db.conn).dates()?;
    msg_print!(Message::StudyStreak(achievements::streak(&dates, today)));

    let planner = session.planner(today)?;
    let todays: Vec<_> = planner.tasks_on(today).into_iter().cloned().collect();
    msg_print!(Message::TodayHeader, true);
    if todays.is_empty() {
        msg_info!(Message::NoTasksForDate(today.to_string()));
    } else {
        View::tasks(&todays, &curriculum)?;
    }

    let checklist = session.checklist()?;
    msg_print!(Message::TotalProgress(
        checklist.total_progress(),
        checklist.completed_chapters(),
        curriculum.total_chapters()
    ));

    let tests = Scores::new(&session.db.conn).fetch()?;
    if !tests.is_empty() {
        let overview = TestAnalytics::compute(&curriculum, &tests).overview(&tests);
        msg_print!(Message::OverviewLine(
            overview.tests,
            overview.average,
            overview.trend.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string())
        ));
        if let Some((subject_id, average)) = overview.best_subject {
            let name = curriculum.subject(&subject_id).map(|s| s.name.clone()).unwrap_or(subject_id);
            msg_print!(Message::BestSubject(name, average));
        }
    }

    let unlocked = Achievements::new(&session.db.conn).unlocked()?;
    msg_print!(Message::AchievementsHeader(achievements::points(unlocked.iter().map(String::as_str))), true);
    View::achievements(&CATALOG, &unlocked)
}
