//! Command-line interface.
//!
//! Every subcommand lives in its own module with an `*Args` struct and a
//! `cmd` entry point. All of them except `init` run against the active
//! profile's database.

pub mod chapter;
pub mod export;
pub mod init;
pub mod mistake;
pub mod plan;
pub mod report;
pub mod score;
pub mod task;
pub mod timer;

use crate::libs::{error::PlannerError, messages::Message, session::Session};
use crate::msg_success;
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Select a profile and set the exam calendar")]
    Init(init::InitArgs),
    #[command(about = "Generate and inspect the study plan")]
    Plan(plan::PlanArgs),
    #[command(about = "Manage study tasks")]
    Task(task::TaskArgs),
    #[command(about = "Chapter checklist and syllabus progress")]
    Chapter(chapter::ChapterArgs),
    #[command(about = "Log test scores and view analytics")]
    Score(score::ScoreArgs),
    #[command(about = "Keep a log of mistakes to revise")]
    Mistake(mistake::MistakeArgs),
    #[command(about = "Run a pomodoro timer")]
    Timer(timer::TimerArgs),
    #[command(about = "Show the dashboard: countdown, today, progress, achievements")]
    Report,
    #[command(about = "Export tasks, scores or mistakes")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about = "NEET study planner and progress tracker", long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Plan(args) => plan::cmd(args).await,
            Commands::Task(args) => task::cmd(args).await,
            Commands::Chapter(args) => chapter::cmd(args).await,
            Commands::Score(args) => score::cmd(args).await,
            Commands::Mistake(args) => mistake::cmd(args).await,
            Commands::Timer(args) => timer::cmd(args).await,
            Commands::Report => report::cmd().await,
            Commands::Export(args) => export::cmd(args).await,
        }
    }
}

/// Accepts `today`, `tomorrow` or `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Result<NaiveDate, PlannerError> {
    let today = Local::now().date_naive();
    match value.to_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => Ok(today + Duration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .map_err(|_| PlannerError::validation(format!("expected YYYY-MM-DD, today or tomorrow, got '{}'", value))),
    }
}

/// Resolves a full id or a unique id prefix against `ids`.
pub fn resolve_id<'a, I>(prefix: &str, ids: I, what: &str) -> Result<String, PlannerError>
where
    I: IntoIterator<Item = &'a str>,
{
    let matches: Vec<&str> = ids.into_iter().filter(|id| id.starts_with(prefix)).collect();
    match matches.as_slice() {
        [id] => Ok(id.to_string()),
        [] => Err(PlannerError::NotFound(format!("{} {}", what, prefix))),
        _ if matches.contains(&prefix) => Ok(prefix.to_string()),
        _ => Err(PlannerError::validation(format!(
            "{} id '{}' is ambiguous ({} matches)",
            what,
            prefix,
            matches.len()
        ))),
    }
}

/// Unlocks and announces any achievements the latest change earned.
pub(crate) fn announce_achievements(session: &Session) -> Result<()> {
    for achievement in session.award_achievements(Local::now().date_naive())? {
        msg_success!(Message::AchievementUnlocked(achievement.title.to_string(), achievement.points));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-02-01").unwrap(), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(parse_date("TODAY").unwrap(), Local::now().date_naive());
        assert!(parse_date("01/02/2025").is_err());
    }

    #[test]
    fn test_resolve_id_by_prefix() {
        let ids = ["3f2a9c1e-0000", "3f2b0000-0000", "a0000000-0000"];
        assert_eq!(resolve_id("a0", ids, "task").unwrap(), "a0000000-0000");
        assert!(matches!(resolve_id("3f2", ids, "task"), Err(PlannerError::ValidationFailure(_))));
        assert!(matches!(resolve_id("ff", ids, "task"), Err(PlannerError::NotFound(_))));
    }
}
