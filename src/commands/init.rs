//! Profile selection and first-time setup.

use super::{announce_achievements, parse_date};
use crate::{
    libs::{
        config::{Config, PomodoroConfig},
        data_storage::DataStorage,
        error::PlannerError,
        messages::Message,
        session::Session,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Profile to activate; its database is created on first use
    #[arg(short, long)]
    profile: String,

    /// Exam day (YYYY-MM-DD)
    #[arg(long)]
    exam_date: Option<String>,

    /// Last day of the theory phase (YYYY-MM-DD)
    #[arg(long)]
    theory_deadline: Option<String>,

    /// Pomodoro focus length in minutes
    #[arg(long)]
    focus: Option<u32>,

    /// Pomodoro break length in minutes
    #[arg(long = "break")]
    break_minutes: Option<u32>,
}

pub fn cmd(args: InitArgs) -> Result<()> {
    let storage = DataStorage::new();
    let mut config = Config::read_from(&storage)?;

    let profile = args.profile.trim();
    if profile.is_empty() || profile.contains(['/', '\\']) {
        return Err(PlannerError::validation(format!("invalid profile name '{}'", args.profile)).into());
    }
    config.profile = Some(profile.to_string());

    if let Some(value) = args.exam_date {
        config.exam.exam_date = parse_date(&value)?;
    }
    if let Some(value) = args.theory_deadline {
        config.exam.theory_deadline = parse_date(&value)?;
    }
    if config.exam.theory_deadline > config.exam.exam_date {
        return Err(PlannerError::validation(format!(
            "theory deadline {} is after the exam date {}",
            config.exam.theory_deadline, config.exam.exam_date
        ))
        .into());
    }

    if args.focus.is_some() || args.break_minutes.is_some() {
        let current = config.pomodoro();
        let pomodoro = PomodoroConfig {
            focus_minutes: args.focus.unwrap_or(current.focus_minutes),
            break_minutes: args.break_minutes.unwrap_or(current.break_minutes),
        };
        pomodoro.validate()?;
        config.pomodoro = Some(pomodoro);
    }

    config.save_to(&storage)?;
    msg_success!(Message::ConfigSaved);

    let session = Session::open(&storage)?;
    msg_info!(Message::ProfileActivated(session.profile.clone()));
    msg_info!(Message::ExamCalendar(
        session.config.exam.exam_date.to_string(),
        session.config.exam.theory_deadline.to_string()
    ));
    announce_achievements(&session)
}
