use super::parse_date;
use crate::{
    libs::{
        curriculum::Curriculum,
        error::PlannerError,
        messages::Message,
        planner::{GeneratedPlan, SettingsStore, StudyPlanner, TaskStore},
        session::Session,
        settings::{StudySettings, DEFAULT_DAILY_HOURS},
        view::View,
    },
    msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Args)]
pub struct PlanArgs {
    #[command(subcommand)]
    command: PlanCommand,
}

#[derive(Debug, Subcommand)]
enum PlanCommand {
    /// Schedule a theory and a practice task for every chapter
    Generate {
        /// First study day (YYYY-MM-DD, today, tomorrow)
        #[arg(short, long, default_value = "today")]
        start: String,
        /// Last study day; capped at the exam date
        #[arg(short, long)]
        end: Option<String>,
        /// Daily study hours, clamped to 1..=12
        #[arg(long, default_value_t = DEFAULT_DAILY_HOURS as i64, allow_negative_numbers = true)]
        hours: i64,
        /// Seed for reproducible dates
        #[arg(long)]
        seed: Option<u64>,
        /// Skip the confirmation when tasks already exist
        #[arg(short, long)]
        yes: bool,
    },
    /// Show tasks scheduled for a day
    Show {
        #[arg(short, long, default_value = "today")]
        date: String,
    },
    /// Show the saved study window
    Settings,
}

pub async fn cmd(args: PlanArgs) -> Result<()> {
    let session = Session::current()?;
    match args.command {
        PlanCommand::Generate {
            start,
            end,
            hours,
            seed,
            yes,
        } => handle_generate(&session, &start, end.as_deref(), hours, seed, yes),
        PlanCommand::Show { date } => handle_show(&session, &date),
        PlanCommand::Settings => handle_settings(&session),
    }
}

fn handle_generate(session: &Session, start: &str, end: Option<&str>, hours: i64, seed: Option<u64>, yes: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let exam_date = session.config.exam.exam_date;
    if exam_date < today {
        return Err(PlannerError::validation(Message::ExamDatePassed(exam_date.to_string()).to_string()).into());
    }
    let mut planner = session.planner(today)?;

    let start_date = parse_date(start)?;
    let end_date = match end {
        Some(value) => parse_date(value)?,
        None => session.config.exam.exam_date,
    };
    if end_date > session.config.exam.exam_date {
        msg_warning!(Message::EndDateCapped(end_date.to_string(), session.config.exam.exam_date.to_string()));
    }
    let request = StudySettings::new(start_date, end_date, hours);

    let existing = planner.tasks().len();
    if existing > 0 && !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmRegeneratePlan(existing).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let plan = generate(&mut planner, &request, today, &mut rng)?;
    msg_success!(Message::PlanGenerated(
        plan.created,
        plan.phases.start_date.to_string(),
        plan.phases.theory_end.to_string(),
        plan.phases.end_date.to_string()
    ));
    Ok(())
}

/// Generates over the NEET curriculum; failures come back wrapped in `PlanGenerationFailed`.
fn generate<T, S, R>(
    planner: &mut StudyPlanner<T, S>,
    request: &StudySettings,
    today: NaiveDate,
    rng: &mut R,
) -> Result<GeneratedPlan>
where
    T: TaskStore,
    S: SettingsStore,
    R: Rng,
{
    planner
        .generate_auto_plan(&Curriculum::neet(), request, today, rng)
        .context(Message::PlanGenerationFailed)
}

fn handle_show(session: &Session, date: &str) -> Result<()> {
    let date = parse_date(date)?;
    let planner = session.planner(Local::now().date_naive())?;

    if planner.tasks().is_empty() {
        msg_info!(Message::NoPlanYet);
        return Ok(());
    }

    let tasks: Vec<_> = planner.tasks_on(date).into_iter().cloned().collect();
    if tasks.is_empty() {
        msg_info!(Message::NoTasksForDate(date.to_string()));
        return Ok(());
    }

    msg_print!(Message::PlanHeader(date.to_string()), true);
    View::tasks(&tasks, &Curriculum::neet())
}

fn handle_settings(session: &Session) -> Result<()> {
    let planner = session.planner(Local::now().date_naive())?;
    let settings = planner.settings();
    if planner.exam().exam_date < Local::now().date_naive() {
        msg_warning!(Message::ExamDatePassed(planner.exam().exam_date.to_string()));
    }
    msg_info!(Message::PlanSettings(
        settings.start_date.to_string(),
        settings.end_date.to_string(),
        settings.daily_hours
    ));
    msg_info!(Message::ExamCalendar(
        planner.exam().exam_date.to_string(),
        planner.exam().theory_deadline.to_string()
    ));
    Ok(())
}
