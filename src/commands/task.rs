use super::{parse_date, resolve_id};
use crate::{
    db::{settings::Settings, tasks::Tasks},
    libs::{
        curriculum::{Curriculum, CurriculumProvider},
        error::PlannerError,
        messages::Message,
        planner::StudyPlanner,
        session::Session,
        task::{NewTask, Priority, TaskType},
        view::{short_id, View},
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

type Planner<'a> = StudyPlanner<Tasks<'a>, Settings<'a>>;

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Add a task by hand
    Add {
        /// Subject id (physics, chemistry, biology)
        #[arg(short, long)]
        subject: String,
        /// Chapter id, e.g. p3
        #[arg(short, long)]
        chapter: String,
        #[arg(short, long, default_value = "today")]
        date: String,
        #[arg(short = 't', long = "type", value_enum, default_value = "theory")]
        task_type: TaskType,
        /// Hours; defaults to 2 for theory and 3 for practice
        #[arg(long)]
        hours: Option<i32>,
        #[arg(short, long, value_enum, default_value = "medium")]
        priority: Priority,
    },
    /// List tasks
    List {
        /// Only this day
        #[arg(short, long)]
        date: Option<String>,
        /// Only tasks not done yet
        #[arg(long)]
        pending: bool,
    },
    /// Flip a task between done and pending
    Toggle { id: String },
    /// Mark a task as done
    Done { id: String },
    /// Delete a task
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(args: TaskArgs) -> Result<()> {
    let session = Session::current()?;
    let mut planner = session.planner(Local::now().date_naive())?;

    match args.command {
        TaskCommand::Add {
            subject,
            chapter,
            date,
            task_type,
            hours,
            priority,
        } => handle_add(&mut planner, &subject, &chapter, &date, task_type, hours, priority),
        TaskCommand::List { date, pending } => handle_list(&planner, date.as_deref(), pending),
        TaskCommand::Toggle { id } => handle_toggle(&mut planner, &id),
        TaskCommand::Done { id } => {
            let id = find_task(&planner, &id)?;
            planner.set_task_completed(&id, true)?;
            msg_success!(Message::TaskCompleted(short_id(&id).to_string()));
            Ok(())
        }
        TaskCommand::Delete { id, yes } => handle_delete(&mut planner, &id, yes),
    }
}

fn find_task(planner: &Planner<'_>, id: &str) -> Result<String, PlannerError> {
    resolve_id(id, planner.tasks().iter().map(|t| t.id.as_str()), "task")
}

fn handle_add(
    planner: &mut Planner<'_>,
    subject: &str,
    chapter: &str,
    date: &str,
    task_type: TaskType,
    hours: Option<i32>,
    priority: Priority,
) -> Result<()> {
    let curriculum = Curriculum::neet();
    if curriculum.chapter_name(subject, chapter).is_none() {
        return Err(PlannerError::NotFound(format!("chapter '{}' in {}", chapter, subject)).into());
    }

    let mut task = NewTask::new(subject, chapter, parse_date(date)?, task_type).with_priority(priority);
    if let Some(hours) = hours {
        task = task.with_duration(hours);
    }

    let stored = planner.add_manual_task(task)?;
    msg_success!(Message::TaskCreated(short_id(&stored.id).to_string()));
    Ok(())
}

fn handle_list(planner: &Planner<'_>, date: Option<&str>, pending: bool) -> Result<()> {
    let date = date.map(parse_date).transpose()?;
    let tasks: Vec<_> = planner
        .tasks()
        .iter()
        .filter(|t| date.map_or(true, |d| t.date == d))
        .filter(|t| !pending || !t.is_completed)
        .cloned()
        .collect();

    if tasks.is_empty() {
        match date {
            Some(d) => msg_info!(Message::NoTasksForDate(d.to_string())),
            None => msg_info!(Message::NoTasks),
        }
        return Ok(());
    }

    let label = date.map(|d| d.to_string()).unwrap_or_else(|| "all".to_string());
    msg_print!(Message::TasksHeader(label), true);
    View::tasks(&tasks, &Curriculum::neet())
}

fn handle_toggle(planner: &mut Planner<'_>, id: &str) -> Result<()> {
    let id = find_task(planner, id)?;
    if planner.toggle_task(&id)? {
        msg_success!(Message::TaskCompleted(short_id(&id).to_string()));
    } else {
        msg_info!(Message::TaskReopened(short_id(&id).to_string()));
    }
    Ok(())
}

fn handle_delete(planner: &mut Planner<'_>, id: &str, yes: bool) -> Result<()> {
    let id = find_task(planner, id)?;

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(short_id(&id).to_string()).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    planner.delete_task(&id)?;
    msg_success!(Message::TaskDeleted(short_id(&id).to_string()));
    Ok(())
}
