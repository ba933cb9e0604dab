use super::{announce_achievements, resolve_id};
use crate::{
    db::mistakes::Mistakes,
    libs::{
        curriculum::{Curriculum, CurriculumProvider},
        error::PlannerError,
        messages::Message,
        mistake::{MistakeUpdate, NewMistake},
        session::Session,
        task::Priority,
        view::{short_id, View},
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct MistakeArgs {
    #[command(subcommand)]
    command: MistakeCommand,
}

#[derive(Debug, Subcommand)]
enum MistakeCommand {
    /// Log a mistake against a chapter
    Add {
        #[arg(short, long)]
        subject: String,
        #[arg(short, long)]
        chapter: String,
        /// What went wrong
        content: String,
        /// How to get it right next time
        #[arg(long)]
        solution: Option<String>,
        #[arg(short, long, value_enum, default_value = "medium")]
        priority: Priority,
    },
    /// List mistakes, newest first
    List {
        #[arg(short, long)]
        subject: Option<String>,
        /// Requires --subject
        #[arg(short, long, requires = "subject")]
        chapter: Option<String>,
        /// Hide resolved mistakes
        #[arg(long)]
        open: bool,
    },
    /// Change content, solution or priority
    Edit {
        id: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        solution: Option<String>,
        #[arg(short, long, value_enum)]
        priority: Option<Priority>,
    },
    /// Flip between resolved and open
    Resolve { id: String },
    /// Count a revision of a mistake
    Revise { id: String },
    /// Delete a mistake
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(args: MistakeArgs) -> Result<()> {
    let session = Session::current()?;
    let mut mistakes = Mistakes::new(&session.db.conn);

    match args.command {
        MistakeCommand::Add {
            subject,
            chapter,
            content,
            solution,
            priority,
        } => {
            if Curriculum::neet().chapter_name(&subject, &chapter).is_none() {
                return Err(PlannerError::NotFound(format!("chapter '{}' in {}", chapter, subject)).into());
            }
            let mistake = NewMistake::new(&subject, &chapter, &content)
                .with_solution(solution)
                .with_priority(priority);
            let stored = mistakes.add(&mistake)?;
            msg_success!(Message::MistakeAdded(short_id(&stored.id).to_string()));
            Ok(())
        }
        MistakeCommand::List { subject, chapter, open } => {
            let mut list = match (&subject, &chapter) {
                (Some(s), Some(c)) => mistakes.list(s, c)?,
                (s, _) => mistakes.list_all(s.as_deref())?,
            };
            if open {
                list.retain(|m| !m.is_resolved);
            }
            if list.is_empty() {
                msg_info!(Message::NoMistakes);
                return Ok(());
            }
            msg_print!(Message::MistakesHeader, true);
            View::mistakes(&list)
        }
        MistakeCommand::Edit {
            id,
            content,
            solution,
            priority,
        } => {
            let update = MistakeUpdate {
                content,
                solution,
                priority,
            };
            if update.is_empty() {
                msg_info!(Message::NothingToUpdate);
                return Ok(());
            }
            let id = find_mistake(&mistakes, &id)?;
            mistakes.update(&id, &update)?;
            msg_success!(Message::MistakeUpdated(short_id(&id).to_string()));
            Ok(())
        }
        MistakeCommand::Resolve { id } => {
            let id = find_mistake(&mistakes, &id)?;
            let resolved = mistakes.toggle_resolved(&id)?;
            msg_success!(Message::MistakeResolved(short_id(&id).to_string(), resolved));
            announce_achievements(&session)
        }
        MistakeCommand::Revise { id } => {
            let id = find_mistake(&mistakes, &id)?;
            let mistake = mistakes.mark_revised(&id)?;
            msg_success!(Message::MistakeRevised(short_id(&id).to_string(), mistake.revision_count));
            Ok(())
        }
        MistakeCommand::Delete { id, yes } => {
            let id = find_mistake(&mistakes, &id)?;
            if !yes {
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteMistake(short_id(&id).to_string()).to_string())
                    .default(false)
                    .interact()?;
                if !confirmed {
                    msg_info!(Message::OperationCancelled);
                    return Ok(());
                }
            }
            mistakes.delete(&id)?;
            msg_success!(Message::MistakeDeleted(short_id(&id).to_string()));
            Ok(())
        }
    }
}

fn find_mistake(mistakes: &Mistakes<'_>, id: &str) -> Result<String, PlannerError> {
    let all = mistakes.list_all(None)?;
    resolve_id(id, all.iter().map(|m| m.id.as_str()), "mistake")
}
