use super::announce_achievements;
use crate::{
    db::progress::Progress,
    libs::{
        checklist::{Activity, Checklist},
        curriculum::CurriculumProvider,
        error::PlannerError,
        messages::Message,
        session::Session,
        view::View,
    },
    msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ChapterArgs {
    #[command(subcommand)]
    command: ChapterCommand,
}

#[derive(Debug, Subcommand)]
enum ChapterCommand {
    /// Show the checklist for one subject, or all of them
    List {
        #[arg(short, long)]
        subject: Option<String>,
    },
    /// Flip one activity of a chapter
    Toggle {
        subject: String,
        chapter: String,
        #[arg(value_enum)]
        activity: Activity,
    },
    /// Count a revision of a completed chapter
    Revise { subject: String, chapter: String },
    /// Show syllabus completion per subject
    Progress,
}

pub async fn cmd(args: ChapterArgs) -> Result<()> {
    let session = Session::current()?;
    let mut checklist = session.checklist()?;

    match args.command {
        ChapterCommand::List { subject } => handle_list(&checklist, subject.as_deref()),
        ChapterCommand::Toggle {
            subject,
            chapter,
            activity,
        } => {
            let row = checklist.toggle(&subject, &chapter, activity)?;
            Progress::new(&session.db.conn).save(&row)?;

            let done = activity.is_done_in(&row);
            msg_success!(Message::ActivityMarked(chapter_label(&checklist, &subject, &chapter), activity.to_string(), done));
            announce_achievements(&session)
        }
        ChapterCommand::Revise { subject, chapter } => {
            let row = checklist.increment_revision(&subject, &chapter)?;
            Progress::new(&session.db.conn).save(&row)?;

            msg_success!(Message::ChapterRevised(chapter_label(&checklist, &subject, &chapter), row.revision_count));
            Ok(())
        }
        ChapterCommand::Progress => handle_progress(&checklist),
    }
}

fn chapter_label(checklist: &Checklist, subject: &str, chapter: &str) -> String {
    checklist
        .curriculum()
        .chapter_name(subject, chapter)
        .unwrap_or(chapter)
        .to_string()
}

fn handle_list(checklist: &Checklist, subject: Option<&str>) -> Result<()> {
    let curriculum = checklist.curriculum();
    let subjects: Vec<_> = match subject {
        Some(id) => vec![curriculum
            .subject(id)
            .ok_or_else(|| PlannerError::NotFound(format!("subject '{}'", id)))?],
        None => curriculum.subjects().iter().collect(),
    };

    for subject in subjects {
        msg_print!(Message::ChecklistHeader(subject.name.clone()), true);
        View::checklist(subject)?;
    }
    Ok(())
}

fn handle_progress(checklist: &Checklist) -> Result<()> {
    let per_activity: Vec<Vec<(&str, f64)>> = Activity::ALL.iter().map(|a| checklist.activity_progress(*a)).collect();

    let rows: Vec<_> = checklist
        .curriculum()
        .subjects()
        .iter()
        .enumerate()
        .map(|(i, subject)| {
            let shares = [per_activity[0][i].1, per_activity[1][i].1, per_activity[2][i].1];
            (subject, Checklist::subject_progress(subject), shares)
        })
        .collect();

    msg_print!(Message::ProgressHeader, true);
    View::progress(&rows)?;
    msg_print!(Message::TotalProgress(
        checklist.total_progress(),
        checklist.completed_chapters(),
        checklist.curriculum().total_chapters()
    ));
    Ok(())
}
