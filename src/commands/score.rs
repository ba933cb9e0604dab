use super::{parse_date, resolve_id};
use crate::{
    db::scores::Scores,
    libs::{
        analytics::TestAnalytics,
        curriculum::{Curriculum, CurriculumProvider},
        error::PlannerError,
        messages::Message,
        score::{SubjectScore, TestKind},
        session::Session,
        view::{short_id, View},
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ScoreArgs {
    #[command(subcommand)]
    command: ScoreCommand,
}

#[derive(Debug, Subcommand)]
enum ScoreCommand {
    /// Record a test
    Add {
        #[arg(short, long, value_enum, default_value = "full")]
        kind: TestKind,
        #[arg(short, long, default_value = "today")]
        date: String,
        /// Subject result as subject=score/total; repeat per subject
        #[arg(short, long = "subject", required = true)]
        subjects: Vec<String>,
        /// Chapter result as subject:chapter=score/total; repeatable
        #[arg(long = "chapter")]
        chapters: Vec<String>,
        #[arg(short, long)]
        remarks: Option<String>,
    },
    /// List recorded tests, newest first
    List,
    /// Delete a test
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Averages, trends and weak chapters
    Analytics {
        /// Limit chapter detail to one subject
        #[arg(short, long)]
        subject: Option<String>,
    },
}

pub async fn cmd(args: ScoreArgs) -> Result<()> {
    let session = Session::current()?;
    let mut scores = Scores::new(&session.db.conn);

    match args.command {
        ScoreCommand::Add {
            kind,
            date,
            subjects,
            chapters,
            remarks,
        } => {
            let breakdown = parse_breakdown(&subjects, &chapters)?;
            let test = scores.insert(parse_date(&date)?, kind, breakdown, remarks.filter(|r| !r.trim().is_empty()))?;
            msg_success!(Message::ScoreAdded(short_id(&test.id).to_string(), test.percentage().unwrap_or(0.0)));
            Ok(())
        }
        ScoreCommand::List => {
            let tests = scores.fetch()?;
            if tests.is_empty() {
                msg_info!(Message::NoScores);
                return Ok(());
            }
            msg_print!(Message::ScoresHeader, true);
            View::scores(&tests)
        }
        ScoreCommand::Delete { id, yes } => {
            let tests = scores.fetch()?;
            let id = resolve_id(&id, tests.iter().map(|t| t.id.as_str()), "test")?;
            if !yes {
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteScore(short_id(&id).to_string()).to_string())
                    .default(false)
                    .interact()?;
                if !confirmed {
                    msg_info!(Message::OperationCancelled);
                    return Ok(());
                }
            }
            scores.delete(&id)?;
            msg_success!(Message::ScoreDeleted(short_id(&id).to_string()));
            Ok(())
        }
        ScoreCommand::Analytics { subject } => handle_analytics(&scores, subject.as_deref()),
    }
}

/// Builds subject scores from `subject=score/total` items and attaches `subject:chapter=score/total` items.
pub fn parse_breakdown(subjects: &[String], chapters: &[String]) -> Result<Vec<SubjectScore>, PlannerError> {
    let curriculum = Curriculum::neet();
    let mut breakdown = Vec::new();

    for item in subjects {
        let score = SubjectScore::parse(item)?;
        if curriculum.subject(&score.subject_id).is_none() {
            return Err(PlannerError::NotFound(format!("subject '{}'", score.subject_id)));
        }
        if breakdown.iter().any(|s: &SubjectScore| s.subject_id == score.subject_id) {
            return Err(PlannerError::validation(format!("subject '{}' given more than once", score.subject_id)));
        }
        breakdown.push(score);
    }

    for item in chapters {
        let (subject_id, rest) = item
            .split_once(':')
            .ok_or_else(|| PlannerError::validation(format!("expected subject:chapter=score/total, got '{}'", item)))?;
        let chapter = SubjectScore::parse(rest)?;
        if curriculum.chapter_name(subject_id, &chapter.subject_id).is_none() {
            return Err(PlannerError::NotFound(format!("chapter '{}' in {}", chapter.subject_id, subject_id)));
        }
        let parent = breakdown
            .iter_mut()
            .find(|s| s.subject_id == subject_id)
            .ok_or_else(|| PlannerError::validation(format!("no --subject result given for '{}'", subject_id)))?;
        if parent.chapter_scores.iter().any(|c| c.chapter_id == chapter.subject_id) {
            return Err(PlannerError::validation(format!(
                "chapter '{}' in {} given more than once",
                chapter.subject_id, subject_id
            )));
        }
        parent.chapter_scores.push(crate::libs::score::ChapterScore {
            chapter_id: chapter.subject_id,
            score: chapter.score,
            total_marks: chapter.total_marks,
        });
    }

    Ok(breakdown)
}

fn handle_analytics(scores: &Scores<'_>, subject: Option<&str>) -> Result<()> {
    let tests = scores.fetch()?;
    if tests.is_empty() {
        msg_info!(Message::NoScores);
        return Ok(());
    }

    let curriculum = Curriculum::neet();
    let analytics = TestAnalytics::compute(&curriculum, &tests);
    let overview = analytics.overview(&tests);

    msg_print!(Message::OverviewLine(
        overview.tests,
        overview.average,
        overview.trend.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string())
    ));
    if let Some((subject_id, average)) = &overview.best_subject {
        let name = curriculum.subject(subject_id).map(|s| s.name.clone()).unwrap_or_else(|| subject_id.clone());
        msg_print!(Message::BestSubject(name, *average));
    }

    for performance in analytics
        .subjects
        .iter()
        .filter(|p| subject.map_or(true, |s| p.subject_id == s))
    {
        let name = curriculum
            .subject(&performance.subject_id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| performance.subject_id.clone());
        msg_print!(Message::AnalyticsHeader(name), true);
        msg_print!(format!(
            "Average {:.1}% over {} test(s), trend {}",
            performance.average, performance.attempts, performance.trend
        ));

        let names = |ids: &[String]| {
            ids.iter()
                .map(|id| curriculum.chapter_name(&performance.subject_id, id).unwrap_or(id).to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        if !performance.weak_chapters.is_empty() {
            msg_print!(Message::WeakChapters(names(&performance.weak_chapters)));
        }
        if !performance.strong_chapters.is_empty() {
            msg_print!(Message::StrongChapters(names(&performance.strong_chapters)));
        }
        if performance.chapters.iter().any(|c| c.attempts > 0) {
            View::chapter_performance(performance, &curriculum)?;
        }
    }

    msg_print!(format!("Overall average {:.1}%", analytics.overall_average), true);
    Ok(())
}
