//! coursecraft: command-line host for the course authoring workflow.
//!
//! Each invocation is one user action: the session restores the mirrored
//! draft, feeds the action to the authoring engine, performs any file reads
//! the engine requested, mirrors the result, and prints the new snapshot.

mod cli;
mod lesson;
mod publish;
mod render;
mod session;
mod store;

use std::path::PathBuf;

use authoring::doc::{PartialChapter, PartialCourse};
use authoring::engine::Action;
use authoring::intent::{
    AddChapterRequest, SubmitCourseNameRequest, UpdateChapterRequest, UpdateCourseRequest,
};
use clap::Parser;

use crate::cli::{ChapterSubcommand, Cli, Command, LessonSubcommand};
use crate::lesson::LessonSession;
use crate::session::Session;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("no active course; run `coursecraft new <name>` first")]
    NoCourse,
    #[error("no chapter is open in the editor; run `coursecraft chapter add` first")]
    NoCurrentChapter,
    #[error("no chapter at position {0}")]
    NoSuchChapter(usize),
    #[error("cannot determine a session directory; pass --home or set COURSECRAFT_HOME")]
    NoHome,
    #[error("cannot read {path}: {source}")]
    FileRead { path: PathBuf, source: std::io::Error },
    #[error(transparent)]
    Draft(#[from] authoring::draft::DraftError),
    #[error(transparent)]
    Store(#[from] authoring::store::StoreError),
    #[error(transparent)]
    Publish(#[from] authoring::publish::PublishError),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        tracing::error!(%err, "command failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let home = session::resolve_home(cli.home)?;
    match cli.command {
        Command::Lesson(command) => run_lesson(&home, command.command).await,
        command => run_course(&home, command).await,
    }
}

async fn run_course(home: &std::path::Path, command: Command) -> Result<(), CliError> {
    let mut session = Session::open(home)?;
    match command {
        Command::New { name } => {
            let action = session.engine().submit_name(&SubmitCourseNameRequest { name });
            match action {
                Action::CourseCreated(course) => {
                    tracing::info!(id = %course.id, title = %course.title, "course created");
                }
                _ => {
                    tracing::warn!("a draft is already in progress; `discard` it to start over");
                }
            }
        }
        Command::Cancel => {
            session.engine().cancel_naming();
        }
        Command::Set { title, description } => {
            let request = UpdateCourseRequest { fields: PartialCourse { title, description } };
            if matches!(session.engine().update_course(&request), Action::None) {
                return Err(CliError::NoCourse);
            }
        }
        Command::Image { path } => {
            session.set_image(&path).await?;
        }
        Command::Chapter(command) => run_chapter(&mut session, command.command)?,
        Command::Attach { paths } => {
            let landed = session.attach_files(&paths).await?;
            tracing::info!(landed, "attach finished");
        }
        Command::Status => {}
        Command::Publish { out } => {
            let receipt = session.publish(&out)?;
            tracing::info!(course_id = %receipt.course_id, location = %receipt.location, "published");
        }
        Command::Discard => {
            session.discard()?;
            println!("draft discarded");
            return Ok(());
        }
        Command::Lesson(_) => unreachable!("handled above"),
    }

    session.mirror()?;
    print!("{}", render::render_status(&session.snapshot()));
    Ok(())
}

fn run_chapter(session: &mut Session, command: ChapterSubcommand) -> Result<(), CliError> {
    match command {
        ChapterSubcommand::Add { title } => {
            let action = session.engine().add_chapter(AddChapterRequest { title });
            match action {
                Action::ChapterAdded(chapter) => {
                    tracing::info!(id = %chapter.id, position = chapter.position, "chapter added");
                    Ok(())
                }
                _ => Err(CliError::NoCourse),
            }
        }
        ChapterSubcommand::Edit { title, body } => {
            let request = UpdateChapterRequest { fields: PartialChapter { title, body } };
            match session.engine().update_chapter(&request) {
                Action::ChapterUpdated { .. } => Ok(()),
                _ => Err(CliError::NoCurrentChapter),
            }
        }
        ChapterSubcommand::Save => {
            session.engine().save_chapter();
            Ok(())
        }
        ChapterSubcommand::Move { from, to } => session.move_chapter(from, to),
    }
}

async fn run_lesson(home: &std::path::Path, command: LessonSubcommand) -> Result<(), CliError> {
    let mut lesson = LessonSession::open(home)?;
    match command {
        LessonSubcommand::Set { name, description } => {
            lesson.set(name, description);
            lesson.mirror()?;
        }
        LessonSubcommand::Thumbnail { path } => {
            lesson.set_thumbnail(&path).await?;
            lesson.mirror()?;
        }
        LessonSubcommand::Video { path } => {
            lesson.set_video(&path).await?;
            lesson.mirror()?;
        }
        LessonSubcommand::Show => {}
        LessonSubcommand::Save => {
            let saved = lesson.save()?;
            tracing::info!(lesson = %saved.lesson_name, "lesson saved");
            println!("lesson saved");
            return Ok(());
        }
    }
    print!("{}", render::render_lesson(lesson.form()));
    Ok(())
}
