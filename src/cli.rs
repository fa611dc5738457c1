//! Command-line surface.
//!
//! One subcommand per user action; each invocation restores the draft from
//! the session store, applies the action, and mirrors the result back, so a
//! session survives across invocations the way an in-progress form survives
//! a page reload.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "coursecraft", about = "Course authoring workbench")]
pub struct Cli {
    /// Session directory. Defaults to the platform data directory.
    #[arg(long, env = "COURSECRAFT_HOME", global = true)]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a new course draft with the given name.
    New {
        /// Course name; accepted as-is.
        name: String,
    },
    /// Dismiss the naming step without creating a course.
    Cancel,
    /// Update fields of the active course.
    Set {
        /// New course title.
        #[arg(long)]
        title: Option<String>,
        /// New course description.
        #[arg(long)]
        description: Option<String>,
    },
    /// Pick a cover image for the active course.
    Image {
        /// Path to the image file.
        path: PathBuf,
    },
    /// Work on chapters.
    Chapter(ChapterCommand),
    /// Attach one or more files to the active course.
    Attach {
        /// Paths to attach; all reads run concurrently.
        #[arg(num_args = 1..)]
        paths: Vec<PathBuf>,
    },
    /// Show the draft and its publish-gate progress.
    Status,
    /// Publish the finished course.
    Publish {
        /// Directory the published graph is written into.
        #[arg(long, default_value = "published")]
        out: PathBuf,
    },
    /// Discard the draft and return to the naming step.
    Discard,
    /// Work on the peripheral lesson form.
    Lesson(LessonCommand),
}

#[derive(Args, Debug)]
pub struct ChapterCommand {
    #[command(subcommand)]
    pub command: ChapterSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ChapterSubcommand {
    /// Append a chapter and open it in the editor.
    Add {
        /// Initial chapter title.
        title: Option<String>,
    },
    /// Edit the chapter currently open in the editor.
    Edit {
        /// New chapter title.
        #[arg(long)]
        title: Option<String>,
        /// New chapter body text.
        #[arg(long)]
        body: Option<String>,
    },
    /// Close the chapter editor, keeping its edits.
    Save,
    /// Drag the chapter at one position onto another.
    Move {
        /// Position of the chapter being dragged.
        from: usize,
        /// Position it is dropped onto.
        to: usize,
    },
}

#[derive(Args, Debug)]
pub struct LessonCommand {
    #[command(subcommand)]
    pub command: LessonSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum LessonSubcommand {
    /// Update lesson form fields.
    Set {
        /// Lesson name.
        #[arg(long)]
        name: Option<String>,
        /// Lesson description.
        #[arg(long)]
        description: Option<String>,
    },
    /// Pick the lesson thumbnail.
    Thumbnail {
        /// Path to the thumbnail file.
        path: PathBuf,
    },
    /// Pick the lesson video.
    Video {
        /// Path to the video file.
        path: PathBuf,
    },
    /// Show the in-progress lesson form.
    Show,
    /// Save the lesson and clear the mirrored form.
    Save,
}
