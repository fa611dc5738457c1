//! Plain-text snapshot rendering for the status command.
//!
//! The textual stand-in for the view renderers: a pure function from a
//! draft snapshot to what the author sees.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;

use authoring::consts::REQUIRED_PUBLISH_FIELDS;
use authoring::draft::LessonForm;
use authoring::engine::{DraftSnapshot, View};
use authoring::publish::CourseGraph;

/// Render the draft snapshot as the status screen.
#[must_use]
pub fn render_status(snapshot: &DraftSnapshot) -> String {
    let mut out = String::new();
    let view = match snapshot.view {
        View::NamingCourse => "naming course",
        View::EditingCourseSetup => "course setup",
        View::EditingChapter => "chapter editor",
    };
    let _ = writeln!(out, "view: {view}");

    let Some(course) = snapshot.course.clone() else {
        let _ = writeln!(out, "no draft in progress; run `coursecraft new <name>`");
        return out;
    };

    let _ = writeln!(out, "course: {}", course.title);
    match course.description.as_deref() {
        Some(description) if !description.trim().is_empty() => {
            let _ = writeln!(out, "description: {description}");
        }
        _ => {
            let _ = writeln!(out, "description: (none)");
        }
    }
    match course.image.as_ref() {
        Some(image) => {
            let _ = writeln!(out, "image: {} ({} bytes)", image.name, image.size);
        }
        None => {
            let _ = writeln!(out, "image: (none)");
        }
    }

    let graph = CourseGraph {
        course,
        chapters: snapshot.chapters.clone(),
        attachments: snapshot.attachments.clone(),
    };
    let _ = writeln!(out, "gate: {}/{REQUIRED_PUBLISH_FIELDS}", graph.completed_fields());
    let missing = graph.missing_fields();
    if !missing.is_empty() {
        let _ = writeln!(out, "missing: {}", missing.join(", "));
    }

    let _ = writeln!(out, "chapters: {}", snapshot.chapters.len());
    for chapter in &snapshot.chapters {
        let marker = if snapshot.current_chapter == Some(chapter.id) { " *" } else { "" };
        let _ = writeln!(out, "  {}. {}{marker}", chapter.position, chapter.title);
    }

    let _ = writeln!(out, "attachments: {}", snapshot.attachments.len());
    for attachment in &snapshot.attachments {
        let _ = writeln!(out, "  - {} ({} bytes)", attachment.file.name, attachment.file.size);
    }
    out
}

/// Render the peripheral lesson form.
#[must_use]
pub fn render_lesson(form: &LessonForm) -> String {
    let mut out = String::new();
    let name = if form.lesson_name.is_empty() { "(unnamed)" } else { &form.lesson_name };
    let _ = writeln!(out, "lesson: {name}");
    if !form.description.is_empty() {
        let _ = writeln!(out, "description: {}", form.description);
    }
    let thumbnail =
        form.thumbnail.as_ref().map_or_else(|| "(none)".to_owned(), |f| f.name.clone());
    let video = form.video.as_ref().map_or_else(|| "(none)".to_owned(), |f| f.name.clone());
    let _ = writeln!(out, "thumbnail: {thumbnail}");
    let _ = writeln!(out, "video: {video}");
    out
}
