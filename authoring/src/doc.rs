//! Draft model: course entities, sparse updates, and the in-memory store.
//!
//! This module defines the data types that describe an in-progress course
//! (`Course`, `Chapter`, `Attachment`), sparse-update types for incremental
//! edits (`PartialCourse`, `PartialChapter`), and the runtime store that owns
//! the active draft (`DraftStore`).
//!
//! Data flows into this layer from the session store (snapshot restore) and
//! from the engine (mutations). Renderers read ordered copies via the
//! engine's snapshot, never live references, because the store replaces whole
//! sequences on every mutation.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;

/// A stored file: name, size, and an opaque content reference.
///
/// The core never inspects `data` beyond carrying it; hosts decide the
/// encoding (a data URL, base64 bytes, a path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// Original file name as supplied by the file source.
    pub name: String,
    /// File size in bytes as reported by the file source.
    pub size: u64,
    /// Opaque content reference.
    pub data: String,
}

/// The course being authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier, generated once at creation and never reassigned.
    pub id: EntityId,
    /// Course title as typed by the author.
    pub title: String,
    /// Optional long-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional cover image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<FileRef>,
}

/// A chapter within the active course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Unique identifier for this chapter.
    pub id: EntityId,
    /// The course this chapter belongs to.
    pub course_id: EntityId,
    /// Chapter title.
    pub title: String,
    /// Chapter body text.
    pub body: String,
    /// Zero-based position within the course; unique and dense at rest.
    pub position: usize,
}

/// A file attached to the active course. Append-only; never reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique identifier for this attachment.
    pub id: EntityId,
    /// The course this attachment belongs to.
    pub course_id: EntityId,
    /// The attached file.
    pub file: FileRef,
}

/// Sparse update for the active course. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialCourse {
    /// New title, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Sparse update for a chapter. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialChapter {
    /// New title, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New body text, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// In-memory store of the active draft.
///
/// Holds at most one course plus its child sequences. Chapter positions are
/// renumbered to a dense `0..N-1` range on every mutation path, and the
/// sequences are replaced wholesale rather than edited in place so a
/// renderer holding a previous copy never observes a partial update.
#[derive(Debug, Default)]
pub struct DraftStore {
    course: Option<Course>,
    chapters: Vec<Chapter>,
    attachments: Vec<Attachment>,
}

impl DraftStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active course, if one has been created.
    #[must_use]
    pub fn course(&self) -> Option<&Course> {
        self.course.as_ref()
    }

    /// Chapters in position order.
    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Attachments in insertion order.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Whether a course is active.
    #[must_use]
    pub fn has_course(&self) -> bool {
        self.course.is_some()
    }

    /// Create the active course. Returns false if one already exists; the
    /// original course id is never reassigned.
    pub fn create_course(&mut self, id: EntityId, title: String) -> bool {
        if self.course.is_some() {
            return false;
        }
        self.course = Some(Course { id, title, description: None, image: None });
        true
    }

    /// Apply a sparse update to the active course. Returns false if no
    /// course is active.
    pub fn apply_course_partial(&mut self, partial: &PartialCourse) -> bool {
        let Some(course) = self.course.as_mut() else {
            return false;
        };
        if let Some(ref title) = partial.title {
            course.title = title.clone();
        }
        if let Some(ref description) = partial.description {
            course.description = Some(description.clone());
        }
        true
    }

    /// Set the active course's cover image. Returns false if no course is
    /// active.
    pub fn set_image(&mut self, image: FileRef) -> bool {
        let Some(course) = self.course.as_mut() else {
            return false;
        };
        course.image = Some(image);
        true
    }

    /// Append a chapter at the end of the sequence, assigning it the next
    /// dense position. Returns the stored chapter, or `None` if no course is
    /// active.
    pub fn append_chapter(&mut self, id: EntityId, title: String, body: String) -> Option<Chapter> {
        let course_id = self.course.as_ref()?.id;
        let chapter = Chapter { id, course_id, title, body, position: self.chapters.len() };
        let mut next = self.chapters.clone();
        next.push(chapter.clone());
        self.chapters = next;
        Some(chapter)
    }

    /// Apply a sparse update to the chapter with the given id. Returns false
    /// if no such chapter exists.
    pub fn apply_chapter_partial(&mut self, id: &EntityId, partial: &PartialChapter) -> bool {
        if !self.chapters.iter().any(|c| c.id == *id) {
            return false;
        }
        let mut next = self.chapters.clone();
        for chapter in &mut next {
            if chapter.id == *id {
                if let Some(ref title) = partial.title {
                    chapter.title = title.clone();
                }
                if let Some(ref body) = partial.body {
                    chapter.body = body.clone();
                }
            }
        }
        self.chapters = next;
        true
    }

    /// Relocate the dragged chapter to the target's pre-move position,
    /// shifting the target and everything between toward the vacated slot,
    /// then renumber to a dense `0..N-1` sequence.
    ///
    /// Unknown ids and `dragged == target` are no-ops returning false.
    pub fn reorder_chapters(&mut self, dragged: &EntityId, target: &EntityId) -> bool {
        if dragged == target {
            return false;
        }
        let Some(from) = self.chapters.iter().position(|c| c.id == *dragged) else {
            return false;
        };
        let Some(to) = self.chapters.iter().position(|c| c.id == *target) else {
            return false;
        };
        let mut next = self.chapters.clone();
        let chapter = next.remove(from);
        next.insert(to, chapter);
        Self::renumber(&mut next);
        self.chapters = next;
        true
    }

    /// Append an attachment. Returns the stored attachment, or `None` if no
    /// course is active.
    pub fn append_attachment(&mut self, id: EntityId, file: FileRef) -> Option<Attachment> {
        let course_id = self.course.as_ref()?.id;
        let attachment = Attachment { id, course_id, file };
        let mut next = self.attachments.clone();
        next.push(attachment.clone());
        self.attachments = next;
        Some(attachment)
    }

    /// Replace the whole draft with restored contents.
    ///
    /// Children that cannot belong to the restored course are dropped: with
    /// no course, both sequences clear; chapters and attachments carrying a
    /// foreign `course_id` are discarded. Chapter positions are renumbered
    /// in the restored order so the dense invariant holds even for records
    /// written by an older build.
    pub fn load(&mut self, course: Option<Course>, chapters: Vec<Chapter>, attachments: Vec<Attachment>) {
        match course {
            None => {
                self.course = None;
                self.chapters = Vec::new();
                self.attachments = Vec::new();
            }
            Some(course) => {
                let id = course.id;
                let mut chapters: Vec<Chapter> =
                    chapters.into_iter().filter(|c| c.course_id == id).collect();
                Self::renumber(&mut chapters);
                self.chapters = chapters;
                self.attachments = attachments.into_iter().filter(|a| a.course_id == id).collect();
                self.course = Some(course);
            }
        }
    }

    /// Discard the draft entirely.
    pub fn clear(&mut self) {
        self.course = None;
        self.chapters = Vec::new();
        self.attachments = Vec::new();
    }

    fn renumber(chapters: &mut [Chapter]) {
        for (index, chapter) in chapters.iter_mut().enumerate() {
            chapter.position = index;
        }
    }
}
