//! Intent model: typed view-to-core requests and file-read plumbing.
//!
//! This module defines the types consumed by the authoring engine. Each
//! user-visible action arrives as an explicit request struct validated at the
//! boundary rather than a shape-free bag of fields. `FileRequest` carries the
//! key that ties an asynchronous file read back to the slot it was issued
//! for, so completion order never decides which value wins.

#[cfg(test)]
#[path = "intent_test.rs"]
mod intent_test;

use serde::{Deserialize, Serialize};

use crate::doc::{PartialChapter, PartialCourse};
use crate::ids::{EntityId, RequestId};

/// A file handle supplied by the host's file source.
///
/// The core only ever sees the name and byte size; content stays behind the
/// host until a read completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    /// File name as reported by the file source.
    pub name: String,
    /// File size in bytes.
    pub size: u64,
}

/// Destination slot for a completed file read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileSlot {
    /// The active course's cover image. Single-value; latest request wins.
    CourseImage,
    /// The lesson form's thumbnail. Single-value; latest request wins.
    LessonThumbnail,
    /// The lesson form's video. Single-value; latest request wins.
    LessonVideo,
    /// A course attachment. Append-only; every completion lands.
    Attachment,
}

impl FileSlot {
    /// Whether this slot holds a single value that a newer request replaces.
    #[must_use]
    pub fn is_single(self) -> bool {
        !matches!(self, Self::Attachment)
    }
}

/// An issued file read, keyed by a fresh request id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRequest {
    /// Fresh id tying the eventual completion back to this request.
    pub id: RequestId,
    /// Slot the result should land in.
    pub slot: FileSlot,
    /// The file to read.
    pub file: FileHandle,
}

/// The content produced by a completed file read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePayload {
    /// Opaque content reference (a data URL, base64 bytes, a path).
    pub data: String,
}

/// Submit the course name from the naming dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitCourseNameRequest {
    /// The name as typed; accepted as-is.
    pub name: String,
}

/// Merge fields into the active course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    /// Fields to merge; absent fields are untouched.
    pub fields: PartialCourse,
}

/// Append a chapter and start editing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddChapterRequest {
    /// Initial title; defaults to [`crate::consts::DEFAULT_CHAPTER_TITLE`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Merge fields into the chapter currently being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateChapterRequest {
    /// Fields to merge; absent fields are untouched.
    pub fields: PartialChapter,
}

/// Drop one chapter onto another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderChaptersRequest {
    /// The chapter being dragged.
    pub dragged: EntityId,
    /// The chapter it was dropped onto.
    pub target: EntityId,
}

/// Attach a file to the active course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachFileRequest {
    /// The file picked or dropped by the author.
    pub file: FileHandle,
}

/// One user action, routed to the engine as a single value.
///
/// Hosts that prefer per-operation methods can call the engine directly;
/// `Intent` exists so an event loop can forward everything through one seam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Intent {
    /// Submit the course name from the naming dialog.
    SubmitCourseName(SubmitCourseNameRequest),
    /// Dismiss the naming dialog without creating a course.
    CancelNaming,
    /// Merge fields into the active course.
    UpdateCourse(UpdateCourseRequest),
    /// Append a chapter and start editing it.
    AddChapter(AddChapterRequest),
    /// Merge fields into the chapter being edited.
    UpdateChapter(UpdateChapterRequest),
    /// Leave the chapter editor, keeping its edits.
    SaveChapter,
    /// Drop one chapter onto another.
    ReorderChapters(ReorderChaptersRequest),
    /// Attach a file to the active course.
    AttachFile(AttachFileRequest),
    /// Pick a new cover image for the active course.
    SetImage(AttachFileRequest),
    /// Publish the finished course.
    Publish,
    /// Discard the draft and return to the naming dialog.
    Discard,
}
