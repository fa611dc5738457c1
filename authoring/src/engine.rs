//! The course authoring state machine.
//!
//! `AuthoringEngine` owns the draft store, the active editing view, and the
//! chapter currently being edited. Every mutating operation is total: when
//! its guard fails (no active course, no current chapter, unknown id) it is
//! a silent no-op returning [`Action::None`], never an error, so a stray
//! event can never crash the session. Publication is gated on the four
//! completeness fields and enforced on the operation itself, not only at the
//! button.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CHAPTER_TITLE, REQUIRED_PUBLISH_FIELDS};
use crate::doc::{Attachment, Chapter, Course, DraftStore, FileRef, PartialChapter};
use crate::ids::{EntityId, IdProvider, RequestId, UuidIds};
use crate::intent::{
    AddChapterRequest, AttachFileRequest, FilePayload, FileRequest, FileSlot, Intent,
    ReorderChaptersRequest, SubmitCourseNameRequest, UpdateChapterRequest, UpdateCourseRequest,
};
use crate::publish::CourseGraph;

/// The editing view currently on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// The name dialog; no course exists yet.
    #[default]
    NamingCourse,
    /// The course setup panel.
    EditingCourseSetup,
    /// The chapter editor for the current chapter.
    EditingChapter,
}

/// Actions returned from engine operations for the host to process.
#[derive(Debug, Clone)]
pub enum Action {
    /// Nothing happened; the operation's guard failed or it was a no-op.
    None,
    /// A course was created from the naming dialog.
    CourseCreated(Course),
    /// The active course's fields changed.
    CourseUpdated(Course),
    /// A chapter was appended and is now being edited.
    ChapterAdded(Chapter),
    /// The current chapter's fields changed.
    ChapterUpdated { id: EntityId, fields: PartialChapter },
    /// The chapter sequence was reordered; ids in new position order.
    ChaptersReordered { order: Vec<EntityId> },
    /// An attachment landed after its read completed.
    AttachmentAdded(Attachment),
    /// The engine needs the host to read a file and feed the result back
    /// through [`AuthoringEngine::apply_file_loaded`].
    FileReadRequested(FileRequest),
    /// The gate holds and the graph is ready for the persistence boundary.
    PublishRequested(CourseGraph),
    /// The view changed with no data mutation.
    RenderNeeded,
}

/// A copy-on-write view of the whole session for renderers and the session
/// store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    /// The active view.
    #[serde(default)]
    pub view: View,
    /// The active course, if any.
    #[serde(default)]
    pub course: Option<Course>,
    /// Chapters in position order.
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    /// Attachments in insertion order.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// The chapter open in the editor, if any.
    #[serde(default)]
    pub current_chapter: Option<EntityId>,
}

/// The authoring state machine.
pub struct AuthoringEngine {
    draft: DraftStore,
    view: View,
    current_chapter: Option<EntityId>,
    pending_image: Option<RequestId>,
    ids: Box<dyn IdProvider>,
}

impl Default for AuthoringEngine {
    fn default() -> Self {
        Self::new(Box::new(UuidIds))
    }
}

impl AuthoringEngine {
    /// Create an engine drawing fresh ids from the given provider.
    #[must_use]
    pub fn new(ids: Box<dyn IdProvider>) -> Self {
        Self {
            draft: DraftStore::new(),
            view: View::NamingCourse,
            current_chapter: None,
            pending_image: None,
            ids,
        }
    }

    // --- Intent routing ---

    /// Apply one intent, dispatching to the matching operation.
    pub fn apply(&mut self, intent: Intent) -> Action {
        match intent {
            Intent::SubmitCourseName(req) => self.submit_name(&req),
            Intent::CancelNaming => self.cancel_naming(),
            Intent::UpdateCourse(req) => self.update_course(&req),
            Intent::AddChapter(req) => self.add_chapter(req),
            Intent::UpdateChapter(req) => self.update_chapter(&req),
            Intent::SaveChapter => self.save_chapter(),
            Intent::ReorderChapters(req) => self.reorder_chapters(&req),
            Intent::AttachFile(req) => self.request_attachment(req),
            Intent::SetImage(req) => self.request_image(req),
            Intent::Publish => self.publish(),
            Intent::Discard => self.discard(),
        }
    }

    // --- Transitions ---

    /// Submit the course name: create the course and enter the setup panel.
    ///
    /// Only valid from [`View::NamingCourse`]; the name is accepted as-is.
    pub fn submit_name(&mut self, req: &SubmitCourseNameRequest) -> Action {
        if self.view != View::NamingCourse {
            return Action::None;
        }
        let id = self.ids.next_entity_id();
        if !self.draft.create_course(id, req.name.clone()) {
            return Action::None;
        }
        self.view = View::EditingCourseSetup;
        match self.draft.course() {
            Some(course) => Action::CourseCreated(course.clone()),
            None => Action::None,
        }
    }

    /// Dismiss the naming dialog. Stays on the dialog; nothing is created.
    pub fn cancel_naming(&mut self) -> Action {
        Action::None
    }

    /// Append a chapter at the next position and open it in the editor.
    pub fn add_chapter(&mut self, req: AddChapterRequest) -> Action {
        let title = req.title.unwrap_or_else(|| DEFAULT_CHAPTER_TITLE.to_owned());
        let id = self.ids.next_entity_id();
        let Some(chapter) = self.draft.append_chapter(id, title, String::new()) else {
            return Action::None;
        };
        self.current_chapter = Some(chapter.id);
        self.view = View::EditingChapter;
        Action::ChapterAdded(chapter)
    }

    /// Leave the chapter editor. Edits were merged as they arrived, so this
    /// only changes the view.
    pub fn save_chapter(&mut self) -> Action {
        if self.view != View::EditingChapter {
            return Action::None;
        }
        self.view = View::EditingCourseSetup;
        self.current_chapter = None;
        Action::RenderNeeded
    }

    /// Discard the draft and return to the naming dialog.
    pub fn discard(&mut self) -> Action {
        self.draft.clear();
        self.view = View::NamingCourse;
        self.current_chapter = None;
        self.pending_image = None;
        Action::RenderNeeded
    }

    // --- Mutations ---

    /// Merge fields into the active course. Silent no-op without one.
    pub fn update_course(&mut self, req: &UpdateCourseRequest) -> Action {
        if !self.draft.apply_course_partial(&req.fields) {
            return Action::None;
        }
        match self.draft.course() {
            Some(course) => Action::CourseUpdated(course.clone()),
            None => Action::None,
        }
    }

    /// Merge fields into the chapter currently being edited. Silent no-op
    /// without a current chapter.
    pub fn update_chapter(&mut self, req: &UpdateChapterRequest) -> Action {
        let Some(id) = self.current_chapter else {
            return Action::None;
        };
        if !self.draft.apply_chapter_partial(&id, &req.fields) {
            return Action::None;
        }
        Action::ChapterUpdated { id, fields: req.fields.clone() }
    }

    /// Drop one chapter onto another; positions renumber densely.
    pub fn reorder_chapters(&mut self, req: &ReorderChaptersRequest) -> Action {
        if !self.draft.reorder_chapters(&req.dragged, &req.target) {
            return Action::None;
        }
        Action::ChaptersReordered { order: self.draft.chapters().iter().map(|c| c.id).collect() }
    }

    // --- File reads ---

    /// Ask the host to read a file for attachment. Silent no-op without an
    /// active course.
    pub fn request_attachment(&mut self, req: AttachFileRequest) -> Action {
        if !self.draft.has_course() {
            return Action::None;
        }
        let request =
            FileRequest { id: self.ids.next_request_id(), slot: FileSlot::Attachment, file: req.file };
        Action::FileReadRequested(request)
    }

    /// Ask the host to read a new cover image. Issuing a newer request
    /// invalidates any still-pending older one for the slot.
    pub fn request_image(&mut self, req: AttachFileRequest) -> Action {
        if !self.draft.has_course() {
            return Action::None;
        }
        let request =
            FileRequest { id: self.ids.next_request_id(), slot: FileSlot::CourseImage, file: req.file };
        self.pending_image = Some(request.id);
        Action::FileReadRequested(request)
    }

    /// Feed a completed file read back in, keyed by its originating request.
    ///
    /// Attachment completions append in whatever order they arrive. The
    /// cover-image slot holds a single value, so only the latest pending
    /// request id lands; a stale completion is dropped.
    pub fn apply_file_loaded(&mut self, request: &FileRequest, payload: FilePayload) -> Action {
        if !self.draft.has_course() {
            return Action::None;
        }
        let file =
            FileRef { name: request.file.name.clone(), size: request.file.size, data: payload.data };
        match request.slot {
            FileSlot::Attachment => {
                let id = self.ids.next_entity_id();
                match self.draft.append_attachment(id, file) {
                    Some(attachment) => Action::AttachmentAdded(attachment),
                    None => Action::None,
                }
            }
            FileSlot::CourseImage => {
                if self.pending_image != Some(request.id) {
                    return Action::None;
                }
                self.pending_image = None;
                if !self.draft.set_image(file) {
                    return Action::None;
                }
                match self.draft.course() {
                    Some(course) => Action::CourseUpdated(course.clone()),
                    None => Action::None,
                }
            }
            // Lesson slots belong to the peripheral form, not the engine.
            FileSlot::LessonThumbnail | FileSlot::LessonVideo => Action::None,
        }
    }

    // --- Publish ---

    /// Publish the finished course.
    ///
    /// Rejected (no action fires) unless all four gate fields hold. On
    /// success the chapter editor closes back to the setup panel; publishing
    /// never ends the session.
    pub fn publish(&mut self) -> Action {
        let Some(graph) = self.graph() else {
            return Action::None;
        };
        if !graph.missing_fields().is_empty() {
            return Action::None;
        }
        if self.view == View::EditingChapter {
            self.view = View::EditingCourseSetup;
            self.current_chapter = None;
        }
        Action::PublishRequested(graph)
    }

    // --- Queries ---

    /// Number of gate fields currently complete, out of
    /// [`REQUIRED_PUBLISH_FIELDS`].
    #[must_use]
    pub fn completed_fields(&self) -> usize {
        self.graph().map_or(0, |g| g.completed_fields())
    }

    /// Whether [`publish`](Self::publish) would currently be accepted.
    #[must_use]
    pub fn publishable(&self) -> bool {
        self.completed_fields() == REQUIRED_PUBLISH_FIELDS
    }

    /// The active view.
    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// The chapter open in the editor, if any.
    #[must_use]
    pub fn current_chapter(&self) -> Option<EntityId> {
        self.current_chapter
    }

    /// A copy-on-write view of the whole session.
    #[must_use]
    pub fn snapshot(&self) -> DraftSnapshot {
        DraftSnapshot {
            view: self.view,
            course: self.draft.course().cloned(),
            chapters: self.draft.chapters().to_vec(),
            attachments: self.draft.attachments().to_vec(),
            current_chapter: self.current_chapter,
        }
    }

    /// Hydrate the engine from a restored snapshot.
    ///
    /// Inconsistent records degrade instead of failing: a snapshot with no
    /// course falls back to the naming dialog, and a chapter-editor view
    /// whose current chapter is gone falls back to the setup panel.
    pub fn load_snapshot(&mut self, snapshot: DraftSnapshot) {
        self.draft.load(snapshot.course, snapshot.chapters, snapshot.attachments);
        self.pending_image = None;
        if !self.draft.has_course() {
            self.view = View::NamingCourse;
            self.current_chapter = None;
            return;
        }
        let current = snapshot
            .current_chapter
            .filter(|id| self.draft.chapters().iter().any(|c| c.id == *id));
        match snapshot.view {
            View::NamingCourse => {
                // A course exists, so the dialog is behind us.
                self.view = View::EditingCourseSetup;
                self.current_chapter = None;
            }
            View::EditingCourseSetup => {
                self.view = View::EditingCourseSetup;
                self.current_chapter = None;
            }
            View::EditingChapter => match current {
                Some(id) => {
                    self.view = View::EditingChapter;
                    self.current_chapter = Some(id);
                }
                None => {
                    self.view = View::EditingCourseSetup;
                    self.current_chapter = None;
                }
            },
        }
    }

    fn graph(&self) -> Option<CourseGraph> {
        let course = self.draft.course()?.clone();
        Some(CourseGraph {
            course,
            chapters: self.draft.chapters().to_vec(),
            attachments: self.draft.attachments().to_vec(),
        })
    }
}
