//! Shared constants for the authoring crate.

// ── Publish gate ────────────────────────────────────────────────

/// Number of fields that must be complete before a course can publish:
/// title, description, image, and at least one chapter.
pub const REQUIRED_PUBLISH_FIELDS: usize = 4;

// ── Defaults ────────────────────────────────────────────────────

/// Title given to a chapter created before the author has typed one.
pub const DEFAULT_CHAPTER_TITLE: &str = "Untitled chapter";

// ── Session store keys ──────────────────────────────────────────

/// Key under which the course draft snapshot is mirrored.
pub const DRAFT_KEY: &str = "coursecraft.draft";

/// Key under which the peripheral lesson form is mirrored.
pub const LESSON_KEY: &str = "coursecraft.lesson";
