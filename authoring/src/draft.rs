//! Draft persistence: tolerant serialize/restore for the session store.
//!
//! Two records live here. The course draft is the engine's full
//! [`DraftSnapshot`], mirrored under [`consts::DRAFT_KEY`] after every
//! mutation so in-progress edits survive a reload. The lesson form is the
//! peripheral `{lesson_name, description, thumbnail, video}` record under
//! [`consts::LESSON_KEY`], cleared on save.
//!
//! Restore never fails: an absent or malformed record degrades to the
//! default value, and a malformed file payload inside an otherwise readable
//! lesson record degrades to the no-file state. The store contract is
//! last-write-wins with no schema versioning, so leniency here is the only
//! defense a reader has.

#[cfg(test)]
#[path = "draft_test.rs"]
mod draft_test;

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts;
use crate::doc::FileRef;
use crate::engine::DraftSnapshot;
use crate::store::{SessionStore, StoreError};

/// Errors surfaced by the persistence helpers. Restore paths never produce
/// one; only encoding and the store itself can fail.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    /// The record could not be encoded.
    #[error("draft encode failed: {0}")]
    Encode(#[from] serde_json::Error),
    /// The session store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The peripheral lesson-configuration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonForm {
    /// Lesson name as typed.
    #[serde(default)]
    pub lesson_name: String,
    /// Lesson description as typed.
    #[serde(default)]
    pub description: String,
    /// Thumbnail file, if one was picked.
    #[serde(default, deserialize_with = "lenient_file_ref")]
    pub thumbnail: Option<FileRef>,
    /// Video file, if one was picked.
    #[serde(default, deserialize_with = "lenient_file_ref")]
    pub video: Option<FileRef>,
}

/// Deserialize a stored file reference, degrading to "no file" when the
/// stored value has the wrong shape.
fn lenient_file_ref<'de, D>(deserializer: D) -> Result<Option<FileRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

// ── Course draft ────────────────────────────────────────────────

/// Encode a draft snapshot for the session store.
pub fn serialize_draft(snapshot: &DraftSnapshot) -> Result<String, DraftError> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Decode a stored draft record. `None` or malformed input restores the
/// default empty draft.
#[must_use]
pub fn restore_draft(raw: Option<&str>) -> DraftSnapshot {
    raw.and_then(|raw| serde_json::from_str(raw).ok()).unwrap_or_default()
}

/// Read the mirrored draft out of the store.
pub fn load_draft(store: &dyn SessionStore) -> Result<DraftSnapshot, DraftError> {
    let raw = store.get(consts::DRAFT_KEY)?;
    Ok(restore_draft(raw.as_deref()))
}

/// Mirror the draft into the store, replacing any previous record.
pub fn mirror_draft(store: &mut dyn SessionStore, snapshot: &DraftSnapshot) -> Result<(), DraftError> {
    let raw = serialize_draft(snapshot)?;
    store.put(consts::DRAFT_KEY, &raw)?;
    Ok(())
}

/// Drop the mirrored draft.
pub fn clear_draft(store: &mut dyn SessionStore) -> Result<(), DraftError> {
    store.remove(consts::DRAFT_KEY)?;
    Ok(())
}

// ── Lesson form ─────────────────────────────────────────────────

/// Encode the lesson form for the session store.
pub fn serialize_lesson(form: &LessonForm) -> Result<String, DraftError> {
    Ok(serde_json::to_string(form)?)
}

/// Decode a stored lesson record. `None` or malformed input restores the
/// default empty form.
#[must_use]
pub fn restore_lesson(raw: Option<&str>) -> LessonForm {
    raw.and_then(|raw| serde_json::from_str(raw).ok()).unwrap_or_default()
}

/// Read the mirrored lesson form out of the store.
pub fn load_lesson(store: &dyn SessionStore) -> Result<LessonForm, DraftError> {
    let raw = store.get(consts::LESSON_KEY)?;
    Ok(restore_lesson(raw.as_deref()))
}

/// Mirror the lesson form into the store, replacing any previous record.
pub fn mirror_lesson(store: &mut dyn SessionStore, form: &LessonForm) -> Result<(), DraftError> {
    let raw = serialize_lesson(form)?;
    store.put(consts::LESSON_KEY, &raw)?;
    Ok(())
}

/// Drop the mirrored lesson form; called after a successful save.
pub fn clear_lesson(store: &mut dyn SessionStore) -> Result<(), DraftError> {
    store.remove(consts::LESSON_KEY)?;
    Ok(())
}
