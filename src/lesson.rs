//! The peripheral lesson-configuration form.
//!
//! A flat `{lesson_name, description, thumbnail, video}` record mirrored
//! under its own store key so in-progress edits survive between invocations.
//! Saving logs the finished form and clears the mirror; a malformed mirror
//! restores to defaults inside [`authoring::draft`].

#[cfg(test)]
#[path = "lesson_test.rs"]
mod lesson_test;

use std::path::Path;

use authoring::doc::FileRef;
use authoring::draft::{self, LessonForm};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::CliError;
use crate::store::FileStore;

/// One lesson-form editing session.
pub struct LessonSession {
    store: FileStore,
    form: LessonForm,
}

impl LessonSession {
    /// Open the form mirrored under `home`, restoring any previous edits.
    pub fn open(home: &Path) -> Result<Self, CliError> {
        let store = FileStore::open(home)?;
        let form = draft::load_lesson(&store)?;
        Ok(Self { store, form })
    }

    /// The current form contents.
    #[must_use]
    pub fn form(&self) -> &LessonForm {
        &self.form
    }

    /// Merge the given fields into the form.
    pub fn set(&mut self, name: Option<String>, description: Option<String>) {
        if let Some(name) = name {
            self.form.lesson_name = name;
        }
        if let Some(description) = description {
            self.form.description = description;
        }
    }

    /// Read a file into the thumbnail slot.
    pub async fn set_thumbnail(&mut self, path: &Path) -> Result<(), CliError> {
        self.form.thumbnail = Some(read_file_ref(path).await?);
        Ok(())
    }

    /// Read a file into the video slot.
    pub async fn set_video(&mut self, path: &Path) -> Result<(), CliError> {
        self.form.video = Some(read_file_ref(path).await?);
        Ok(())
    }

    /// Mirror the form so the next invocation resumes it.
    pub fn mirror(&mut self) -> Result<(), CliError> {
        draft::mirror_lesson(&mut self.store, &self.form)?;
        Ok(())
    }

    /// Save the lesson and clear the mirrored form.
    pub fn save(&mut self) -> Result<LessonForm, CliError> {
        let saved = std::mem::take(&mut self.form);
        draft::clear_lesson(&mut self.store)?;
        Ok(saved)
    }
}

async fn read_file_ref(path: &Path) -> Result<FileRef, CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CliError::FileRead { path: path.to_path_buf(), source })?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    #[allow(clippy::cast_possible_truncation)]
    let size = bytes.len() as u64;
    Ok(FileRef { name, size, data: BASE64.encode(bytes) })
}
