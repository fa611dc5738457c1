//! Session wiring: the engine, its mirrored draft, and file-read plumbing.
//!
//! A `Session` spans one CLI invocation. Opening it restores the draft from
//! the file store and hydrates the engine; every mutation is followed by a
//! mirror back to the store, so the next invocation resumes where this one
//! left off. File reads run through tokio and complete in arbitrary order;
//! results are fed back keyed by their originating request, so arrival order
//! never decides which value wins.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::path::{Path, PathBuf};

use authoring::draft;
use authoring::engine::{Action, AuthoringEngine, DraftSnapshot};
use authoring::intent::{AttachFileRequest, FileHandle, FilePayload, ReorderChaptersRequest};
use authoring::publish::{CourseGraph, PublishError, PublishReceipt, Publisher};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures::future::join_all;

use crate::CliError;
use crate::publish::DirPublisher;
use crate::store::FileStore;

/// Resolve the session directory from the flag, or fall back to the
/// platform data directory.
pub fn resolve_home(flag: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(home) = flag {
        return Ok(home);
    }
    dirs::data_dir()
        .map(|dir| dir.join("coursecraft"))
        .or_else(|| dirs::home_dir().map(|dir| dir.join(".coursecraft")))
        .ok_or(CliError::NoHome)
}

/// One authoring session: the engine plus its backing store.
pub struct Session {
    store: FileStore,
    engine: AuthoringEngine,
}

impl Session {
    /// Open the session rooted at `home`, restoring any mirrored draft.
    pub fn open(home: &Path) -> Result<Self, CliError> {
        let store = FileStore::open(home)?;
        let snapshot = draft::load_draft(&store)?;
        let mut engine = AuthoringEngine::default();
        engine.load_snapshot(snapshot);
        Ok(Self { store, engine })
    }

    /// The engine, for direct intent application.
    pub fn engine(&mut self) -> &mut AuthoringEngine {
        &mut self.engine
    }

    /// The current draft snapshot.
    #[must_use]
    pub fn snapshot(&self) -> DraftSnapshot {
        self.engine.snapshot()
    }

    /// Mirror the draft into the store so the next invocation resumes it.
    pub fn mirror(&mut self) -> Result<(), CliError> {
        draft::mirror_draft(&mut self.store, &self.engine.snapshot())?;
        Ok(())
    }

    /// Discard the draft and drop its mirrored record.
    pub fn discard(&mut self) -> Result<(), CliError> {
        self.engine.discard();
        draft::clear_draft(&mut self.store)?;
        Ok(())
    }

    /// Attach files to the active course. All reads run concurrently; a
    /// failed read is logged and skipped, never retried. Returns how many
    /// attachments landed.
    pub async fn attach_files(&mut self, paths: &[PathBuf]) -> Result<usize, CliError> {
        let mut requests = Vec::new();
        for path in paths {
            let handle = file_handle(path).await?;
            match self.engine.request_attachment(AttachFileRequest { file: handle }) {
                Action::FileReadRequested(request) => requests.push((request, path.clone())),
                _ => return Err(CliError::NoCourse),
            }
        }

        let reads = join_all(requests.into_iter().map(|(request, path)| async move {
            let bytes = tokio::fs::read(&path).await;
            (request, path, bytes)
        }))
        .await;

        let mut landed = 0;
        for (request, path, bytes) in reads {
            match bytes {
                Ok(bytes) => {
                    let payload = FilePayload { data: BASE64.encode(bytes) };
                    if let Action::AttachmentAdded(attachment) =
                        self.engine.apply_file_loaded(&request, payload)
                    {
                        tracing::info!(name = %attachment.file.name, "attachment added");
                        landed += 1;
                    }
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "attachment read failed; skipped");
                }
            }
        }
        Ok(landed)
    }

    /// Pick a new cover image for the active course.
    pub async fn set_image(&mut self, path: &Path) -> Result<(), CliError> {
        let handle = file_handle(path).await?;
        let Action::FileReadRequested(request) =
            self.engine.request_image(AttachFileRequest { file: handle })
        else {
            return Err(CliError::NoCourse);
        };
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| CliError::FileRead { path: path.to_path_buf(), source })?;
        let payload = FilePayload { data: BASE64.encode(bytes) };
        self.engine.apply_file_loaded(&request, payload);
        Ok(())
    }

    /// Drag the chapter at `from` onto the chapter at `to`, by position.
    pub fn move_chapter(&mut self, from: usize, to: usize) -> Result<(), CliError> {
        let snapshot = self.engine.snapshot();
        let dragged = snapshot.chapters.get(from).ok_or(CliError::NoSuchChapter(from))?.id;
        let target = snapshot.chapters.get(to).ok_or(CliError::NoSuchChapter(to))?.id;
        self.engine.reorder_chapters(&ReorderChaptersRequest { dragged, target });
        Ok(())
    }

    /// Publish the finished course into `out`.
    ///
    /// A rejected publish reports which gate fields are still missing; the
    /// draft itself survives either way.
    pub fn publish(&mut self, out: &Path) -> Result<PublishReceipt, CliError> {
        match self.engine.publish() {
            Action::PublishRequested(graph) => Ok(DirPublisher::new(out).publish(&graph)?),
            _ => {
                let snapshot = self.engine.snapshot();
                let Some(course) = snapshot.course else {
                    return Err(CliError::NoCourse);
                };
                let graph = CourseGraph {
                    course,
                    chapters: snapshot.chapters,
                    attachments: snapshot.attachments,
                };
                Err(PublishError::Incomplete { missing: graph.missing_fields() }.into())
            }
        }
    }
}

/// Build a [`FileHandle`] for a path from its metadata.
async fn file_handle(path: &Path) -> Result<FileHandle, CliError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|source| CliError::FileRead { path: path.to_path_buf(), source })?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    Ok(FileHandle { name, size: metadata.len() })
}
