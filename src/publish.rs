//! Directory-backed publisher.
//!
//! The durable side of the persistence boundary: writes the finished course
//! graph as pretty-printed JSON into a target directory. Re-checks the gate
//! before writing; the boundary enforces completeness even though the engine
//! already refuses to emit an incomplete graph.

#[cfg(test)]
#[path = "publish_test.rs"]
mod publish_test;

use std::fs;
use std::path::{Path, PathBuf};

use authoring::publish::{CourseGraph, PublishError, PublishReceipt, Publisher};

/// File name the published graph is written under.
pub const GRAPH_FILE: &str = "course.json";

/// Publisher writing one `course.json` per publish into a directory.
#[derive(Debug, Clone)]
pub struct DirPublisher {
    dir: PathBuf,
}

impl DirPublisher {
    /// Create a publisher targeting `dir`. The directory is created on the
    /// first publish.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }
}

impl Publisher for DirPublisher {
    fn publish(&mut self, graph: &CourseGraph) -> Result<PublishReceipt, PublishError> {
        let missing = graph.missing_fields();
        if !missing.is_empty() {
            return Err(PublishError::Incomplete { missing });
        }
        let raw = serde_json::to_string_pretty(graph)
            .map_err(|err| PublishError::Backend(err.to_string()))?;
        fs::create_dir_all(&self.dir).map_err(|err| PublishError::Backend(err.to_string()))?;
        let path = self.dir.join(GRAPH_FILE);
        fs::write(&path, raw).map_err(|err| PublishError::Backend(err.to_string()))?;
        Ok(PublishReceipt { course_id: graph.course.id, location: path.display().to_string() })
    }
}
