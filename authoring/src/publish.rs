//! Publish boundary: the finished course graph and the persistence seam.
//!
//! The engine emits a [`CourseGraph`] once the completeness gate holds; the
//! host hands it to an injected [`Publisher`] that durably stores it. The
//! core performs no I/O itself and only reports the collaborator's outcome.

#[cfg(test)]
#[path = "publish_test.rs"]
mod publish_test;

use serde::{Deserialize, Serialize};

use crate::consts::REQUIRED_PUBLISH_FIELDS;
use crate::doc::{Attachment, Chapter, Course};
use crate::ids::EntityId;

/// The complete publishable value: the course plus its ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseGraph {
    /// The course being published.
    pub course: Course,
    /// Chapters in position order.
    pub chapters: Vec<Chapter>,
    /// Attachments in insertion order.
    pub attachments: Vec<Attachment>,
}

impl CourseGraph {
    /// Names of the gate fields still missing, in gate order.
    ///
    /// Empty exactly when the graph is publishable.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.course.title.trim().is_empty() {
            missing.push("title");
        }
        if self.course.description.as_ref().is_none_or(|d| d.trim().is_empty()) {
            missing.push("description");
        }
        if self.course.image.is_none() {
            missing.push("image");
        }
        if self.chapters.is_empty() {
            missing.push("chapters");
        }
        missing
    }

    /// Number of gate fields currently complete, out of
    /// [`REQUIRED_PUBLISH_FIELDS`].
    #[must_use]
    pub fn completed_fields(&self) -> usize {
        REQUIRED_PUBLISH_FIELDS - self.missing_fields().len()
    }
}

/// Proof of a successful publish, reported back to the author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    /// Id of the published course.
    pub course_id: EntityId,
    /// Where the collaborator stored the graph, in its own terms.
    pub location: String,
}

/// Errors surfaced by the publish boundary.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The completeness gate does not hold.
    #[error("course is not publishable; missing: {}", missing.join(", "))]
    Incomplete {
        /// Gate fields still missing.
        missing: Vec<&'static str>,
    },
    /// The storage collaborator failed.
    #[error("publish backend failed: {0}")]
    Backend(String),
}

/// Durable storage for a finished course graph.
pub trait Publisher {
    /// Store the graph, returning a receipt naming where it landed.
    ///
    /// Implementations must re-check the gate and return
    /// [`PublishError::Incomplete`] for an incomplete graph, even though the
    /// engine refuses to emit one; the boundary enforces the invariant, not
    /// just the button.
    fn publish(&mut self, graph: &CourseGraph) -> Result<PublishReceipt, PublishError>;
}
