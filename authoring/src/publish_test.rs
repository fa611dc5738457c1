use uuid::Uuid;

use super::*;
use crate::doc::FileRef;

fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn complete_graph() -> CourseGraph {
    let course = Course {
        id: id(1),
        title: "T".to_owned(),
        description: Some("D".to_owned()),
        image: Some(FileRef { name: "cover.png".to_owned(), size: 1, data: "x".to_owned() }),
    };
    let chapter = Chapter {
        id: id(10),
        course_id: id(1),
        title: "One".to_owned(),
        body: String::new(),
        position: 0,
    };
    CourseGraph { course, chapters: vec![chapter], attachments: Vec::new() }
}

/// Boundary double that honors the gate and records what it stored.
#[derive(Default)]
struct RecordingPublisher {
    published: Vec<CourseGraph>,
}

impl Publisher for RecordingPublisher {
    fn publish(&mut self, graph: &CourseGraph) -> Result<PublishReceipt, PublishError> {
        let missing = graph.missing_fields();
        if !missing.is_empty() {
            return Err(PublishError::Incomplete { missing });
        }
        self.published.push(graph.clone());
        Ok(PublishReceipt { course_id: graph.course.id, location: "memory".to_owned() })
    }
}

// =============================================================
// missing_fields / completed_fields
// =============================================================

#[test]
fn complete_graph_has_nothing_missing() {
    let graph = complete_graph();
    assert!(graph.missing_fields().is_empty());
    assert_eq!(graph.completed_fields(), 4);
}

#[test]
fn empty_course_is_missing_everything() {
    let mut graph = complete_graph();
    graph.course.title = String::new();
    graph.course.description = None;
    graph.course.image = None;
    graph.chapters.clear();
    assert_eq!(graph.missing_fields(), vec!["title", "description", "image", "chapters"]);
    assert_eq!(graph.completed_fields(), 0);
}

#[test]
fn whitespace_title_counts_as_missing() {
    let mut graph = complete_graph();
    graph.course.title = "   ".to_owned();
    assert_eq!(graph.missing_fields(), vec!["title"]);
}

#[test]
fn whitespace_description_counts_as_missing() {
    let mut graph = complete_graph();
    graph.course.description = Some(String::new());
    assert_eq!(graph.missing_fields(), vec!["description"]);
    assert_eq!(graph.completed_fields(), 3);
}

#[test]
fn attachments_are_not_part_of_the_gate() {
    let mut graph = complete_graph();
    graph.attachments.clear();
    assert!(graph.missing_fields().is_empty());
}

// =============================================================
// Publisher contract
// =============================================================

#[test]
fn publisher_stores_complete_graph() {
    let mut publisher = RecordingPublisher::default();
    let graph = complete_graph();
    let receipt = publisher.publish(&graph).unwrap();
    assert_eq!(receipt.course_id, graph.course.id);
    assert_eq!(publisher.published.len(), 1);
}

#[test]
fn publisher_rejects_incomplete_graph() {
    let mut publisher = RecordingPublisher::default();
    let mut graph = complete_graph();
    graph.course.image = None;
    let err = publisher.publish(&graph).unwrap_err();
    match err {
        PublishError::Incomplete { missing } => assert_eq!(missing, vec!["image"]),
        other => panic!("expected Incomplete, got {other:?}"),
    }
    assert!(publisher.published.is_empty());
}

#[test]
fn incomplete_error_names_missing_fields() {
    let err = PublishError::Incomplete { missing: vec!["image", "chapters"] };
    let message = err.to_string();
    assert!(message.contains("image"));
    assert!(message.contains("chapters"));
}

// =============================================================
// CourseGraph serde
// =============================================================

#[test]
fn graph_roundtrip() {
    let graph = complete_graph();
    let raw = serde_json::to_string(&graph).unwrap();
    let back: CourseGraph = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, graph);
}
