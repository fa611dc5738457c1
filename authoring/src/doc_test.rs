use uuid::Uuid;

use super::*;

fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn file(name: &str) -> FileRef {
    FileRef { name: name.to_owned(), size: 3, data: "abc".to_owned() }
}

fn store_with_course() -> DraftStore {
    let mut store = DraftStore::new();
    assert!(store.create_course(id(1), "Course".to_owned()));
    store
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_store_is_empty() {
    let store = DraftStore::new();
    assert!(store.course().is_none());
    assert!(!store.has_course());
    assert!(store.chapters().is_empty());
    assert!(store.attachments().is_empty());
}

// =============================================================
// create_course
// =============================================================

#[test]
fn create_course_sets_active_course() {
    let store = store_with_course();
    let course = store.course().unwrap();
    assert_eq!(course.id, id(1));
    assert_eq!(course.title, "Course");
    assert!(course.description.is_none());
    assert!(course.image.is_none());
}

#[test]
fn create_course_twice_keeps_original() {
    let mut store = store_with_course();
    assert!(!store.create_course(id(2), "Other".to_owned()));
    let course = store.course().unwrap();
    assert_eq!(course.id, id(1));
    assert_eq!(course.title, "Course");
}

// =============================================================
// apply_course_partial
// =============================================================

#[test]
fn course_partial_without_course_is_noop() {
    let mut store = DraftStore::new();
    let partial = PartialCourse { title: Some("T".to_owned()), ..Default::default() };
    assert!(!store.apply_course_partial(&partial));
    assert!(store.course().is_none());
}

#[test]
fn course_partial_merges_title() {
    let mut store = store_with_course();
    let partial = PartialCourse { title: Some("Renamed".to_owned()), ..Default::default() };
    assert!(store.apply_course_partial(&partial));
    assert_eq!(store.course().unwrap().title, "Renamed");
}

#[test]
fn course_partial_merges_description() {
    let mut store = store_with_course();
    let partial = PartialCourse { description: Some("About".to_owned()), ..Default::default() };
    assert!(store.apply_course_partial(&partial));
    let course = store.course().unwrap();
    assert_eq!(course.description.as_deref(), Some("About"));
    assert_eq!(course.title, "Course"); // untouched
}

#[test]
fn course_partial_empty_leaves_course_unchanged() {
    let mut store = store_with_course();
    let before = store.course().unwrap().clone();
    assert!(store.apply_course_partial(&PartialCourse::default()));
    assert_eq!(store.course().unwrap(), &before);
}

// =============================================================
// set_image
// =============================================================

#[test]
fn set_image_without_course_is_noop() {
    let mut store = DraftStore::new();
    assert!(!store.set_image(file("cover.png")));
}

#[test]
fn set_image_replaces_previous() {
    let mut store = store_with_course();
    assert!(store.set_image(file("a.png")));
    assert!(store.set_image(file("b.png")));
    assert_eq!(store.course().unwrap().image.as_ref().unwrap().name, "b.png");
}

// =============================================================
// append_chapter
// =============================================================

#[test]
fn append_chapter_without_course_returns_none() {
    let mut store = DraftStore::new();
    assert!(store.append_chapter(id(10), "One".to_owned(), String::new()).is_none());
    assert!(store.chapters().is_empty());
}

#[test]
fn append_chapter_assigns_next_position() {
    let mut store = store_with_course();
    let first = store.append_chapter(id(10), "One".to_owned(), String::new()).unwrap();
    let second = store.append_chapter(id(11), "Two".to_owned(), String::new()).unwrap();
    assert_eq!(first.position, 0);
    assert_eq!(second.position, 1);
    assert_eq!(first.course_id, id(1));
    assert_eq!(second.course_id, id(1));
}

#[test]
fn append_chapter_positions_are_dense_in_insertion_order() {
    let mut store = store_with_course();
    for n in 0..5 {
        store.append_chapter(id(10 + n), format!("Chapter {n}"), String::new());
    }
    let positions: Vec<usize> = store.chapters().iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3, 4]);
}

// =============================================================
// apply_chapter_partial
// =============================================================

#[test]
fn chapter_partial_unknown_id_is_noop() {
    let mut store = store_with_course();
    store.append_chapter(id(10), "One".to_owned(), String::new());
    let partial = PartialChapter { title: Some("X".to_owned()), ..Default::default() };
    assert!(!store.apply_chapter_partial(&id(99), &partial));
    assert_eq!(store.chapters()[0].title, "One");
}

#[test]
fn chapter_partial_merges_title_and_body() {
    let mut store = store_with_course();
    store.append_chapter(id(10), "One".to_owned(), String::new());
    let partial =
        PartialChapter { title: Some("Renamed".to_owned()), body: Some("Text".to_owned()) };
    assert!(store.apply_chapter_partial(&id(10), &partial));
    let chapter = &store.chapters()[0];
    assert_eq!(chapter.title, "Renamed");
    assert_eq!(chapter.body, "Text");
    assert_eq!(chapter.position, 0); // untouched
}

#[test]
fn chapter_partial_touches_only_matching_entry() {
    let mut store = store_with_course();
    store.append_chapter(id(10), "One".to_owned(), String::new());
    store.append_chapter(id(11), "Two".to_owned(), String::new());
    let partial = PartialChapter { body: Some("Text".to_owned()), ..Default::default() };
    assert!(store.apply_chapter_partial(&id(11), &partial));
    assert_eq!(store.chapters()[0].body, "");
    assert_eq!(store.chapters()[1].body, "Text");
}

// =============================================================
// reorder_chapters
// =============================================================

fn store_with_chapters(count: u128) -> DraftStore {
    let mut store = store_with_course();
    for n in 0..count {
        store.append_chapter(id(10 + n), format!("Chapter {n}"), String::new());
    }
    store
}

#[test]
fn reorder_drags_later_chapter_to_front() {
    // Drag the chapter at position 2 onto the chapter at position 0: it
    // lands at 0, and the former 0 and 1 shift to 1 and 2.
    let mut store = store_with_chapters(3);
    assert!(store.reorder_chapters(&id(12), &id(10)));
    let order: Vec<Uuid> = store.chapters().iter().map(|c| c.id).collect();
    assert_eq!(order, vec![id(12), id(10), id(11)]);
    let positions: Vec<usize> = store.chapters().iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);
}

#[test]
fn reorder_drags_front_chapter_to_back() {
    let mut store = store_with_chapters(3);
    assert!(store.reorder_chapters(&id(10), &id(12)));
    let order: Vec<Uuid> = store.chapters().iter().map(|c| c.id).collect();
    assert_eq!(order, vec![id(11), id(12), id(10)]);
    assert_eq!(store.chapters()[2].position, 2);
}

#[test]
fn reorder_between_neighbors() {
    let mut store = store_with_chapters(4);
    assert!(store.reorder_chapters(&id(11), &id(12)));
    let order: Vec<Uuid> = store.chapters().iter().map(|c| c.id).collect();
    assert_eq!(order, vec![id(10), id(12), id(11), id(13)]);
}

#[test]
fn reorder_same_id_is_noop() {
    let mut store = store_with_chapters(3);
    assert!(!store.reorder_chapters(&id(11), &id(11)));
    let order: Vec<Uuid> = store.chapters().iter().map(|c| c.id).collect();
    assert_eq!(order, vec![id(10), id(11), id(12)]);
}

#[test]
fn reorder_unknown_dragged_is_noop() {
    let mut store = store_with_chapters(3);
    assert!(!store.reorder_chapters(&id(99), &id(10)));
}

#[test]
fn reorder_unknown_target_is_noop() {
    let mut store = store_with_chapters(3);
    assert!(!store.reorder_chapters(&id(10), &id(99)));
}

#[test]
fn repeated_reorders_keep_positions_dense_and_unique() {
    let mut store = store_with_chapters(5);
    let moves = [(10, 14), (13, 10), (12, 12), (14, 11), (10, 13)];
    for (dragged, target) in moves {
        store.reorder_chapters(&id(dragged), &id(target));
        let mut positions: Vec<usize> = store.chapters().iter().map(|c| c.position).collect();
        positions.sort_unstable();
        assert_eq!(positions, vec![0, 1, 2, 3, 4]);
        // Stored order always matches the position field.
        for (index, chapter) in store.chapters().iter().enumerate() {
            assert_eq!(chapter.position, index);
        }
    }
}

// =============================================================
// append_attachment
// =============================================================

#[test]
fn append_attachment_without_course_returns_none() {
    let mut store = DraftStore::new();
    assert!(store.append_attachment(id(20), file("notes.pdf")).is_none());
}

#[test]
fn append_attachment_keeps_insertion_order() {
    let mut store = store_with_course();
    store.append_attachment(id(20), file("a.pdf"));
    store.append_attachment(id(21), file("b.pdf"));
    let names: Vec<&str> =
        store.attachments().iter().map(|a| a.file.name.as_str()).collect();
    assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    assert!(store.attachments().iter().all(|a| a.course_id == id(1)));
}

// =============================================================
// load
// =============================================================

#[test]
fn load_without_course_clears_children() {
    let mut store = store_with_chapters(2);
    store.append_attachment(id(20), file("a.pdf"));
    let chapters = store.chapters().to_vec();
    let attachments = store.attachments().to_vec();
    store.load(None, chapters, attachments);
    assert!(store.course().is_none());
    assert!(store.chapters().is_empty());
    assert!(store.attachments().is_empty());
}

#[test]
fn load_drops_children_of_another_course() {
    let mut donor = store_with_chapters(2);
    donor.append_attachment(id(20), file("a.pdf"));
    let foreign_chapters = donor.chapters().to_vec();
    let foreign_attachments = donor.attachments().to_vec();

    let mut store = DraftStore::new();
    let course = Course { id: id(2), title: "Other".to_owned(), description: None, image: None };
    store.load(Some(course), foreign_chapters, foreign_attachments);
    assert!(store.has_course());
    assert!(store.chapters().is_empty());
    assert!(store.attachments().is_empty());
}

#[test]
fn load_renumbers_sparse_positions() {
    let course = Course { id: id(1), title: "Course".to_owned(), description: None, image: None };
    let chapters = vec![
        Chapter { id: id(10), course_id: id(1), title: "A".to_owned(), body: String::new(), position: 3 },
        Chapter { id: id(11), course_id: id(1), title: "B".to_owned(), body: String::new(), position: 7 },
    ];
    let mut store = DraftStore::new();
    store.load(Some(course), chapters, Vec::new());
    let positions: Vec<usize> = store.chapters().iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![0, 1]);
}

// =============================================================
// clear
// =============================================================

#[test]
fn clear_discards_everything() {
    let mut store = store_with_chapters(2);
    store.append_attachment(id(20), file("a.pdf"));
    store.clear();
    assert!(store.course().is_none());
    assert!(store.chapters().is_empty());
    assert!(store.attachments().is_empty());
}

// =============================================================
// Entity serde
// =============================================================

#[test]
fn course_serde_roundtrip() {
    let course = Course {
        id: id(1),
        title: "Course".to_owned(),
        description: Some("About".to_owned()),
        image: Some(file("cover.png")),
    };
    let raw = serde_json::to_string(&course).unwrap();
    let back: Course = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, course);
}

#[test]
fn course_skips_absent_optional_fields() {
    let course = Course { id: id(1), title: "Course".to_owned(), description: None, image: None };
    let raw = serde_json::to_string(&course).unwrap();
    assert!(!raw.contains("description"));
    assert!(!raw.contains("image"));
}

#[test]
fn chapter_serde_roundtrip() {
    let chapter = Chapter {
        id: id(10),
        course_id: id(1),
        title: "One".to_owned(),
        body: "Text".to_owned(),
        position: 2,
    };
    let raw = serde_json::to_string(&chapter).unwrap();
    let back: Chapter = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, chapter);
}

#[test]
fn partial_course_default_serializes_empty() {
    let raw = serde_json::to_string(&PartialCourse::default()).unwrap();
    assert_eq!(raw, "{}");
}

#[test]
fn partial_chapter_skips_absent_fields() {
    let partial = PartialChapter { title: Some("X".to_owned()), ..Default::default() };
    let raw = serde_json::to_string(&partial).unwrap();
    assert!(raw.contains("title"));
    assert!(!raw.contains("body"));
}
