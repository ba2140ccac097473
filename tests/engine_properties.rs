//! DocumentEngine 端到端测试

use novel_editor::application::{ApplicationError, DocumentEngine, EditorSettings, TextSourcePort};
use novel_editor::domain::manuscript::{ChapterId, ChapterStatus, ManuscriptError};
use novel_editor::infrastructure::adapters::FileTextSource;
use novel_editor::infrastructure::events::EditorEvent;
use novel_editor::segment;

const MARKER: &str = "====SPLIT CHAPTER====";

fn engine() -> DocumentEngine {
    DocumentEngine::in_memory(EditorSettings::default())
}

fn normalized(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn editing_ids(engine: &DocumentEngine) -> Vec<String> {
    engine
        .manuscript()
        .unwrap()
        .chapters()
        .iter()
        .filter(|c| c.status() == ChapterStatus::Editing)
        .map(|c| c.id().to_string())
        .collect()
}

#[test]
fn segmented_chapters_cover_the_whole_text() {
    let text = "Chapter 1: Dawn\nThe sun rose.\n\nChapter 2: Noon\nIt was hot.\n\nChapter 3: Dusk\nThe end.\n";
    let chapters = segment(text, "book.txt");

    assert_eq!(chapters.len(), 3);
    let joined: Vec<&str> = chapters.iter().map(|c| c.content()).collect();
    assert_eq!(normalized(&joined.join("\n")), normalized(text));
}

#[test]
fn unmatched_text_becomes_single_chapter() {
    let engine = engine();
    let manuscript = engine
        .import_document("  Just some prose.\nNo headings here.  ", "draft.txt")
        .unwrap();

    assert_eq!(manuscript.chapter_count(), 1);
    let chapter = &manuscript.chapters()[0];
    assert_eq!(chapter.title(), "draft");
    assert_eq!(chapter.content(), "Just some prose.\nNo headings here.");
    assert_eq!(chapter.status(), ChapterStatus::Editing);
}

#[test]
fn export_then_resegment_keeps_chapter_count() {
    let engine = engine();
    engine
        .import_document("Chapter 1\nHello\n\nChapter 2\nWorld", "story.txt")
        .unwrap();

    let exported = engine.export_document().unwrap();
    assert_eq!(exported.content, "Chapter 1\nHello\n\n\nChapter 2\nWorld");
    assert_eq!(exported.filename, "story_edited.txt");

    let reimported = engine.import_document(exported.content, "story.txt").unwrap();
    assert_eq!(reimported.chapter_count(), 2);
    assert_eq!(reimported.chapters()[1].content(), "Chapter 2\nWorld");
}

#[test]
fn export_keeps_title_when_text_only_starts_with_it() {
    let engine = engine();
    engine
        .import_document("notes on the journey\nmore", "notes.txt")
        .unwrap();

    let exported = engine.export_document().unwrap();
    assert_eq!(exported.content, "notes\n\nnotes on the journey\nmore");
}

#[test]
fn splitting_the_same_chapter_twice_keeps_ids_unique() {
    let engine = engine();
    engine
        .import_document(
            "Chapter 1\nA\n====SPLIT CHAPTER====\nB\nChapter 2\nC",
            "book.txt",
        )
        .unwrap();
    let first = ChapterId::from("chapter-1");

    engine.split_chapter(&first).unwrap();
    engine
        .update_chapter_content(&first, "A1\n====SPLIT CHAPTER====\nA2")
        .unwrap();
    engine.split_chapter(&first).unwrap();

    let chapters = engine.list_chapters().unwrap();
    let mut ids: Vec<&str> = chapters.iter().map(|c| c.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(chapters.len(), 4);
    assert_eq!(ids.len(), 4);

    let removed = engine
        .delete_chapter(&ChapterId::from("chapter-1-3"))
        .unwrap()
        .removed;
    assert_eq!(removed.content(), "A2");
    assert!(engine
        .manuscript()
        .unwrap()
        .chapter(&ChapterId::from("chapter-1-2"))
        .is_some());
}

#[test]
fn split_example_orders_and_statuses() {
    let engine = engine();
    engine
        .import_document("AAA\n\n====SPLIT CHAPTER====\nBBB", "notes.txt")
        .unwrap();

    let response = engine.split_chapter(&ChapterId::from("chapter-1")).unwrap();

    assert!(response.is_split());
    let parts = &response.chapters;
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].content(), "AAA");
    assert_eq!(parts[0].status(), ChapterStatus::Editing);
    assert_eq!(parts[0].order(), 1.0);
    assert_eq!(parts[1].content(), "BBB");
    assert_eq!(parts[1].status(), ChapterStatus::Pending);
    assert_eq!(parts[1].order(), 1.0 + 0.1);
    assert_eq!(parts[1].title(), "notes - 2");
    assert_eq!(editing_ids(&engine), vec!["chapter-1"]);
}

#[test]
fn split_then_merge_reconstructs_content() {
    let engine = engine();
    let original = "Chapter 1\nA\n====SPLIT CHAPTER====\nB\n====SPLIT CHAPTER====\nC\nChapter 2\nD";
    engine.import_document(original, "book.txt").unwrap();
    let first = ChapterId::from("chapter-1");
    let before = engine.manuscript().unwrap().chapter(&first).unwrap().content().to_string();

    let response = engine.split_chapter(&first).unwrap();
    assert_eq!(response.chapters.len(), 3);
    assert_eq!(engine.manuscript().unwrap().chapter_count(), 4);

    engine.merge_with_next(&first).unwrap();
    let merged = engine.merge_with_next(&first).unwrap().merged.unwrap();

    assert_eq!(merged.id(), &first);
    assert_eq!(
        normalized(merged.content()),
        normalized(&before.replace(MARKER, ""))
    );
    assert_eq!(engine.manuscript().unwrap().chapter_count(), 2);
}

#[test]
fn split_without_marker_is_noop() {
    let engine = engine();
    let before = engine.import_document("Chapter 1\nA\nChapter 2\nB", "book.txt").unwrap();

    let response = engine.split_chapter(&ChapterId::from("chapter-2")).unwrap();

    assert!(!response.is_split());
    assert_eq!(response.chapters.len(), 1);
    assert_eq!(engine.manuscript().unwrap().chapters(), before.chapters());
}

#[test]
fn deleting_last_chapter_is_refused_with_notice() {
    let engine = engine();
    engine.import_document("Only text", "one.txt").unwrap();
    let mut events = engine.subscribe();

    let result = engine.delete_chapter(&ChapterId::from("chapter-1"));

    assert!(matches!(
        result,
        Err(ApplicationError::Manuscript(ManuscriptError::LastChapter))
    ));
    assert_eq!(engine.manuscript().unwrap().chapter_count(), 1);
    assert!(engine.current_notice().is_some());
    assert!(matches!(events.try_recv().unwrap(), EditorEvent::Notice { .. }));
}

#[test]
fn select_leaves_exactly_one_editing_chapter() {
    let engine = engine();
    engine
        .import_document("Chapter 1\nA\nChapter 2\nB\nChapter 3\nC", "book.txt")
        .unwrap();
    engine
        .set_chapter_status(&ChapterId::from("chapter-3"), ChapterStatus::Completed)
        .unwrap();

    for id in ["chapter-2", "chapter-3", "chapter-1", "chapter-2"] {
        engine.select_chapter(&ChapterId::from(id)).unwrap();
        assert_eq!(editing_ids(&engine), vec![id]);
    }

    let current = engine.current_chapter().unwrap();
    assert_eq!(current.id().as_str(), "chapter-2");
    assert!(engine.can_merge_current_with_next());
}

#[test]
fn unknown_chapter_leaves_state_unchanged() {
    let engine = engine();
    let before = engine.import_document("Chapter 1\nA\nChapter 2\nB", "book.txt").unwrap();
    let missing = ChapterId::from("chapter-9");

    assert!(matches!(
        engine.select_chapter(&missing),
        Err(ApplicationError::Manuscript(ManuscriptError::ChapterNotFound(_)))
    ));
    assert!(engine.merge_with_next(&missing).is_err());
    assert!(engine.delete_chapter(&missing).is_err());
    assert!(engine.update_chapter_content(&missing, "x").is_err());

    let after = engine.manuscript().unwrap();
    assert_eq!(after.chapters(), before.chapters());
    assert_eq!(after.last_modified(), before.last_modified());
}

#[test]
fn operations_without_manuscript_fail() {
    let engine = engine();

    assert!(matches!(
        engine.select_chapter(&ChapterId::from("chapter-1")),
        Err(ApplicationError::NoManuscript)
    ));
    assert!(matches!(engine.export_document(), Err(ApplicationError::NoManuscript)));
    assert!(!engine.can_merge_current_with_next());
}

#[tokio::test]
async fn file_import_edit_and_export_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saga.txt");
    std::fs::write(
        &path,
        "Preface text\r\nChapter One\r\nIt begins.\r\nChapter Two\r\nIt continues.\r\nChapter Three\r\nIt ends.\r\n",
    )
    .unwrap();

    let source = FileTextSource::new();
    let engine = engine();
    let manuscript = engine.import_source(source.read(&path).await.unwrap()).unwrap();
    assert_eq!(manuscript.title(), "saga");
    assert_eq!(manuscript.chapter_count(), 3);

    engine.delete_chapter(&ChapterId::from("chapter-2")).unwrap();
    let exported = engine.export_document().unwrap();
    let written = source.write_export(dir.path(), &exported).await.unwrap();

    assert_eq!(written, dir.path().join("saga_edited.txt"));
    let content = std::fs::read_to_string(written).unwrap();
    assert!(content.starts_with("Chapter One"));
    assert!(!content.contains("It continues."));
    assert_eq!(segment(&content, "saga_edited.txt").len(), 2);
}
