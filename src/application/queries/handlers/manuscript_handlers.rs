//! Manuscript Query Handlers

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{ManuscriptStorePort, Notice};
use crate::application::queries::{
    CanMergeWithNext, ExportManuscript, GetCurrentChapter, GetManuscript, GetNotice, ListChapters,
};
use crate::domain::manuscript::{Chapter, ExportFormat, ExportedManuscript, Manuscript};

// ============================================================================
// Response DTOs
// ============================================================================

/// 章节摘要响应
#[derive(Debug, Clone, Serialize)]
pub struct ChapterSummary {
    pub id: String,
    pub title: String,
    pub status: String,
    pub order: f64,
    pub char_count: usize,
    pub is_current: bool,
}

impl ChapterSummary {
    fn from_chapter(chapter: &Chapter, manuscript: &Manuscript) -> Self {
        Self {
            id: chapter.id().to_string(),
            title: chapter.title().to_string(),
            status: chapter.status().as_str().to_string(),
            order: chapter.order(),
            char_count: chapter.char_count(),
            is_current: manuscript.current_chapter_id() == Some(chapter.id()),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GetManuscript Handler
pub struct GetManuscriptHandler {
    store: Arc<dyn ManuscriptStorePort>,
}

impl GetManuscriptHandler {
    pub fn new(store: Arc<dyn ManuscriptStorePort>) -> Self {
        Self { store }
    }

    pub fn handle(&self, _query: GetManuscript) -> Result<Arc<Manuscript>, ApplicationError> {
        self.store.current().ok_or(ApplicationError::NoManuscript)
    }
}

/// ListChapters Handler
pub struct ListChaptersHandler {
    store: Arc<dyn ManuscriptStorePort>,
}

impl ListChaptersHandler {
    pub fn new(store: Arc<dyn ManuscriptStorePort>) -> Self {
        Self { store }
    }

    pub fn handle(&self, _query: ListChapters) -> Result<Vec<ChapterSummary>, ApplicationError> {
        let manuscript = self.store.current().ok_or(ApplicationError::NoManuscript)?;
        Ok(manuscript
            .chapters()
            .iter()
            .map(|c| ChapterSummary::from_chapter(c, &manuscript))
            .collect())
    }
}

/// GetCurrentChapter Handler
///
/// 没有文稿或没有选中章节时返回 None
pub struct GetCurrentChapterHandler {
    store: Arc<dyn ManuscriptStorePort>,
}

impl GetCurrentChapterHandler {
    pub fn new(store: Arc<dyn ManuscriptStorePort>) -> Self {
        Self { store }
    }

    pub fn handle(&self, _query: GetCurrentChapter) -> Option<Chapter> {
        self.store
            .current()
            .and_then(|m| m.current_chapter().cloned())
    }
}

/// CanMergeWithNext Handler
pub struct CanMergeWithNextHandler {
    store: Arc<dyn ManuscriptStorePort>,
}

impl CanMergeWithNextHandler {
    pub fn new(store: Arc<dyn ManuscriptStorePort>) -> Self {
        Self { store }
    }

    pub fn handle(&self, _query: CanMergeWithNext) -> bool {
        self.store
            .current()
            .is_some_and(|m| m.can_merge_current_with_next())
    }
}

/// GetNotice Handler
pub struct GetNoticeHandler {
    store: Arc<dyn ManuscriptStorePort>,
}

impl GetNoticeHandler {
    pub fn new(store: Arc<dyn ManuscriptStorePort>) -> Self {
        Self { store }
    }

    pub fn handle(&self, _query: GetNotice) -> Option<Notice> {
        self.store.active_notice(Utc::now())
    }
}

/// ExportManuscript Handler
pub struct ExportManuscriptHandler {
    store: Arc<dyn ManuscriptStorePort>,
    format: ExportFormat,
}

impl ExportManuscriptHandler {
    pub fn new(store: Arc<dyn ManuscriptStorePort>, format: ExportFormat) -> Self {
        Self { store, format }
    }

    pub fn handle(&self, _query: ExportManuscript) -> Result<ExportedManuscript, ApplicationError> {
        let manuscript = self.store.current().ok_or(ApplicationError::NoManuscript)?;
        let exported = manuscript.export(&self.format);

        tracing::info!(
            manuscript_id = %manuscript.id(),
            chapters = manuscript.chapter_count(),
            filename = %exported.filename,
            bytes = exported.content.len(),
            "Manuscript exported"
        );

        Ok(exported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryManuscriptStore;

    fn store_with(text: &str, filename: &str) -> Arc<InMemoryManuscriptStore> {
        let store = Arc::new(InMemoryManuscriptStore::new());
        store.replace(Manuscript::import(text, filename).unwrap());
        store
    }

    #[test]
    fn test_list_chapters_marks_current() {
        let store = store_with("Chapter 1\nA\nChapter 2\nBB", "book.txt");
        let chapters = ListChaptersHandler::new(store).handle(ListChapters).unwrap();

        assert_eq!(chapters.len(), 2);
        assert!(chapters[0].is_current);
        assert_eq!(chapters[0].status, "editing");
        assert!(!chapters[1].is_current);
        assert_eq!(chapters[1].char_count, "Chapter 2\nBB".chars().count());
    }

    #[test]
    fn test_queries_on_empty_store() {
        let store = Arc::new(InMemoryManuscriptStore::new());

        assert!(GetCurrentChapterHandler::new(store.clone())
            .handle(GetCurrentChapter)
            .is_none());
        assert!(!CanMergeWithNextHandler::new(store.clone()).handle(CanMergeWithNext));
        assert!(matches!(
            ExportManuscriptHandler::new(store, ExportFormat::default()).handle(ExportManuscript),
            Err(ApplicationError::NoManuscript)
        ));
    }

    #[test]
    fn test_export_uses_configured_format() {
        let store = store_with("Chapter 1\nA", "tale.txt");
        let format = ExportFormat {
            filename_suffix: "-final".to_string(),
            extension: "md".to_string(),
        };

        let exported = ExportManuscriptHandler::new(store, format)
            .handle(ExportManuscript)
            .unwrap();
        assert_eq!(exported.filename, "tale-final.md");
        assert_eq!(exported.content, "Chapter 1\nA");
    }
}
