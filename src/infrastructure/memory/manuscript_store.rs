//! In-Memory Manuscript Store Implementation

use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::application::ports::{ManuscriptStorePort, ManuscriptUpdate, Notice, StoreError};
use crate::domain::manuscript::Manuscript;

#[derive(Default)]
struct EditorState {
    manuscript: Option<Arc<Manuscript>>,
    notice: Option<Notice>,
}

/// 内存文稿存储
///
/// 写锁只在计算新文稿期间持有，读者拿到的是不可变快照
pub struct InMemoryManuscriptStore {
    state: RwLock<EditorState>,
}

impl InMemoryManuscriptStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(EditorState::default()),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    // 状态本身总是完整替换，锁中毒时直接继续使用
    fn read(&self) -> RwLockReadGuard<'_, EditorState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EditorState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryManuscriptStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ManuscriptStorePort for InMemoryManuscriptStore {
    fn current(&self) -> Option<Arc<Manuscript>> {
        self.read().manuscript.clone()
    }

    fn replace(&self, manuscript: Manuscript) -> Arc<Manuscript> {
        let published = Arc::new(manuscript);
        let mut state = self.write();
        state.manuscript = Some(published.clone());
        state.notice = None;
        published
    }

    fn update(&self, apply: ManuscriptUpdate<'_>) -> Result<Arc<Manuscript>, StoreError> {
        let mut state = self.write();
        let current = state.manuscript.as_ref().ok_or(StoreError::Empty)?;

        let mut next = Manuscript::clone(current);
        apply(&mut next)?;

        let published = Arc::new(next);
        state.manuscript = Some(published.clone());
        Ok(published)
    }

    fn clear(&self) {
        let mut state = self.write();
        state.manuscript = None;
        state.notice = None;
    }

    fn post_notice(&self, notice: Notice) {
        self.write().notice = Some(notice);
    }

    fn active_notice(&self, now: DateTime<Utc>) -> Option<Notice> {
        self.read()
            .notice
            .as_ref()
            .filter(|n| n.is_active_at(now))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::manuscript::{ChapterId, ManuscriptError};
    use chrono::Duration;

    fn sample() -> Manuscript {
        Manuscript::import("Chapter 1\nA\nChapter 2\nB", "book.txt").unwrap()
    }

    #[test]
    fn test_update_without_manuscript() {
        let store = InMemoryManuscriptStore::new();
        let result = store.update(&mut |_m: &mut Manuscript| Ok(()));
        assert!(matches!(result, Err(StoreError::Empty)));
    }

    #[test]
    fn test_snapshot_survives_update() {
        let store = InMemoryManuscriptStore::new();
        store.replace(sample());
        let snapshot = store.current().unwrap();

        store
            .update(&mut |m: &mut Manuscript| m.select_chapter(&ChapterId::from("chapter-2")))
            .unwrap();

        assert_eq!(snapshot.current_chapter_id().unwrap().as_str(), "chapter-1");
        let current = store.current().unwrap();
        assert_eq!(current.current_chapter_id().unwrap().as_str(), "chapter-2");
    }

    #[test]
    fn test_failed_update_publishes_nothing() {
        let store = InMemoryManuscriptStore::new();
        let original = store.replace(sample());

        let result = store.update(&mut |m: &mut Manuscript| {
            m.update_chapter_content(&ChapterId::from("chapter-1"), "changed")?;
            Err(ManuscriptError::LastChapter)
        });

        assert!(matches!(
            result,
            Err(StoreError::Rejected(ManuscriptError::LastChapter))
        ));
        assert!(Arc::ptr_eq(&store.current().unwrap(), &original));
    }

    #[test]
    fn test_notice_expires() {
        let store = InMemoryManuscriptStore::new();
        let notice = Notice::new("careful", Duration::seconds(3));
        store.post_notice(notice.clone());

        assert_eq!(store.active_notice(Utc::now()), Some(notice.clone()));
        assert!(store.active_notice(notice.expires_at).is_none());
    }

    #[test]
    fn test_replace_clears_notice() {
        let store = InMemoryManuscriptStore::new();
        store.post_notice(Notice::new("old", Duration::seconds(60)));
        store.replace(sample());

        assert!(store.active_notice(Utc::now()).is_none());
    }
}
