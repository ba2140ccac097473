//! Chapter Command Handlers
//!
//! 所有章节变更都通过 store 的 copy-on-write 更新执行：失败时已发布的文稿保持不变

use chrono::Duration;
use std::sync::Arc;

use crate::application::commands::{
    DeleteChapter, InsertSplitMarker, MergeWithNext, SelectChapter, SetChapterStatus, SplitChapter,
    UpdateChapterContent,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{ManuscriptStorePort, Notice, StoreError};
use crate::domain::manuscript::{Chapter, Manuscript, ManuscriptError};
use crate::infrastructure::events::EventPublisher;

// ============================================================================
// SelectChapter
// ============================================================================

/// SelectChapter Handler
pub struct SelectChapterHandler {
    store: Arc<dyn ManuscriptStorePort>,
    events: Arc<EventPublisher>,
}

impl SelectChapterHandler {
    pub fn new(store: Arc<dyn ManuscriptStorePort>, events: Arc<EventPublisher>) -> Self {
        Self { store, events }
    }

    pub fn handle(&self, command: SelectChapter) -> Result<Arc<Manuscript>, ApplicationError> {
        let updated = self
            .store
            .update(&mut |m: &mut Manuscript| m.select_chapter(&command.chapter_id))?;

        tracing::debug!(chapter_id = %command.chapter_id, "Chapter selected");
        self.events.publish_selected(&updated, &command.chapter_id);

        Ok(updated)
    }
}

// ============================================================================
// UpdateChapterContent
// ============================================================================

/// UpdateChapterContent Handler
pub struct UpdateChapterContentHandler {
    store: Arc<dyn ManuscriptStorePort>,
    events: Arc<EventPublisher>,
}

impl UpdateChapterContentHandler {
    pub fn new(store: Arc<dyn ManuscriptStorePort>, events: Arc<EventPublisher>) -> Self {
        Self { store, events }
    }

    pub fn handle(&self, command: UpdateChapterContent) -> Result<Arc<Manuscript>, ApplicationError> {
        let UpdateChapterContent { chapter_id, content } = command;
        let chars = content.chars().count();

        let mut content = Some(content);
        let updated = self.store.update(&mut |m: &mut Manuscript| {
            m.update_chapter_content(&chapter_id, content.take().unwrap_or_default())
        })?;

        tracing::debug!(chapter_id = %chapter_id, chars = chars, "Chapter content updated");
        self.events.publish_changed(&updated, "update_content");

        Ok(updated)
    }
}

// ============================================================================
// SetChapterStatus
// ============================================================================

/// SetChapterStatus Handler
pub struct SetChapterStatusHandler {
    store: Arc<dyn ManuscriptStorePort>,
    events: Arc<EventPublisher>,
}

impl SetChapterStatusHandler {
    pub fn new(store: Arc<dyn ManuscriptStorePort>, events: Arc<EventPublisher>) -> Self {
        Self { store, events }
    }

    pub fn handle(&self, command: SetChapterStatus) -> Result<Arc<Manuscript>, ApplicationError> {
        let updated = self.store.update(&mut |m: &mut Manuscript| {
            m.set_chapter_status(&command.chapter_id, command.status)
        })?;

        tracing::debug!(
            chapter_id = %command.chapter_id,
            status = %command.status,
            "Chapter status changed"
        );
        self.events.publish_changed(&updated, "set_status");

        Ok(updated)
    }
}

// ============================================================================
// InsertSplitMarker
// ============================================================================

/// InsertSplitMarker Handler - 在光标位置插入拆分标记
pub struct InsertSplitMarkerHandler {
    store: Arc<dyn ManuscriptStorePort>,
    events: Arc<EventPublisher>,
    marker: String,
}

impl InsertSplitMarkerHandler {
    pub fn new(
        store: Arc<dyn ManuscriptStorePort>,
        events: Arc<EventPublisher>,
        marker: impl Into<String>,
    ) -> Self {
        Self {
            store,
            events,
            marker: marker.into(),
        }
    }

    pub fn handle(&self, command: InsertSplitMarker) -> Result<Arc<Manuscript>, ApplicationError> {
        let updated = self.store.update(&mut |m: &mut Manuscript| {
            m.insert_split_marker(&command.chapter_id, command.offset, &self.marker)
        })?;

        tracing::debug!(
            chapter_id = %command.chapter_id,
            offset = command.offset,
            "Split marker inserted"
        );
        self.events.publish_changed(&updated, "insert_split_marker");

        Ok(updated)
    }
}

// ============================================================================
// SplitChapter
// ============================================================================

/// 拆分响应
#[derive(Debug, Clone)]
pub struct SplitChapterResponse {
    pub manuscript: Arc<Manuscript>,
    /// 拆分得到的章节；未找到标记时只含原章节
    pub chapters: Vec<Chapter>,
}

impl SplitChapterResponse {
    pub fn is_split(&self) -> bool {
        self.chapters.len() > 1
    }
}

/// SplitChapter Handler
pub struct SplitChapterHandler {
    store: Arc<dyn ManuscriptStorePort>,
    events: Arc<EventPublisher>,
    default_marker: String,
}

impl SplitChapterHandler {
    pub fn new(
        store: Arc<dyn ManuscriptStorePort>,
        events: Arc<EventPublisher>,
        default_marker: impl Into<String>,
    ) -> Self {
        Self {
            store,
            events,
            default_marker: default_marker.into(),
        }
    }

    pub fn default_marker(&self) -> &str {
        &self.default_marker
    }

    pub fn handle(&self, command: SplitChapter) -> Result<SplitChapterResponse, ApplicationError> {
        let marker = command.marker.as_deref().unwrap_or(&self.default_marker);
        if marker.is_empty() {
            return Err(ApplicationError::validation("split marker cannot be empty"));
        }

        let mut chapters = Vec::new();
        let updated = self.store.update(&mut |m: &mut Manuscript| {
            chapters = m.split_chapter(&command.chapter_id, marker)?;
            Ok(())
        })?;

        let response = SplitChapterResponse {
            manuscript: updated,
            chapters,
        };

        if response.is_split() {
            tracing::info!(
                chapter_id = %command.chapter_id,
                parts = response.chapters.len(),
                "Chapter split"
            );
            self.events.publish_changed(&response.manuscript, "split");
        } else {
            tracing::debug!(chapter_id = %command.chapter_id, "No split marker found");
        }

        Ok(response)
    }
}

// ============================================================================
// MergeWithNext
// ============================================================================

/// 合并响应
#[derive(Debug, Clone)]
pub struct MergeChapterResponse {
    pub manuscript: Arc<Manuscript>,
    /// 合并后的章节；已是最后一章时为 None
    pub merged: Option<Chapter>,
}

/// MergeWithNext Handler
pub struct MergeWithNextHandler {
    store: Arc<dyn ManuscriptStorePort>,
    events: Arc<EventPublisher>,
}

impl MergeWithNextHandler {
    pub fn new(store: Arc<dyn ManuscriptStorePort>, events: Arc<EventPublisher>) -> Self {
        Self { store, events }
    }

    pub fn handle(&self, command: MergeWithNext) -> Result<MergeChapterResponse, ApplicationError> {
        let mut merged = None;
        let updated = self.store.update(&mut |m: &mut Manuscript| {
            merged = m.merge_with_next(&command.chapter_id)?;
            Ok(())
        })?;

        match &merged {
            Some(chapter) => {
                tracing::info!(
                    chapter_id = %chapter.id(),
                    chapters = updated.chapter_count(),
                    "Chapter merged with next"
                );
                self.events.publish_changed(&updated, "merge");
            }
            None => {
                tracing::debug!(chapter_id = %command.chapter_id, "Last chapter, nothing to merge");
            }
        }

        Ok(MergeChapterResponse {
            manuscript: updated,
            merged,
        })
    }
}

// ============================================================================
// DeleteChapter
// ============================================================================

/// 删除响应
#[derive(Debug, Clone)]
pub struct DeleteChapterResponse {
    pub manuscript: Arc<Manuscript>,
    pub removed: Chapter,
}

/// DeleteChapter Handler
///
/// 拒绝删除最后一章时发布一条临时提示
pub struct DeleteChapterHandler {
    store: Arc<dyn ManuscriptStorePort>,
    events: Arc<EventPublisher>,
    notice_ttl: Duration,
}

impl DeleteChapterHandler {
    pub fn new(
        store: Arc<dyn ManuscriptStorePort>,
        events: Arc<EventPublisher>,
        notice_ttl: Duration,
    ) -> Self {
        Self {
            store,
            events,
            notice_ttl,
        }
    }

    pub fn handle(&self, command: DeleteChapter) -> Result<DeleteChapterResponse, ApplicationError> {
        let mut removed = None;
        let result = self.store.update(&mut |m: &mut Manuscript| {
            removed = Some(m.delete_chapter(&command.chapter_id)?);
            Ok(())
        });

        let updated = match result {
            Ok(updated) => updated,
            Err(StoreError::Rejected(ManuscriptError::LastChapter)) => {
                let notice = Notice::new(ManuscriptError::LastChapter.to_string(), self.notice_ttl);
                tracing::warn!(chapter_id = %command.chapter_id, "Refused to delete the last chapter");
                self.store.post_notice(notice.clone());
                self.events.publish_notice(&notice);
                return Err(ManuscriptError::LastChapter.into());
            }
            Err(e) => return Err(e.into()),
        };

        let removed = removed
            .ok_or_else(|| ApplicationError::internal("deleted chapter missing from update"))?;

        tracing::info!(
            chapter_id = %removed.id(),
            chapters = updated.chapter_count(),
            "Chapter deleted"
        );
        self.events.publish_changed(&updated, "delete");

        Ok(DeleteChapterResponse {
            manuscript: updated,
            removed,
        })
    }
}
