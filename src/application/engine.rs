//! Document Engine - 编辑引擎门面
//!
//! 把所有命令/查询处理器绑定到同一个文稿 store 上，供渲染层调用。
//! 引擎本身不做 I/O；文件读取由 TextSourcePort 的实现负责。

use chrono::Duration;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::application::commands::handlers::{
    DeleteChapterHandler, DeleteChapterResponse, ImportManuscriptHandler, InsertSplitMarkerHandler,
    MergeChapterResponse, MergeWithNextHandler, SelectChapterHandler, SetChapterStatusHandler,
    SplitChapterHandler, SplitChapterResponse, UpdateChapterContentHandler,
};
use crate::application::commands::{
    DeleteChapter, ImportManuscript, InsertSplitMarker, MergeWithNext, SelectChapter,
    SetChapterStatus, SplitChapter, UpdateChapterContent,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{ManuscriptStorePort, Notice, SourceText};
use crate::application::queries::handlers::{
    CanMergeWithNextHandler, ChapterSummary, ExportManuscriptHandler, GetCurrentChapterHandler,
    GetManuscriptHandler, GetNoticeHandler, ListChaptersHandler,
};
use crate::application::queries::{
    CanMergeWithNext, ExportManuscript, GetCurrentChapter, GetManuscript, GetNotice, ListChapters,
};
use crate::domain::manuscript::{
    Chapter, ChapterId, ChapterStatus, ExportFormat, ExportedManuscript, Manuscript,
    DEFAULT_SPLIT_MARKER,
};
use crate::infrastructure::events::{EditorEvent, EventPublisher};
use crate::infrastructure::memory::InMemoryManuscriptStore;

/// 默认提示持续时间（秒）
pub const DEFAULT_NOTICE_TTL_SECS: u64 = 3;

/// 编辑引擎设置
#[derive(Debug, Clone)]
pub struct EditorSettings {
    /// 拆分标记
    pub split_marker: String,
    /// 临时提示持续时间
    pub notice_ttl: Duration,
    /// 导出格式
    pub export: ExportFormat,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            split_marker: DEFAULT_SPLIT_MARKER.to_string(),
            notice_ttl: Duration::seconds(DEFAULT_NOTICE_TTL_SECS as i64),
            export: ExportFormat::default(),
        }
    }
}

/// 编辑引擎
///
/// 单写者：每个操作都在调用返回前完成，并以整体替换的方式发布新文稿
pub struct DocumentEngine {
    // ========== Ports ==========
    store: Arc<dyn ManuscriptStorePort>,
    events: Arc<EventPublisher>,

    // ========== Command Handlers ==========
    import_handler: ImportManuscriptHandler,
    select_handler: SelectChapterHandler,
    update_content_handler: UpdateChapterContentHandler,
    set_status_handler: SetChapterStatusHandler,
    insert_marker_handler: InsertSplitMarkerHandler,
    split_handler: SplitChapterHandler,
    merge_handler: MergeWithNextHandler,
    delete_handler: DeleteChapterHandler,

    // ========== Query Handlers ==========
    get_manuscript_handler: GetManuscriptHandler,
    list_chapters_handler: ListChaptersHandler,
    current_chapter_handler: GetCurrentChapterHandler,
    can_merge_handler: CanMergeWithNextHandler,
    notice_handler: GetNoticeHandler,
    export_handler: ExportManuscriptHandler,
}

impl DocumentEngine {
    /// 创建编辑引擎
    pub fn new(
        store: Arc<dyn ManuscriptStorePort>,
        events: Arc<EventPublisher>,
        settings: EditorSettings,
    ) -> Self {
        let EditorSettings {
            split_marker,
            notice_ttl,
            export,
        } = settings;

        Self {
            import_handler: ImportManuscriptHandler::new(store.clone(), events.clone()),
            select_handler: SelectChapterHandler::new(store.clone(), events.clone()),
            update_content_handler: UpdateChapterContentHandler::new(store.clone(), events.clone()),
            set_status_handler: SetChapterStatusHandler::new(store.clone(), events.clone()),
            insert_marker_handler: InsertSplitMarkerHandler::new(
                store.clone(),
                events.clone(),
                split_marker.clone(),
            ),
            split_handler: SplitChapterHandler::new(store.clone(), events.clone(), split_marker),
            merge_handler: MergeWithNextHandler::new(store.clone(), events.clone()),
            delete_handler: DeleteChapterHandler::new(store.clone(), events.clone(), notice_ttl),

            get_manuscript_handler: GetManuscriptHandler::new(store.clone()),
            list_chapters_handler: ListChaptersHandler::new(store.clone()),
            current_chapter_handler: GetCurrentChapterHandler::new(store.clone()),
            can_merge_handler: CanMergeWithNextHandler::new(store.clone()),
            notice_handler: GetNoticeHandler::new(store.clone()),
            export_handler: ExportManuscriptHandler::new(store.clone(), export),

            store,
            events,
        }
    }

    /// 使用内存 store 创建编辑引擎
    pub fn in_memory(settings: EditorSettings) -> Self {
        Self::new(
            InMemoryManuscriptStore::new().arc(),
            EventPublisher::new().arc(),
            settings,
        )
    }

    /// 订阅编辑事件
    pub fn subscribe(&self) -> broadcast::Receiver<EditorEvent> {
        self.events.subscribe()
    }

    // ========== Commands ==========

    /// 导入文稿，替换当前文稿
    pub fn import_document(
        &self,
        text: impl Into<String>,
        filename: impl Into<String>,
    ) -> Result<Arc<Manuscript>, ApplicationError> {
        self.import_handler.handle(ImportManuscript {
            text: text.into(),
            filename: filename.into(),
        })
    }

    /// 导入文件读取协作者交来的文本
    pub fn import_source(&self, source: SourceText) -> Result<Arc<Manuscript>, ApplicationError> {
        self.import_document(source.content, source.filename)
    }

    pub fn select_chapter(&self, chapter_id: &ChapterId) -> Result<Arc<Manuscript>, ApplicationError> {
        self.select_handler.handle(SelectChapter {
            chapter_id: chapter_id.clone(),
        })
    }

    pub fn update_chapter_content(
        &self,
        chapter_id: &ChapterId,
        content: impl Into<String>,
    ) -> Result<Arc<Manuscript>, ApplicationError> {
        self.update_content_handler.handle(UpdateChapterContent {
            chapter_id: chapter_id.clone(),
            content: content.into(),
        })
    }

    pub fn set_chapter_status(
        &self,
        chapter_id: &ChapterId,
        status: ChapterStatus,
    ) -> Result<Arc<Manuscript>, ApplicationError> {
        self.set_status_handler.handle(SetChapterStatus {
            chapter_id: chapter_id.clone(),
            status,
        })
    }

    pub fn insert_split_marker(
        &self,
        chapter_id: &ChapterId,
        offset: usize,
    ) -> Result<Arc<Manuscript>, ApplicationError> {
        self.insert_marker_handler.handle(InsertSplitMarker {
            chapter_id: chapter_id.clone(),
            offset,
        })
    }

    /// 用配置的拆分标记拆分章节
    pub fn split_chapter(&self, chapter_id: &ChapterId) -> Result<SplitChapterResponse, ApplicationError> {
        self.split_handler.handle(SplitChapter {
            chapter_id: chapter_id.clone(),
            marker: None,
        })
    }

    /// 用指定标记拆分章节
    pub fn split_chapter_on(
        &self,
        chapter_id: &ChapterId,
        marker: impl Into<String>,
    ) -> Result<SplitChapterResponse, ApplicationError> {
        self.split_handler.handle(SplitChapter {
            chapter_id: chapter_id.clone(),
            marker: Some(marker.into()),
        })
    }

    /// 拆分所有包含标记的章节，返回被拆分的章节数
    pub fn split_all(&self) -> Result<usize, ApplicationError> {
        let manuscript = self.manuscript()?;
        let candidates: Vec<ChapterId> = manuscript
            .chapters()
            .iter()
            .filter(|c| c.contains_marker(self.split_marker()))
            .map(|c| c.id().clone())
            .collect();

        let mut split = 0;
        for chapter_id in &candidates {
            if self.split_chapter(chapter_id)?.is_split() {
                split += 1;
            }
        }
        Ok(split)
    }

    pub fn merge_with_next(&self, chapter_id: &ChapterId) -> Result<MergeChapterResponse, ApplicationError> {
        self.merge_handler.handle(MergeWithNext {
            chapter_id: chapter_id.clone(),
        })
    }

    pub fn delete_chapter(&self, chapter_id: &ChapterId) -> Result<DeleteChapterResponse, ApplicationError> {
        self.delete_handler.handle(DeleteChapter {
            chapter_id: chapter_id.clone(),
        })
    }

    /// 丢弃当前文稿
    pub fn close(&self) {
        self.store.clear();
        tracing::debug!("Manuscript closed");
    }

    // ========== Queries ==========

    pub fn manuscript(&self) -> Result<Arc<Manuscript>, ApplicationError> {
        self.get_manuscript_handler.handle(GetManuscript)
    }

    pub fn list_chapters(&self) -> Result<Vec<ChapterSummary>, ApplicationError> {
        self.list_chapters_handler.handle(ListChapters)
    }

    pub fn current_chapter(&self) -> Option<Chapter> {
        self.current_chapter_handler.handle(GetCurrentChapter)
    }

    pub fn can_merge_current_with_next(&self) -> bool {
        self.can_merge_handler.handle(CanMergeWithNext)
    }

    pub fn current_notice(&self) -> Option<Notice> {
        self.notice_handler.handle(GetNotice)
    }

    pub fn export_document(&self) -> Result<ExportedManuscript, ApplicationError> {
        self.export_handler.handle(ExportManuscript)
    }

    fn split_marker(&self) -> &str {
        self.split_handler.default_marker()
    }
}
