//! Event Publisher Implementation
//!
//! 编辑事件广播：渲染层订阅后按事件重新渲染

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::application::ports::Notice;
use crate::domain::manuscript::{ChapterId, Manuscript};

/// 广播通道容量
const CHANNEL_CAPACITY: usize = 100;

/// 编辑事件类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum EditorEvent {
    /// 导入了新文稿
    ManuscriptImported {
        manuscript_id: Uuid,
        title: String,
        chapter_count: usize,
    },
    /// 文稿内容或章节列表变更
    ManuscriptChanged {
        manuscript_id: Uuid,
        operation: String,
        chapter_count: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        current_chapter_id: Option<String>,
    },
    /// 选中章节变更
    ChapterSelected {
        manuscript_id: Uuid,
        chapter_id: String,
    },
    /// 临时提示
    Notice {
        message: String,
        expires_at: DateTime<Utc>,
    },
}

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<EditorEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { channel: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅编辑事件
    pub fn subscribe(&self) -> broadcast::Receiver<EditorEvent> {
        self.channel.subscribe()
    }

    /// 发布导入事件
    pub fn publish_imported(&self, manuscript: &Manuscript) {
        self.publish(EditorEvent::ManuscriptImported {
            manuscript_id: *manuscript.id().as_uuid(),
            title: manuscript.title().to_string(),
            chapter_count: manuscript.chapter_count(),
        });
    }

    /// 发布变更事件
    pub fn publish_changed(&self, manuscript: &Manuscript, operation: &str) {
        self.publish(EditorEvent::ManuscriptChanged {
            manuscript_id: *manuscript.id().as_uuid(),
            operation: operation.to_string(),
            chapter_count: manuscript.chapter_count(),
            current_chapter_id: manuscript.current_chapter_id().map(|id| id.to_string()),
        });
    }

    /// 发布选中事件
    pub fn publish_selected(&self, manuscript: &Manuscript, chapter_id: &ChapterId) {
        self.publish(EditorEvent::ChapterSelected {
            manuscript_id: *manuscript.id().as_uuid(),
            chapter_id: chapter_id.to_string(),
        });
    }

    /// 发布临时提示
    pub fn publish_notice(&self, notice: &Notice) {
        self.publish(EditorEvent::Notice {
            message: notice.message.clone(),
            expires_at: notice.expires_at,
        });
    }

    fn publish(&self, event: EditorEvent) {
        if let Err(e) = self.channel.send(event) {
            tracing::trace!(error = %e, "Failed to publish editor event (no receivers)");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
