//! Manuscript Context - Errors

use thiserror::Error;

use super::ChapterId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManuscriptError {
    #[error("文本中没有可用的章节")]
    NoChapters,

    #[error("章节不存在: {0}")]
    ChapterNotFound(ChapterId),

    #[error("无法删除最后一个章节")]
    LastChapter,

    #[error("无效的插入位置: {offset} (章节 {chapter_id})")]
    InvalidOffset { chapter_id: ChapterId, offset: usize },
}
