//! Manuscript Commands - 文稿写操作

use crate::domain::manuscript::{ChapterId, ChapterStatus};

/// 导入文稿命令（替换当前文稿）
#[derive(Debug, Clone)]
pub struct ImportManuscript {
    pub text: String,
    pub filename: String,
}

/// 选中章节命令
#[derive(Debug, Clone)]
pub struct SelectChapter {
    pub chapter_id: ChapterId,
}

/// 更新章节内容命令
#[derive(Debug, Clone)]
pub struct UpdateChapterContent {
    pub chapter_id: ChapterId,
    pub content: String,
}

/// 设置章节状态命令
#[derive(Debug, Clone)]
pub struct SetChapterStatus {
    pub chapter_id: ChapterId,
    pub status: ChapterStatus,
}

/// 插入拆分标记命令
#[derive(Debug, Clone)]
pub struct InsertSplitMarker {
    pub chapter_id: ChapterId,
    /// 章节内容中的字节偏移
    pub offset: usize,
}

/// 拆分章节命令
#[derive(Debug, Clone)]
pub struct SplitChapter {
    pub chapter_id: ChapterId,
    /// 为空时使用配置的拆分标记
    pub marker: Option<String>,
}

/// 与下一章合并命令
#[derive(Debug, Clone)]
pub struct MergeWithNext {
    pub chapter_id: ChapterId,
}

/// 删除章节命令
#[derive(Debug, Clone)]
pub struct DeleteChapter {
    pub chapter_id: ChapterId,
}
