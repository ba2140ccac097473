//! Manuscript Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{title_from_filename, Chapter, ChapterId, ChapterStatus, ManuscriptError, ManuscriptId};
use crate::domain::chapter_segmenter::segment;

/// 默认拆分标记
pub const DEFAULT_SPLIT_MARKER: &str = "====SPLIT CHAPTER====";

/// 导出时章节之间的分隔
const CHAPTER_SEPARATOR: &str = "\n\n\n";

/// 文件名为空时使用的标题
const UNTITLED: &str = "untitled";

/// 导出格式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFormat {
    /// 追加在标题后的文件名后缀
    pub filename_suffix: String,
    /// 文件扩展名（不含点）
    pub extension: String,
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self {
            filename_suffix: "_edited".to_string(),
            extension: "txt".to_string(),
        }
    }
}

/// 导出结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedManuscript {
    pub content: String,
    pub filename: String,
}

/// Manuscript 聚合根
///
/// 不变量:
/// - chapters 在文稿存在期间永不为空
/// - current_chapter_id 若存在，必须指向现有章节
/// - 有选中章节时恰好一个章节处于 editing 状态
/// - chapters 按 order 升序排列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manuscript {
    id: ManuscriptId,
    title: String,
    chapters: Vec<Chapter>,
    current_chapter_id: Option<ChapterId>,
    last_modified: DateTime<Utc>,
}

impl Manuscript {
    /// 从原始文本导入文稿
    ///
    /// 标题取自文件名，章节来自分章器，第一章被选中并进入编辑状态
    pub fn import(raw_text: &str, filename: &str) -> Result<Self, ManuscriptError> {
        let chapters = segment(raw_text, filename);
        let mut title = title_from_filename(filename);
        if title.is_empty() {
            title = UNTITLED.to_string();
        }
        Self::from_chapters(title, chapters)
    }

    /// 由已有章节列表创建文稿
    pub fn from_chapters(
        title: impl Into<String>,
        mut chapters: Vec<Chapter>,
    ) -> Result<Self, ManuscriptError> {
        if chapters.is_empty() {
            return Err(ManuscriptError::NoChapters);
        }

        chapters.sort_by(|a, b| a.order().total_cmp(&b.order()));
        for (index, chapter) in chapters.iter_mut().enumerate() {
            let status = if index == 0 {
                ChapterStatus::Editing
            } else {
                ChapterStatus::Pending
            };
            chapter.set_status(status);
        }
        let current = chapters[0].id().clone();

        Ok(Self {
            id: ManuscriptId::new(),
            title: title.into(),
            chapters,
            current_chapter_id: Some(current),
            last_modified: Utc::now(),
        })
    }

    // Getters
    pub fn id(&self) -> &ManuscriptId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn current_chapter_id(&self) -> Option<&ChapterId> {
        self.current_chapter_id.as_ref()
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn chapter(&self, id: &ChapterId) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id() == id)
    }

    /// 当前选中的章节
    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.current_chapter_id.as_ref().and_then(|id| self.chapter(id))
    }

    /// 当前章节后面是否还有章节可合并
    pub fn can_merge_current_with_next(&self) -> bool {
        self.current_chapter_id
            .as_ref()
            .and_then(|id| self.position(id))
            .is_some_and(|index| index + 1 < self.chapters.len())
    }

    fn position(&self, id: &ChapterId) -> Option<usize> {
        self.chapters.iter().position(|c| c.id() == id)
    }

    fn require_position(&self, id: &ChapterId) -> Result<usize, ManuscriptError> {
        self.position(id)
            .ok_or_else(|| ManuscriptError::ChapterNotFound(id.clone()))
    }

    fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    /// 把选中切换到指定位置：该章节进入编辑，其余 editing 章节回到 pending
    fn focus(&mut self, index: usize) {
        for (i, chapter) in self.chapters.iter_mut().enumerate() {
            if i == index {
                chapter.set_status(ChapterStatus::Editing);
            } else if chapter.is_editing() {
                chapter.set_status(ChapterStatus::Pending);
            }
        }
        self.current_chapter_id = Some(self.chapters[index].id().clone());
    }

    /// 选中章节
    pub fn select_chapter(&mut self, id: &ChapterId) -> Result<(), ManuscriptError> {
        let index = self.require_position(id)?;
        self.focus(index);
        self.touch();
        Ok(())
    }

    /// 替换章节内容，不改变状态、顺序和标题
    pub fn update_chapter_content(
        &mut self,
        id: &ChapterId,
        content: impl Into<String>,
    ) -> Result<(), ManuscriptError> {
        let index = self.require_position(id)?;
        self.chapters[index].set_content(content.into());
        self.touch();
        Ok(())
    }

    /// 设置章节状态
    ///
    /// 设为 editing 等同于选中；把当前选中章节设为其他状态会清除选中
    pub fn set_chapter_status(
        &mut self,
        id: &ChapterId,
        status: ChapterStatus,
    ) -> Result<(), ManuscriptError> {
        let index = self.require_position(id)?;
        if status == ChapterStatus::Editing {
            self.focus(index);
        } else {
            self.chapters[index].set_status(status);
            if self.current_chapter_id.as_ref() == Some(id) {
                self.current_chapter_id = None;
            }
        }
        self.touch();
        Ok(())
    }

    /// 在章节内容的指定字节位置插入拆分标记
    ///
    /// 超出末尾的位置按末尾处理；落在 UTF-8 字符中间时报错
    pub fn insert_split_marker(
        &mut self,
        id: &ChapterId,
        offset: usize,
        marker: &str,
    ) -> Result<(), ManuscriptError> {
        let index = self.require_position(id)?;
        let content = self.chapters[index].content();
        let offset = offset.min(content.len());
        if !content.is_char_boundary(offset) {
            return Err(ManuscriptError::InvalidOffset {
                chapter_id: id.clone(),
                offset,
            });
        }

        let mut updated = String::with_capacity(content.len() + marker.len() + 3);
        updated.push_str(&content[..offset]);
        updated.push_str("\n\n");
        updated.push_str(marker);
        updated.push('\n');
        updated.push_str(&content[offset..]);

        self.chapters[index].set_content(updated);
        self.touch();
        Ok(())
    }

    /// 按标记拆分章节
    ///
    /// 没有标记时不做任何修改，返回原章节。否则新章节替换原章节的位置，
    /// 整个列表按 order 重新排序，选中切到第一个新章节。
    pub fn split_chapter(
        &mut self,
        id: &ChapterId,
        marker: &str,
    ) -> Result<Vec<Chapter>, ManuscriptError> {
        let index = self.require_position(id)?;
        let existing = &self.chapters;
        let parts = existing[index].split_avoiding(marker, |candidate| {
            existing.iter().any(|c| c.id() == candidate)
        });
        if parts.len() <= 1 {
            return Ok(parts);
        }

        self.chapters.splice(index..=index, parts.iter().cloned());
        self.chapters.sort_by(|a, b| a.order().total_cmp(&b.order()));

        let first = parts[0].id();
        if let Some(new_index) = self.position(first) {
            self.focus(new_index);
        }
        self.touch();
        Ok(parts)
    }

    /// 与列表中紧随其后的章节合并
    ///
    /// 已是最后一章时返回 `None` 且不做修改
    pub fn merge_with_next(&mut self, id: &ChapterId) -> Result<Option<Chapter>, ManuscriptError> {
        let index = self.require_position(id)?;
        if index + 1 >= self.chapters.len() {
            return Ok(None);
        }

        let next = self.chapters.remove(index + 1);
        let merged = self.chapters[index].merged_with(&next);
        self.chapters[index] = merged;

        if self.current_chapter_id.as_ref() == Some(next.id()) {
            self.focus(index);
        }
        self.touch();
        Ok(Some(self.chapters[index].clone()))
    }

    /// 删除章节
    ///
    /// 只剩一个章节时拒绝删除。删除的是选中章节时，选中移到剩余的第一章
    pub fn delete_chapter(&mut self, id: &ChapterId) -> Result<Chapter, ManuscriptError> {
        let index = self.require_position(id)?;
        if self.chapters.len() <= 1 {
            return Err(ManuscriptError::LastChapter);
        }

        let removed = self.chapters.remove(index);
        if self.current_chapter_id.as_ref() == Some(removed.id()) {
            self.focus(0);
        }
        self.touch();
        Ok(removed)
    }

    /// 导出为单个文本
    pub fn export(&self, format: &ExportFormat) -> ExportedManuscript {
        let mut ordered: Vec<&Chapter> = self.chapters.iter().collect();
        ordered.sort_by(|a, b| a.order().total_cmp(&b.order()));

        let content = ordered
            .iter()
            .map(|c| c.render())
            .collect::<Vec<_>>()
            .join(CHAPTER_SEPARATOR);

        ExportedManuscript {
            content,
            filename: format!(
                "{}{}.{}",
                self.title, format.filename_suffix, format.extension
            ),
        }
    }
}
