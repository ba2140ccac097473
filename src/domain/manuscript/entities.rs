//! Manuscript Context - Entities

use serde::{Deserialize, Serialize};

use super::{ChapterId, ChapterStatus};

/// 章节 - 文稿中一段有标题、有顺序的连续文本
///
/// 不变量:
/// - id 在文稿内唯一
/// - content 包含标题行本身
/// - order 在列表显示顺序中严格递增，允许小数（拆分时插入）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    id: ChapterId,
    title: String,
    content: String,
    status: ChapterStatus,
    order: f64,
}

impl Chapter {
    pub fn new(
        id: ChapterId,
        title: impl Into<String>,
        content: impl Into<String>,
        order: f64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            status: ChapterStatus::Pending,
            order,
        }
    }

    pub fn with_status(mut self, status: ChapterStatus) -> Self {
        self.status = status;
        self
    }

    pub fn id(&self) -> &ChapterId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn status(&self) -> ChapterStatus {
        self.status
    }

    pub fn order(&self) -> f64 {
        self.order
    }

    pub fn is_editing(&self) -> bool {
        self.status == ChapterStatus::Editing
    }

    /// 字符数（按 Unicode 标量计）
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    pub fn contains_marker(&self, marker: &str) -> bool {
        !marker.is_empty() && self.content.contains(marker)
    }

    pub(crate) fn set_status(&mut self, status: ChapterStatus) {
        self.status = status;
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
    }

    /// 按标记拆分章节
    ///
    /// 没有标记时返回只含原章节的列表。否则第一段保留原 id 和标题并进入编辑状态，
    /// 后续段落派生 `<id>-<n>` / `<title> - <n>`，order 依次加 0.1。
    pub fn split_on(&self, marker: &str) -> Vec<Chapter> {
        self.split_avoiding(marker, |_| false)
    }

    /// 按标记拆分章节，派生 id 跳过 `is_taken` 报告已占用的后缀
    ///
    /// 后缀从 2 开始递增，已占用时顺延到下一个空闲后缀，标题后缀与 id 保持一致。
    /// 同一区域反复拆分时小数 order 可能与相邻章节相同，这里不做重新编号。
    pub fn split_avoiding(
        &self,
        marker: &str,
        is_taken: impl Fn(&ChapterId) -> bool,
    ) -> Vec<Chapter> {
        if !self.contains_marker(marker) {
            return vec![self.clone()];
        }

        let mut next_suffix = 2;
        self.content
            .split(marker)
            .enumerate()
            .map(|(index, part)| {
                if index == 0 {
                    return Chapter {
                        id: self.id.clone(),
                        title: self.title.clone(),
                        content: part.trim().to_string(),
                        status: ChapterStatus::Editing,
                        order: self.order,
                    };
                }

                let mut suffix = next_suffix;
                while is_taken(&self.id.derived(suffix)) {
                    suffix += 1;
                }
                next_suffix = suffix + 1;

                Chapter {
                    id: self.id.derived(suffix),
                    title: format!("{} - {}", self.title, suffix),
                    content: part.trim().to_string(),
                    status: ChapterStatus::Pending,
                    order: self.order + index as f64 * 0.1,
                }
            })
            .collect()
    }

    /// 与下一章合并：保留本章的 id、标题、状态和 order
    pub fn merged_with(&self, next: &Chapter) -> Chapter {
        Chapter {
            content: format!("{}\n\n{}", self.content, next.content),
            ..self.clone()
        }
    }

    /// 导出时的文本形式
    ///
    /// 内容第一行就是标题行（导入时保留的标题）时不再重复标题
    pub fn render(&self) -> String {
        if self.content.lines().next().map(str::trim) == Some(self.title.as_str()) {
            self.content.clone()
        } else {
            format!("{}\n\n{}", self.title, self.content)
        }
    }
}
