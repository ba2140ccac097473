//! Manuscript Queries - 文稿读操作

/// 获取当前文稿快照
#[derive(Debug, Clone)]
pub struct GetManuscript;

/// 列出章节摘要
#[derive(Debug, Clone)]
pub struct ListChapters;

/// 获取当前选中章节
#[derive(Debug, Clone)]
pub struct GetCurrentChapter;

/// 当前章节能否与下一章合并
#[derive(Debug, Clone)]
pub struct CanMergeWithNext;

/// 获取仍有效的临时提示
#[derive(Debug, Clone)]
pub struct GetNotice;

/// 导出文稿
#[derive(Debug, Clone)]
pub struct ExportManuscript;
