//! Manuscript Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 文稿唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManuscriptId(Uuid);

impl ManuscriptId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ManuscriptId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ManuscriptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 章节标识
///
/// 导入时为 `chapter-<n>`，拆分产生的新章节为 `<原 id>-<n>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterId(String);

impl ChapterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// 导入时按位置生成的 id（从 1 开始）
    pub fn numbered(position: usize) -> Self {
        Self(format!("chapter-{}", position))
    }

    /// 拆分时派生的子章节 id
    pub fn derived(&self, part: usize) -> Self {
        Self(format!("{}-{}", self.0, part))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChapterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChapterId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ChapterId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// 章节状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterStatus {
    #[default]
    Pending,
    Editing,
    Completed,
}

impl ChapterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Editing => "editing",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ChapterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChapterStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "editing" => Ok(Self::Editing),
            "completed" => Ok(Self::Completed),
            other => Err(format!("未知的章节状态: {}", other)),
        }
    }
}

/// 从文件名推导文稿标题（去掉扩展名）
///
/// 只去掉最后一个扩展名，隐藏文件名（如 `.txt`）视为没有主干
pub fn title_from_filename(filename: &str) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();
    match name.rfind('.') {
        Some(dot) => name[..dot].trim().to_string(),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_id_numbering() {
        let id = ChapterId::numbered(3);
        assert_eq!(id.as_str(), "chapter-3");
        assert_eq!(id.derived(2).as_str(), "chapter-3-2");
    }

    #[test]
    fn test_status_roundtrip_through_str() {
        for status in [
            ChapterStatus::Pending,
            ChapterStatus::Editing,
            ChapterStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<ChapterStatus>(), Ok(status));
        }
        assert!("draft".parse::<ChapterStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ChapterStatus::Editing).unwrap();
        assert_eq!(json, "\"editing\"");
    }

    #[test]
    fn test_title_from_filename() {
        assert_eq!(title_from_filename("my novel.txt"), "my novel");
        assert_eq!(title_from_filename("/tmp/books/斗破苍穹.txt"), "斗破苍穹");
        assert_eq!(title_from_filename("archive.tar.txt"), "archive.tar");
        assert_eq!(title_from_filename("README"), "README");
        assert_eq!(title_from_filename(".txt"), "");
        assert_eq!(title_from_filename(""), "");
    }
}
