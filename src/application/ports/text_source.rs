//! Text Source Port - 文本读取抽象
//!
//! 文件读取是编辑引擎之外的协作者：负责把文件解码为 UTF-8 字符串交给引擎。
//! 具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Text Source 错误
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("File is not valid UTF-8: {0}")]
    InvalidEncoding(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// 读取到的源文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    /// 解码后的文本内容
    pub content: String,
    /// 源文件名（不含目录）
    pub filename: String,
}

/// Text Source Port
#[async_trait]
pub trait TextSourcePort: Send + Sync {
    /// 读取并解码文本文件
    async fn read(&self, path: &Path) -> Result<SourceText, SourceError>;
}
