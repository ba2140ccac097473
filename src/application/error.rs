//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{SourceError, StoreError};
use crate::domain::manuscript::ManuscriptError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 尚未导入文稿
    #[error("No manuscript loaded")]
    NoManuscript,

    /// 领域规则拒绝（章节不存在、最后一章不可删除等）
    #[error(transparent)]
    Manuscript(#[from] ManuscriptError),

    /// 源文件读取失败
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    /// 领域错误（若是）
    pub fn as_manuscript_error(&self) -> Option<&ManuscriptError> {
        match self {
            Self::Manuscript(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ApplicationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Empty => Self::NoManuscript,
            StoreError::Rejected(err) => Self::Manuscript(err),
        }
    }
}
