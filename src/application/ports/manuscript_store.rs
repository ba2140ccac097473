//! Manuscript Store Port - 编辑器状态持有
//!
//! 定义当前文稿的单写者存储接口，具体实现在 infrastructure/memory 层

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::manuscript::{Manuscript, ManuscriptError};

/// Manuscript Store 错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No manuscript loaded")]
    Empty,

    #[error(transparent)]
    Rejected(#[from] ManuscriptError),
}

/// 临时提示（到期自动消失）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            expires_at: Utc::now() + ttl,
        }
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// 文稿变更函数
///
/// 在文稿副本上执行；返回错误时副本被丢弃，已发布的文稿不变
pub type ManuscriptUpdate<'a> = &'a mut dyn FnMut(&mut Manuscript) -> Result<(), ManuscriptError>;

/// Manuscript Store Port
///
/// 持有当前文稿和临时提示。写入采用 copy-on-write：
/// 在旧文稿的副本上计算新文稿，成功后整体替换发布，读者持有的快照不受影响。
pub trait ManuscriptStorePort: Send + Sync {
    /// 当前文稿快照
    fn current(&self) -> Option<Arc<Manuscript>>;

    /// 整体替换文稿（导入时使用）
    fn replace(&self, manuscript: Manuscript) -> Arc<Manuscript>;

    /// 在副本上执行变更，成功后发布新快照
    fn update(&self, apply: ManuscriptUpdate<'_>) -> Result<Arc<Manuscript>, StoreError>;

    /// 丢弃当前文稿
    fn clear(&self);

    /// 发布临时提示，覆盖之前的提示
    fn post_notice(&self, notice: Notice);

    /// 当前仍有效的提示
    fn active_notice(&self, now: DateTime<Utc>) -> Option<Notice>;
}
