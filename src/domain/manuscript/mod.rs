//! Manuscript Context - 文稿限界上下文
//!
//! 职责:
//! - 文稿聚合管理（选中、拆分、合并、删除、导出）
//! - 章节实体
//! - 标识与状态值对象

mod aggregate;
mod entities;
mod errors;
mod value_objects;

pub use aggregate::{ExportFormat, ExportedManuscript, Manuscript, DEFAULT_SPLIT_MARKER};
pub use entities::Chapter;
pub use errors::ManuscriptError;
pub use value_objects::{title_from_filename, ChapterId, ChapterStatus, ManuscriptId};
