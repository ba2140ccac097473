//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：读取文稿快照，无副作用

mod manuscript_queries;

pub mod handlers;

pub use manuscript_queries::*;
