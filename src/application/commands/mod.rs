//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有文稿变更

mod manuscript_commands;

pub mod handlers;

pub use manuscript_commands::*;
