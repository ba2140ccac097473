//! Novel Editor - 小说章节切分与编辑引擎
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Manuscript Context: 文稿、章节聚合及其变更规则
//! - Chapter Segmenter: 按标题样式把原始文本切分为章节
//!
//! 应用层 (application/):
//! - Ports: 端口定义（ManuscriptStore, TextSource）
//! - Commands: CQRS 命令处理器（选择、编辑、拆分、合并、删除）
//! - Queries: CQRS 查询处理器（章节列表、当前章节、导出）
//! - Engine: 绑定所有处理器的编辑引擎门面
//!
//! 基础设施层 (infrastructure/):
//! - Memory: ManuscriptStore 内存实现（copy-on-write 快照）
//! - Adapters: 文件文本源
//! - Events: 编辑事件广播

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{ApplicationError, DocumentEngine, EditorSettings};
pub use config::{load_config, AppConfig};
pub use domain::manuscript::{Chapter, ChapterId, ChapterStatus, Manuscript, ManuscriptError};
pub use domain::{detect_heading_style, segment, HeadingStyle};
