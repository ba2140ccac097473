//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ManuscriptStore、TextSource）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - engine: 编辑引擎门面
//! - error: 应用层错误定义

pub mod commands;
pub mod engine;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    DeleteChapter, ImportManuscript, InsertSplitMarker, MergeWithNext, SelectChapter,
    SetChapterStatus, SplitChapter, UpdateChapterContent,
    // Handlers
    handlers::{
        DeleteChapterHandler, DeleteChapterResponse, ImportManuscriptHandler,
        InsertSplitMarkerHandler, MergeChapterResponse, MergeWithNextHandler, SelectChapterHandler,
        SetChapterStatusHandler, SplitChapterHandler, SplitChapterResponse,
        UpdateChapterContentHandler,
    },
};

pub use engine::{DocumentEngine, EditorSettings, DEFAULT_NOTICE_TTL_SECS};

pub use error::ApplicationError;

pub use ports::{
    ManuscriptStorePort, ManuscriptUpdate, Notice, SourceError, SourceText, StoreError,
    TextSourcePort,
};

pub use queries::{
    CanMergeWithNext, ExportManuscript, GetCurrentChapter, GetManuscript, GetNotice, ListChapters,
    // Handlers
    handlers::{
        CanMergeWithNextHandler, ChapterSummary, ExportManuscriptHandler, GetCurrentChapterHandler,
        GetManuscriptHandler, GetNoticeHandler, ListChaptersHandler,
    },
};
