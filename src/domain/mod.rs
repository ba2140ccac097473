//! Domain Layer - 领域层
//!
//! 包含:
//! - Manuscript Context: 文稿与章节管理
//! - 章节分割器: 导入时把原始文本切分为章节

pub mod manuscript;

mod chapter_segmenter;

pub use chapter_segmenter::{detect_heading_style, segment, HeadingStyle};
