//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

mod file_source;

pub use file_source::FileTextSource;
