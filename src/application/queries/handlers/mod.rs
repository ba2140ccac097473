//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod manuscript_handlers;

pub use manuscript_handlers::*;
