//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod manuscript_store;
mod text_source;

pub use manuscript_store::{ManuscriptStorePort, ManuscriptUpdate, Notice, StoreError};
pub use text_source::{SourceError, SourceText, TextSourcePort};
