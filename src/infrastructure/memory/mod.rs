//! Memory Layer - In-Memory State Management
//!
//! 实现 ManuscriptStorePort，持有当前文稿快照和临时提示

mod manuscript_store;

pub use manuscript_store::InMemoryManuscriptStore;
