//! Events - 编辑事件广播

mod publisher;

pub use publisher::{EditorEvent, EventPublisher};
