//! Import Command Handlers

use std::sync::Arc;

use crate::application::commands::ImportManuscript;
use crate::application::error::ApplicationError;
use crate::application::ports::ManuscriptStorePort;
use crate::domain::manuscript::Manuscript;
use crate::infrastructure::events::EventPublisher;

/// ImportManuscript Handler - 分章并整体替换当前文稿
///
/// 分章失败时不修改已有状态
pub struct ImportManuscriptHandler {
    store: Arc<dyn ManuscriptStorePort>,
    events: Arc<EventPublisher>,
}

impl ImportManuscriptHandler {
    pub fn new(store: Arc<dyn ManuscriptStorePort>, events: Arc<EventPublisher>) -> Self {
        Self { store, events }
    }

    pub fn handle(&self, command: ImportManuscript) -> Result<Arc<Manuscript>, ApplicationError> {
        let manuscript = Manuscript::import(&command.text, &command.filename).map_err(|e| {
            tracing::warn!(filename = %command.filename, error = %e, "Manuscript import failed");
            e
        })?;

        let published = self.store.replace(manuscript);

        tracing::info!(
            manuscript_id = %published.id(),
            title = %published.title(),
            chapters = published.chapter_count(),
            "Manuscript imported"
        );
        self.events.publish_imported(&published);

        Ok(published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryManuscriptStore;

    #[test]
    fn test_import_replaces_previous_manuscript() {
        let store = Arc::new(InMemoryManuscriptStore::new());
        let handler = ImportManuscriptHandler::new(store.clone(), Arc::new(EventPublisher::new()));

        let first = handler
            .handle(ImportManuscript {
                text: "Chapter 1\nA\nChapter 2\nB".to_string(),
                filename: "first.txt".to_string(),
            })
            .unwrap();
        let second = handler
            .handle(ImportManuscript {
                text: "plain".to_string(),
                filename: "second.txt".to_string(),
            })
            .unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(first.chapter_count(), 2);
        let current = store.current().unwrap();
        assert_eq!(current.title(), "second");
        assert_eq!(current.chapter_count(), 1);
    }
}
