//! Process-local session → orchestration map

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::warn;
use tutor_application::{Orchestration, SessionStore};

type SessionMap = HashMap<String, Arc<dyn Orchestration>>;

/// [`SessionStore`] kept in memory for the life of the process
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<SessionMap>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Single insert/remove calls leave the map consistent even if a lock
    // holder panicked.
    fn read(&self) -> RwLockReadGuard<'_, SessionMap> {
        self.sessions.read().unwrap_or_else(|poisoned| {
            warn!("Session store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionMap> {
        self.sessions.write().unwrap_or_else(|poisoned| {
            warn!("Session store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, id: &str) -> Option<Arc<dyn Orchestration>> {
        self.read().get(id).cloned()
    }

    fn put(&self, id: &str, orchestration: Arc<dyn Orchestration>) {
        self.write().insert(id.to_string(), orchestration);
    }

    fn remove(&self, id: &str) -> Option<Arc<dyn Orchestration>> {
        self.write().remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tutor_application::{GatewayError, LlmGateway, OrchestrationFactory};
    use tutor_domain::{ModelReply, RenderedPrompt, TutorConfig};

    struct SilentGateway;

    #[async_trait]
    impl LlmGateway for SilentGateway {
        async fn invoke(&self, _prompt: &RenderedPrompt) -> Result<ModelReply, GatewayError> {
            Ok(ModelReply::text(""))
        }
    }

    fn orchestration() -> Arc<dyn Orchestration> {
        OrchestrationFactory::new(Arc::new(SilentGateway))
            .create(&TutorConfig::default())
            .unwrap()
    }

    #[test]
    fn test_put_get_remove() {
        let store = InMemorySessionStore::new();
        assert!(store.get("a").is_none());

        let o = orchestration();
        store.put("a", Arc::clone(&o));
        assert!(Arc::ptr_eq(&store.get("a").unwrap(), &o));
        assert_eq!(store.len(), 1);

        assert!(store.remove("a").is_some());
        assert!(store.remove("a").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_replaces_existing() {
        let store = InMemorySessionStore::new();
        let first = orchestration();
        let second = orchestration();

        store.put("a", first);
        store.put("a", Arc::clone(&second));

        assert!(Arc::ptr_eq(&store.get("a").unwrap(), &second));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_poisoned_lock_still_stores_sessions() {
        let store = Arc::new(InMemorySessionStore::new());
        store.put("before", orchestration());

        let poisoner = Arc::clone(&store);
        let result = std::thread::spawn(move || {
            let _guard = poisoner.sessions.write().unwrap();
            panic!("poison the session lock");
        })
        .join();
        assert!(result.is_err());
        assert!(store.sessions.is_poisoned());

        let o = orchestration();
        store.put("after", Arc::clone(&o));

        assert!(Arc::ptr_eq(&store.get("after").unwrap(), &o));
        assert!(store.get("before").is_some());
        assert_eq!(store.len(), 2);
        assert!(store.remove("after").is_some());
    }
}
