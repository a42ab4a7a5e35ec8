//! Session store port
//!
//! Maps a session (conversation) id to the orchestration serving it, so an
//! orchestration's agents are built once per session. Eviction is the
//! boundary layer's concern.

use crate::use_cases::orchestration::Orchestration;
use std::sync::Arc;

pub trait SessionStore: Send + Sync {
    fn get(&self, id: &str) -> Option<Arc<dyn Orchestration>>;

    fn put(&self, id: &str, orchestration: Arc<dyn Orchestration>);

    /// Drop a session, returning its orchestration if there was one
    fn remove(&self, id: &str) -> Option<Arc<dyn Orchestration>>;
}
