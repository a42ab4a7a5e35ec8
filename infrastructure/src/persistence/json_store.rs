//! Conversations as pretty-printed JSON files, one per conversation

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use tutor_application::{ConversationStore, StoreError};
use tutor_domain::{Conversation, ConversationSummary};

/// Stores each conversation at `<dir>/<id>.json`
pub struct JsonConversationStore {
    dir: PathBuf,
}

impl JsonConversationStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    async fn read(path: &Path) -> Result<Conversation, StoreError> {
        let bytes = fs::read(path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ConversationStore for JsonConversationStore {
    async fn save(&self, conversation: &Conversation) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(&conversation.id);
        let json = serde_json::to_vec_pretty(conversation)?;
        fs::write(&path, json).await?;
        debug!("Saved conversation to {}", path.display());
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<Conversation, StoreError> {
        match Self::read(&self.path_for(id)).await {
            Err(StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(id.to_string()))
            }
            other => other,
        }
    }

    /// Summaries sorted by update time, newest first
    async fn list(&self) -> Result<Vec<ConversationSummary>, StoreError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match Self::read(&path).await {
                Ok(conversation) => summaries.push(conversation.summary()),
                Err(e) => warn!("Skipping unreadable conversation {}: {}", path.display(), e),
            }
        }

        summaries.sort_by(|a, b| b.update_time.cmp(&a.update_time));
        Ok(summaries)
    }
}
