use crate::storage::LocalStorage;
use uuid::Uuid;

pub const SESSION_KEY: &str = "demistify_session_id";

/// Persisted identifier that lets the backend keep conversation context.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    storage: LocalStorage,
}

impl SessionStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    pub fn current(&self) -> Option<String> {
        self.storage
            .get(SESSION_KEY)
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
    }

    /// Read the stored id, creating and persisting a new one if missing.
    /// A failed write is logged and the fresh id is still returned.
    pub fn get_or_create(&self) -> String {
        if let Some(id) = self.current() {
            return id;
        }
        let id = Uuid::new_v4().to_string();
        if let Err(err) = self.storage.set(SESSION_KEY, &id) {
            tracing::warn!(error = %err, "failed to persist session id");
        } else {
            tracing::info!(session_id = %id, "created session id");
        }
        id
    }

    /// Store an id issued by the backend if it differs from ours.
    pub fn adopt(&self, issued: &str) {
        let issued = issued.trim();
        if issued.is_empty() || self.current().as_deref() == Some(issued) {
            return;
        }
        match self.storage.set(SESSION_KEY, issued) {
            Ok(()) => tracing::info!(session_id = %issued, "adopted backend session id"),
            Err(err) => tracing::warn!(error = %err, "failed to persist backend session id"),
        }
    }
}
