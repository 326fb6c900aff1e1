//! Typed slot persistence
//!
//! Turns a raw [`KeyValueBackend`] into typed `load`/`save` calls. Values are
//! encoded as JSON. Neither operation can fail from the caller's point of
//! view:
//!
//! - `load` returns the supplied default when the slot is absent, unreadable
//!   or does not decode into the requested shape.
//! - `save` logs and swallows any write failure; the in-memory value stays
//!   authoritative until the next successful save.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::backend::KeyValueBackend;
use super::error::{StorageError, StorageResult};

/// Slot holding the note collection
pub const NOTES_SLOT: &str = "notes";
/// Slot holding the ordered category labels
pub const CATEGORIES_SLOT: &str = "categories";
/// Slot holding the pro entitlement flag
pub const ENTITLEMENT_SLOT: &str = "isPro";

/// Typed load/save over a shared backend
///
/// Cloning is cheap; every store keeps its own handle to the same backend.
#[derive(Clone)]
pub struct Persistence {
    backend: Arc<dyn KeyValueBackend>,
}

impl Persistence {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Name of the underlying backend
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Load a slot, falling back to `default` on absence or any failure
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(slot = key, "Slot absent, using default");
                default
            }
            Err(e) => {
                warn!(
                    slot = key,
                    backend = self.backend_name(),
                    error = %e,
                    "Discarding unreadable slot, using default"
                );
                default
            }
        }
    }

    /// Encode and write a slot; failures are logged, never returned
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match self.try_save(key, value) {
            Ok(()) => debug!(slot = key, "Slot saved"),
            Err(e) => {
                warn!(
                    slot = key,
                    backend = self.backend_name(),
                    error = %e,
                    recoverable = e.is_recoverable(),
                    suggestion = e.recovery_suggestion().unwrap_or(""),
                    "Failed to save slot, keeping in-memory state"
                );
            }
        }
    }

    /// Load a slot, surfacing errors instead of defaulting
    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Encoding {
                key: key.to_string(),
                source,
            })
    }

    /// Encode and write a slot, surfacing errors
    pub fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Encoding {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileBackend, MemoryBackend};
    use tempfile::TempDir;

    fn memory() -> (Arc<MemoryBackend>, Persistence) {
        let backend = Arc::new(MemoryBackend::new());
        let persistence = Persistence::new(backend.clone());
        (backend, persistence)
    }

    #[test]
    fn test_load_absent_returns_default() {
        let (_, persistence) = memory();
        let value: Vec<String> = persistence.load(CATEGORIES_SLOT, vec!["x".to_string()]);
        assert_eq!(value, vec!["x"]);
    }

    #[test]
    fn test_save_then_load() {
        let (backend, persistence) = memory();
        let labels = vec!["Home".to_string(), "Garden".to_string()];

        persistence.save(CATEGORIES_SLOT, &labels);

        assert_eq!(
            backend.raw(CATEGORIES_SLOT).as_deref(),
            Some(r#"["Home","Garden"]"#)
        );
        let loaded: Vec<String> = persistence.load(CATEGORIES_SLOT, Vec::new());
        assert_eq!(loaded, labels);
    }

    #[test]
    fn test_load_wrong_shape_returns_default() {
        let backend = Arc::new(MemoryBackend::new().with_slot(CATEGORIES_SLOT, "\"not a list\""));
        let persistence = Persistence::new(backend);

        let loaded: Vec<String> = persistence.load(CATEGORIES_SLOT, vec!["Personal".to_string()]);
        assert_eq!(loaded, vec!["Personal"]);
    }

    #[test]
    fn test_load_malformed_returns_default() {
        let backend = Arc::new(MemoryBackend::new().with_slot(ENTITLEMENT_SLOT, "{tru"));
        let persistence = Persistence::new(backend);

        assert!(!persistence.load(ENTITLEMENT_SLOT, false));
        assert!(persistence.try_load::<bool>(ENTITLEMENT_SLOT).is_err());
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let (backend, persistence) = memory();
        persistence.save(ENTITLEMENT_SLOT, &false);

        backend.set_read_only(true);
        persistence.save(ENTITLEMENT_SLOT, &true);

        assert_eq!(backend.raw(ENTITLEMENT_SLOT).as_deref(), Some("false"));
        assert!(persistence.try_save(ENTITLEMENT_SLOT, &true).is_err());
    }

    #[test]
    fn test_file_backend_persistence() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = Persistence::new(Arc::new(FileBackend::new(temp_dir.path())));

        persistence.save(ENTITLEMENT_SLOT, &true);

        let reopened = Persistence::new(Arc::new(FileBackend::new(temp_dir.path())));
        assert!(reopened.load(ENTITLEMENT_SLOT, false));
    }
}
