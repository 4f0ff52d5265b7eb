use tracing::{debug, warn};

use crate::errors::StorageError;
use crate::models::AnonymousId;
use crate::store::KeyValueStore;

/// Storage key under which the anonymous id lives.
pub const ANONYMOUS_ID_KEY: &str = "vet_chat_anonymous_id";

/// Hands out the per-profile anonymous id, creating it on first use.
#[derive(Debug)]
pub struct IdentityStore<S> {
    store: S,
}

impl<S: KeyValueStore> IdentityStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads the stored id without creating one. Empty values count as absent.
    pub fn get(&self) -> Result<Option<AnonymousId>, StorageError> {
        Ok(self
            .store
            .get(ANONYMOUS_ID_KEY)?
            .filter(|id| !id.is_empty())
            .map(AnonymousId::from))
    }

    /// Returns the stored id, generating and persisting a new one if absent.
    pub fn ensure(&self) -> Result<AnonymousId, StorageError> {
        if let Some(id) = self.get()? {
            return Ok(id);
        }
        let id = AnonymousId::generate();
        self.store.set(ANONYMOUS_ID_KEY, id.as_str())?;
        debug!(anonymous_id = %id, "generated anonymous id");
        Ok(id)
    }

    /// Like [`ensure`](Self::ensure), but degrades to an unpersisted id when
    /// the storage backend fails.
    pub fn ensure_or_ephemeral(&self) -> AnonymousId {
        self.ensure().unwrap_or_else(|e| {
            warn!("Anonymous id storage failed, using an ephemeral id: {e}");
            AnonymousId::generate()
        })
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }
    }

    #[test]
    fn ensure_is_idempotent_for_the_same_storage() {
        let identity = IdentityStore::new(MemoryStore::new());

        let first = identity.ensure().unwrap();
        let second = identity.ensure().unwrap();

        assert_eq!(first, second);
        assert!(uuid::Uuid::parse_str(first.as_str()).is_ok());
    }

    #[test]
    fn ensure_persists_under_the_fixed_key() {
        let store = MemoryStore::new();
        let id = IdentityStore::new(&store).ensure().unwrap();

        assert_eq!(store.get(ANONYMOUS_ID_KEY).unwrap().as_deref(), Some(id.as_str()));
        // A "reload" over the same storage sees the same id.
        assert_eq!(IdentityStore::new(&store).ensure().unwrap(), id);
    }

    #[test]
    fn existing_value_is_returned_unchanged() {
        let store = MemoryStore::new();
        store.set(ANONYMOUS_ID_KEY, "not-a-uuid").unwrap();

        let identity = IdentityStore::new(store);
        assert_eq!(identity.get().unwrap().unwrap().as_str(), "not-a-uuid");
        assert_eq!(identity.ensure().unwrap().as_str(), "not-a-uuid");
    }

    #[test]
    fn get_does_not_create() {
        let identity = IdentityStore::new(MemoryStore::new());
        assert_eq!(identity.get().unwrap(), None);
        assert_eq!(identity.into_inner().get(ANONYMOUS_ID_KEY).unwrap(), None);
    }

    #[test]
    fn empty_stored_value_is_replaced() {
        let store = MemoryStore::new();
        store.set(ANONYMOUS_ID_KEY, "").unwrap();

        let id = IdentityStore::new(&store).ensure().unwrap();
        assert!(!id.as_str().is_empty());
        assert_eq!(store.get(ANONYMOUS_ID_KEY).unwrap().as_deref(), Some(id.as_str()));
    }

    #[test]
    fn storage_failure_surfaces_or_degrades() {
        let identity = IdentityStore::new(BrokenStore);
        assert!(matches!(identity.ensure(), Err(StorageError::Unavailable(_))));
        assert!(!identity.ensure_or_ephemeral().as_str().is_empty());
    }
}
