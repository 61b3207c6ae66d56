use async_trait::async_trait;
use moka::future::Cache;
use roster_models::store_schema::TeamKey;
use roster_models::wire::WireRecord;
use tracing::debug;

use crate::error::StoreError;
use crate::store::{record_key, TeamStore};

/// Process-local team record store backed by moka.
///
/// Records are never evicted or expired; they leave only through `delete`.
/// Once `max_records` records are held, puts of new keys fail with
/// `Unavailable` while replacing an existing key still succeeds. Contents
/// are lost when the process exits.
pub struct MemoryStore {
    inner: Cache<TeamKey, WireRecord>,
    max_records: u64,
}

impl MemoryStore {
    pub fn new(max_records: u64) -> Self {
        Self {
            // no max_capacity: moka would evict live records
            inner: Cache::builder().build(),
            max_records,
        }
    }

    async fn held(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}

#[async_trait]
impl TeamStore for MemoryStore {
    async fn get(&self, key: &TeamKey) -> Result<Option<WireRecord>, StoreError> {
        debug!(key = %key, "Memory get");
        Ok(self.inner.get(key).await)
    }

    async fn put(&self, record: WireRecord) -> Result<(), StoreError> {
        let key = record_key(&record)?;
        debug!(key = %key, "Memory put");
        if !self.inner.contains_key(&key) {
            let held = self.held().await;
            if held >= self.max_records {
                return Err(StoreError::Unavailable(format!(
                    "memory store full ({held} of {} records), cannot add {key}",
                    self.max_records
                )));
            }
        }
        self.inner.insert(key, record).await;
        Ok(())
    }

    async fn delete(&self, key: &TeamKey) -> Result<(), StoreError> {
        debug!(key = %key, "Memory delete");
        self.inner.invalidate(key).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_models::wire::{attr, AttributeValue};

    fn make_record(session_id: &str, team: &str) -> WireRecord {
        let mut record = WireRecord::new();
        record.insert(attr::SESSION_ID.to_string(), AttributeValue::string(session_id));
        record.insert(attr::TEAM.to_string(), AttributeValue::string(team));
        record
    }

    #[tokio::test]
    async fn put_and_get() {
        let store = MemoryStore::new(100);
        let record = make_record("s1", "Lakers");
        store.put(record.clone()).await.unwrap();

        let result = store.get(&TeamKey::new("s1", "Lakers")).await.unwrap();
        assert_eq!(result, Some(record));
    }

    #[tokio::test]
    async fn get_missing() {
        let store = MemoryStore::new(100);
        let result = store.get(&TeamKey::new("s1", "Lakers")).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn delete_removes_and_tolerates_missing() {
        let store = MemoryStore::new(100);
        let key = TeamKey::new("s1", "Lakers");
        store.put(make_record("s1", "Lakers")).await.unwrap();

        store.delete(&key).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), None);
        store.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn full_store_rejects_new_keys_and_keeps_every_record() {
        let store = MemoryStore::new(10);
        for i in 0..10 {
            store.put(make_record("s1", &format!("T{i}"))).await.unwrap();
        }

        let mut rejected = 0;
        for i in 10..50 {
            let result = store.put(make_record("s1", &format!("T{i}"))).await;
            if matches!(result, Err(StoreError::Unavailable(_))) {
                rejected += 1;
            }
        }
        assert_eq!(rejected, 40);

        // replacing a held key is still allowed
        store.put(make_record("s1", "T0")).await.unwrap();

        for i in 0..10 {
            let key = TeamKey::new("s1", format!("T{i}"));
            assert!(store.get(&key).await.unwrap().is_some(), "{key} went missing");
        }
        assert_eq!(store.held().await, 10);
    }

    #[tokio::test]
    async fn delete_frees_capacity() {
        let store = MemoryStore::new(1);
        store.put(make_record("s1", "Lakers")).await.unwrap();
        assert!(store.put(make_record("s1", "Celtics")).await.is_err());

        store.delete(&TeamKey::new("s1", "Lakers")).await.unwrap();
        store.put(make_record("s1", "Celtics")).await.unwrap();
        assert!(store.get(&TeamKey::new("s1", "Celtics")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn put_without_key_is_rejected() {
        let store = MemoryStore::new(100);
        let result = store.put(WireRecord::new()).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }
}
