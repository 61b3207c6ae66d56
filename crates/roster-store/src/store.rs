use async_trait::async_trait;
use roster_models::store_schema::TeamKey;
use roster_models::wire::WireRecord;

use crate::error::StoreError;

/// Key-value contract for team records. Mockable for testing.
///
/// `put` is a full replace keyed by the record's `Uuid`/`Team` attributes.
/// `delete` of a missing key succeeds.
#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn get(&self, key: &TeamKey) -> Result<Option<WireRecord>, StoreError>;

    async fn put(&self, record: WireRecord) -> Result<(), StoreError>;

    async fn delete(&self, key: &TeamKey) -> Result<(), StoreError>;
}

/// Pull the primary key out of a record about to be written.
pub(crate) fn record_key(record: &WireRecord) -> Result<TeamKey, StoreError> {
    TeamKey::from_record(record).ok_or_else(|| {
        StoreError::Validation("record is missing string-valued Uuid/Team key attributes".to_string())
    })
}
