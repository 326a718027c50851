//! The persisted player record: one JSON document under a named key.

use crate::{
    errors::{AppResult, StorageError},
    storage::KeyValueStore,
    user::User,
};

/// Default record name
pub const DEFAULT_RECORD_KEY: &str = "prediction-master-user";

const USER_RECORD_PREFIX: &str = "user:record:";

fn user_record_key(record: &str) -> Vec<u8> {
    format!("{}{}", USER_RECORD_PREFIX, record).into_bytes()
}

/// Load the player record, `Ok(None)` if it was never written
pub fn load_user(storage: &dyn KeyValueStore, record: &str) -> AppResult<Option<User>> {
    let Some(bytes) = storage.get(&user_record_key(record))? else {
        return Ok(None);
    };

    let user: User = serde_json::from_slice(&bytes).map_err(|e| {
        StorageError::CorruptedData(format!("Failed to decode user record '{}': {}", record, e))
    })?;

    Ok(Some(user))
}

/// Overwrite the whole player record
pub fn store_user(storage: &dyn KeyValueStore, record: &str, user: &User) -> AppResult<()> {
    let bytes = serde_json::to_vec(user).map_err(|e| {
        StorageError::WriteFailed(format!("Failed to encode user record '{}': {}", record, e))
    })?;

    storage.put(&user_record_key(record), &bytes)?;
    tracing::debug!(record, coins = user.coins, energy = user.energy, "User record written");
    Ok(())
}

/// Write raw bytes under the record key (used to exercise recovery paths)
pub fn store_raw(storage: &dyn KeyValueStore, record: &str, bytes: &[u8]) -> AppResult<()> {
    storage.put(&user_record_key(record), bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_missing_record_is_none() {
        let storage = MemoryStorage::new();
        assert!(load_user(&storage, DEFAULT_RECORD_KEY).unwrap().is_none());
    }

    #[test]
    fn test_store_then_load() {
        let storage = MemoryStorage::new();
        let mut user = User::new(1_000);
        user.coins = 777;
        store_user(&storage, DEFAULT_RECORD_KEY, &user).unwrap();

        let loaded = load_user(&storage, DEFAULT_RECORD_KEY).unwrap().unwrap();
        assert_eq!(loaded, user);
    }

    #[test]
    fn test_records_are_isolated_by_name() {
        let storage = MemoryStorage::new();
        store_user(&storage, "alice", &User::new(1)).unwrap();
        assert!(load_user(&storage, "bob").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_record_reports_corruption() {
        let storage = MemoryStorage::new();
        store_raw(&storage, DEFAULT_RECORD_KEY, b"{not json").unwrap();

        match load_user(&storage, DEFAULT_RECORD_KEY) {
            Err(AppError::Storage(StorageError::CorruptedData(msg))) => {
                assert!(msg.contains(DEFAULT_RECORD_KEY))
            }
            other => panic!("expected corrupted data, got {:?}", other),
        }
    }
}
