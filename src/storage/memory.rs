use super::{ObjectMeta, ObjectStore, StoreError};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

struct Entry {
    body: Vec<u8>,
    last_modified: DateTime<Utc>,
}

/// In-process store, keyed by (bucket, key).
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: RwLock<BTreeMap<(String, String), Entry>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, bucket: &str, key: &str, body: Vec<u8>) {
        self.put_at(bucket, key, body, Utc::now());
    }

    pub fn put_at(&self, bucket: &str, key: &str, body: Vec<u8>, last_modified: DateTime<Utc>) {
        // Each insert is a single map operation, so a poisoned map is still whole.
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        objects.insert(
            (bucket.to_string(), key.to_string()),
            Entry {
                body,
                last_modified,
            },
        );
    }
}

impl ObjectStore for MemoryObjectStore {
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);

        objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|e| e.body.clone())
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectMeta>, StoreError> {
        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);

        Ok(objects
            .iter()
            .filter(|((b, k), _)| b == bucket && k.starts_with(prefix))
            .map(|((_, k), e)| ObjectMeta {
                key: k.clone(),
                last_modified: e.last_modified,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn writes_survive_a_poisoned_lock() {
        let store = Arc::new(MemoryObjectStore::new());
        let holder = Arc::clone(&store);
        let crashed = thread::spawn(move || {
            let _guard = holder.objects.write().unwrap();
            panic!("writer crashed while holding the lock");
        })
        .join();
        assert!(crashed.is_err());
        assert!(store.objects.is_poisoned());

        store.put("b", "k", b"body".to_vec());
        assert_eq!(store.get("b", "k").unwrap(), b"body".to_vec());
        assert_eq!(store.list("b", "").unwrap().len(), 1);
    }
}
