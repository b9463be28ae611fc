use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use session::storage::Storage;

/// In-memory storage whose reads and writes can be made to fail on demand.
#[derive(Default)]
pub struct FlakyStorage {
    pub map: Arc<Mutex<HashMap<String, String>>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub fail_removes: AtomicBool,
}

impl FlakyStorage {
    pub fn failing_reads() -> Self {
        let s = Self::default();
        s.fail_reads.store(true, Ordering::SeqCst);
        s
    }

    pub fn set_fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    pub fn set_fail_removes(&self, on: bool) {
        self.fail_removes.store(on, Ordering::SeqCst);
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.map.lock().await.get(key).cloned()
    }

    pub async fn put_raw(&self, key: &str, value: &str) {
        self.map.lock().await.insert(key.into(), value.into());
    }
}

#[async_trait]
impl Storage for FlakyStorage {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            anyhow::bail!("Disk Offline");
        }
        Ok(self.map.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("Disk Full");
        }
        self.map.lock().await.insert(key.into(), value.into());
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) || self.fail_removes.load(Ordering::SeqCst) {
            anyhow::bail!("Disk Full");
        }
        self.map.lock().await.remove(key);
        Ok(())
    }
}
