use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::Storage;

/// Process-local storage; nothing survives the process.
#[derive(Default)]
pub struct MemoryStorage {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.map.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.map
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.map.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove() -> anyhow::Result<()> {
        let s = MemoryStorage::new();
        assert_eq!(s.get("user").await?, None);

        s.set("user", "{}").await?;
        assert_eq!(s.get("user").await?.as_deref(), Some("{}"));

        s.remove("user").await?;
        s.remove("user").await?;
        assert_eq!(s.get("user").await?, None);
        Ok(())
    }
}
