//! Durable key/value storage for client state.
//!
//! Values are raw strings so that whatever is on disk, corrupt or not, can be
//! read back and judged by the caller.
pub mod file_store;
pub mod memory;
pub mod sqlite_store;

pub use file_store::FileStorage;
pub use memory::MemoryStorage;
pub use sqlite_store::SQLiteStorage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}
