use async_trait::async_trait;
use suelo_core::error::Result;

/// Port for durable per-device key-value storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the text stored under a key
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the text stored under a key
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;
}
