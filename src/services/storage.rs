use anyhow::Result;
use async_trait::async_trait;

/// Asynchronous string key/value persistence, the device-local storage every
/// collection lives in.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace the value stored at `key`.
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    async fn remove_item(&self, key: &str) -> Result<()>;
}
