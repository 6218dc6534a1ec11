pub mod conversation;
pub mod database;
pub mod entity_store;
#[cfg(test)]
pub(crate) mod flaky;
pub mod memory;
pub mod notice;
pub mod storage;
pub mod tasks;
pub mod theme;

pub use conversation::ConversationService;
pub use database::Database;
pub use entity_store::{EntityStore, Placement, StoreError};
pub use memory::MemoryStore;
pub use storage::KeyValueStore;
pub use tasks::TaskService;
pub use theme::ThemeService;
